// ABOUTME: Generic encode/decode path for every generated resource.
// ABOUTME: JSON and YAML carry the same object graph; no per-kind logic.

use serde::Serialize;
use serde::de::DeserializeOwned;
use snafu::{ResultExt, Snafu};
use std::fmt;

/// Structured text format for emitted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_yaml_flag(yaml: bool) -> Self {
        if yaml {
            OutputFormat::Yaml
        } else {
            OutputFormat::Json
        }
    }

    /// File extension used for per-resource files.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum CodecError {
    #[snafu(display("JSON encoding failed: {source}"))]
    Json { source: serde_json::Error },

    #[snafu(display("YAML encoding failed: {source}"))]
    Yaml { source: serde_yaml::Error },
}

/// Encode any resource in the requested format.
pub fn serialize<T>(value: &T, format: OutputFormat) -> Result<Vec<u8>, CodecError>
where
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Json => serde_json::to_vec_pretty(value).context(JsonSnafu),
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(String::into_bytes)
            .context(YamlSnafu),
    }
}

/// Decode a document previously produced by [`serialize`].
pub fn deserialize<T>(bytes: &[u8], format: OutputFormat) -> Result<T, CodecError>
where
    T: DeserializeOwned,
{
    match format {
        OutputFormat::Json => serde_json::from_slice(bytes).context(JsonSnafu),
        OutputFormat::Yaml => serde_yaml::from_slice(bytes).context(YamlSnafu),
    }
}
