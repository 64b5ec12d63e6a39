// ABOUTME: Environment variable declarations in map or KEY=VALUE list form.
// ABOUTME: Keeps declaration order; bare keys are resolved from the process environment.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Str(s) => s,
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EnvEntries {
    Map(IndexMap<String, Option<Scalar>>),
    List(Vec<String>),
}

fn from_process(name: &str) -> Option<String> {
    let value = std::env::var(name).ok();
    if value.is_none() {
        tracing::debug!(variable = name, "environment variable unset, dropping it");
    }
    value
}

pub(super) fn deserialize_environment<'de, D>(
    deserializer: D,
) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = EnvEntries::deserialize(deserializer)?;
    let env = match entries {
        EnvEntries::Map(map) => map
            .into_iter()
            .filter_map(|(name, value)| {
                let value = match value {
                    Some(v) => Some(v.into_string()),
                    None => from_process(&name),
                };
                value.map(|v| (name, v))
            })
            .collect(),
        EnvEntries::List(items) => items
            .into_iter()
            .filter_map(|item| match item.split_once('=') {
                Some((name, value)) => Some((name.to_string(), value.to_string())),
                None => from_process(&item).map(|v| (item, v)),
            })
            .collect(),
    };
    Ok(env)
}
