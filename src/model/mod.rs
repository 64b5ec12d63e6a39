// ABOUTME: Normalized service model consumed by the transformer.
// ABOUTME: Loads konvoy.yml / konvoy.json documents keyed by service name.

mod environment;
mod port;
mod restart_policy;
mod volume;

pub use port::{PortMapping, Protocol};
pub use restart_policy::RestartPolicy;
pub use volume::{VolumeSource, VolumeSpec};

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::path::Path;

pub const MODEL_FILENAME: &str = "konvoy.yml";
pub const MODEL_FILENAME_ALT: &str = "konvoy.yaml";
pub const MODEL_FILENAME_JSON: &str = "konvoy.json";

/// All services of one application, in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceModel {
    #[serde(default)]
    pub services: IndexMap<String, ServiceConfig>,
}

/// One application service. Never mutated by the transformer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "deserialize_command")]
    pub command: Vec<String>,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default, deserialize_with = "environment::deserialize_environment")]
    pub environment: IndexMap<String, String>,

    #[serde(default)]
    pub working_dir: Option<String>,

    /// Raw restart token; resolved when the pod template is built.
    #[serde(default)]
    pub restart: String,

    #[serde(default)]
    pub privileged: bool,

    #[serde(default)]
    pub annotations: BTreeMap<String, String>,

    #[serde(default)]
    pub volumes: Vec<String>,

    #[serde(default, deserialize_with = "port::deserialize_ports")]
    pub ports: Vec<PortMapping>,

    #[serde(default)]
    pub service_type: Option<ServiceType>,
}

/// Exposure of the generated network object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "ClusterIP", alias = "clusterip")]
    ClusterIp,
    #[serde(rename = "NodePort", alias = "nodeport")]
    NodePort,
    #[serde(rename = "LoadBalancer", alias = "loadbalancer")]
    LoadBalancer,
}

impl ServiceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::ClusterIp => "ClusterIP",
            ServiceType::NodePort => "NodePort",
            ServiceType::LoadBalancer => "LoadBalancer",
        }
    }
}

impl ServiceModel {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::from)
    }

    /// Load a model file; `.json` files are read as JSON, everything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let model = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content)?,
            _ => Self::from_yaml(&content)?,
        };
        tracing::debug!(
            path = %path.display(),
            services = model.services.len(),
            "loaded service model"
        );
        Ok(model)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        Self::load(&Self::locate(dir)?)
    }

    /// Find the model file in `dir`, trying each known file name in turn.
    pub fn locate(dir: &Path) -> Result<std::path::PathBuf> {
        let candidates = [
            dir.join(MODEL_FILENAME),
            dir.join(MODEL_FILENAME_ALT),
            dir.join(MODEL_FILENAME_JSON),
        ];

        candidates
            .into_iter()
            .find(|path| path.exists())
            .ok_or_else(|| Error::ModelNotFound(dir.to_path_buf()))
    }
}

impl ServiceConfig {
    pub fn new(image: impl Into<String>) -> Self {
        ServiceConfig {
            image: Some(image.into()),
            ..Default::default()
        }
    }

    pub fn volume_specs(&self) -> impl Iterator<Item = VolumeSpec> + '_ {
        self.volumes.iter().map(|v| VolumeSpec::parse(v))
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommandEntry {
    Line(String),
    Args(Vec<String>),
}

fn deserialize_command<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CommandEntry::deserialize(deserializer)? {
        CommandEntry::Line(line) => line.split_whitespace().map(str::to_string).collect(),
        CommandEntry::Args(args) => args,
    })
}
