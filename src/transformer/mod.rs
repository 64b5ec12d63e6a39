// ABOUTME: Per-service transformation from the service model to serialized resources.
// ABOUTME: Builds one shared pod template fragment and fans it out to every controller kind.

pub mod controllers;
pub mod deployment_config;
pub mod mappers;
pub mod template;

pub use controllers::{PodController, update_controller};
pub use deployment_config::DeploymentConfig;
pub use template::{PodTemplateFragment, fill_object_meta, fill_pod_template};

use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::model::{ServiceConfig, ServiceModel};
use crate::options::ConvertOptions;
use crate::serializer::{self, OutputFormat};
use indexmap::IndexMap;
use nonempty::NonEmpty;
use serde::Serialize;
use std::fmt;

/// Kinds of generated resources, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Service,
    Deployment,
    DaemonSet,
    ReplicationController,
    DeploymentConfig,
}

impl ResourceKind {
    pub const EMISSION_ORDER: [ResourceKind; 5] = [
        ResourceKind::Service,
        ResourceKind::Deployment,
        ResourceKind::DaemonSet,
        ResourceKind::ReplicationController,
        ResourceKind::DeploymentConfig,
    ];

    /// Suffix used in per-resource file names.
    pub fn file_suffix(self) -> &'static str {
        match self {
            ResourceKind::Service => "svc",
            ResourceKind::Deployment => "deployment",
            ResourceKind::DaemonSet => "daemonset",
            ResourceKind::ReplicationController => "rc",
            ResourceKind::DeploymentConfig => "deploymentconfig",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Service => "Service",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::DaemonSet => "DaemonSet",
            ResourceKind::ReplicationController => "ReplicationController",
            ResourceKind::DeploymentConfig => "DeploymentConfig",
        };
        write!(f, "{name}")
    }
}

/// Serialized documents generated for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceOutputs {
    /// Absent when the service declares no ports.
    pub service: Option<Vec<u8>>,
    pub deployment: Vec<u8>,
    pub daemon_set: Vec<u8>,
    pub replication_controller: Vec<u8>,
    pub deployment_config: Vec<u8>,
}

impl ServiceOutputs {
    pub fn get(&self, kind: ResourceKind) -> Option<&[u8]> {
        match kind {
            ResourceKind::Service => self.service.as_deref(),
            ResourceKind::Deployment => Some(&self.deployment),
            ResourceKind::DaemonSet => Some(&self.daemon_set),
            ResourceKind::ReplicationController => Some(&self.replication_controller),
            ResourceKind::DeploymentConfig => Some(&self.deployment_config),
        }
    }
}

/// Everything one run generated, keyed by service name in processing order.
#[derive(Debug, Clone, Default)]
pub struct OutputBundle {
    format: OutputFormat,
    services: IndexMap<String, ServiceOutputs>,
}

impl OutputBundle {
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn service_names(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Option<&ServiceOutputs> {
        self.services.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceOutputs)> {
        self.services.iter().map(|(name, outputs)| (name.as_str(), outputs))
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Convert every service of the model. The first error aborts the run and no
/// bundle is returned.
pub fn transform(
    model: &ServiceModel,
    options: &ConvertOptions,
    diag: &mut Diagnostics,
) -> Result<OutputBundle> {
    let mut bundle = OutputBundle {
        format: options.format,
        services: IndexMap::with_capacity(model.services.len()),
    };

    for (name, service) in &model.services {
        let outputs = transform_service(name, service, options, diag)?;
        bundle.services.insert(name.clone(), outputs);
    }

    tracing::debug!(services = bundle.len(), format = %options.format, "transformation complete");
    Ok(bundle)
}

fn transform_service(
    name: &str,
    service: &ServiceConfig,
    options: &ConvertOptions,
    diag: &mut Diagnostics,
) -> Result<ServiceOutputs> {
    let mut rc = controllers::replication_controller(name, service, options.replicas);
    let mut deployment = controllers::deployment(name, service, options.replicas);
    let mut daemon_set = controllers::daemon_set(name, service);
    let mut deployment_config = controllers::deployment_config(name, service);

    let fragment = PodTemplateFragment::build(name, service)?;
    let annotations = mappers::annotations(service);

    update_controller(&mut rc, &fragment, &annotations);
    update_controller(&mut deployment, &fragment, &annotations);
    update_controller(&mut daemon_set, &fragment, &annotations);
    update_controller(&mut deployment_config, &fragment, &annotations);

    let replication_controller = encode_controller(name, &rc, options.format)?;
    let deployment = encode_controller(name, &deployment, options.format)?;
    let daemon_set = encode_controller(name, &daemon_set, options.format)?;

    let network = match NonEmpty::from_vec(mappers::service_ports(name, service)) {
        Some(ports) => {
            let mut svc = controllers::service(name, service, ports);
            fill_object_meta(&mut svc.metadata, &fragment.labels, &annotations);
            Some(encode(name, ResourceKind::Service, &svc, options.format)?)
        }
        None => {
            diag.warn(Warning::missing_ports(name));
            None
        }
    };

    let deployment_config = encode_controller(name, &deployment_config, options.format)?;

    Ok(ServiceOutputs {
        service: network,
        deployment,
        daemon_set,
        replication_controller,
        deployment_config,
    })
}

fn encode_controller<C: PodController>(
    name: &str,
    controller: &C,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    encode(name, C::KIND, controller, format)
}

fn encode<T: Serialize>(
    name: &str,
    kind: ResourceKind,
    value: &T,
    format: OutputFormat,
) -> Result<Vec<u8>> {
    let data = serializer::serialize(value, format).map_err(|source| Error::Serialize {
        service: name.to_string(),
        kind,
        source,
    })?;
    tracing::debug!(service = name, %kind, bytes = data.len(), "generated resource");
    Ok(data)
}
