// ABOUTME: Resolved pod template fragment shared by every controller of a service.
// ABOUTME: Fills pod templates and object metadata from the fragment.

use super::mappers;
use crate::error::{Error, Result};
use crate::model::{RestartPolicy, ServiceConfig};
use k8s_openapi::api::core::v1::{
    ContainerPort, EnvVar, PodTemplateSpec, SecurityContext, Volume, VolumeMount,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

/// Everything a controller's pod template carries for one service.
///
/// Built once per service and applied unchanged to each controller kind, so
/// all kinds end up with identical pod specs.
#[derive(Debug, Clone, PartialEq)]
pub struct PodTemplateFragment {
    pub env: Vec<EnvVar>,
    pub command: Vec<String>,
    pub args: Vec<String>,
    pub working_dir: Option<String>,
    pub volume_mounts: Vec<VolumeMount>,
    pub volumes: Vec<Volume>,
    pub ports: Vec<ContainerPort>,
    pub labels: BTreeMap<String, String>,
    pub privileged: bool,
    pub restart_policy: RestartPolicy,
}

impl PodTemplateFragment {
    /// Fails only when the restart token is not recognized.
    pub fn build(name: &str, service: &ServiceConfig) -> Result<Self> {
        let restart_policy =
            service
                .restart
                .parse::<RestartPolicy>()
                .map_err(|_| Error::UnknownRestartPolicy {
                    service: name.to_string(),
                    policy: service.restart.clone(),
                })?;

        let (volume_mounts, volumes) = mappers::volumes(name, service);

        Ok(PodTemplateFragment {
            env: mappers::env(service),
            command: service.command.clone(),
            args: service.args.clone(),
            working_dir: service.working_dir.clone().filter(|dir| !dir.is_empty()),
            volume_mounts,
            volumes,
            ports: mappers::ports(service),
            labels: mappers::labels(name),
            privileged: service.privileged,
            restart_policy,
        })
    }
}

fn non_empty<T: Clone>(items: &[T]) -> Option<Vec<T>> {
    (!items.is_empty()).then(|| items.to_vec())
}

/// Apply the fragment to the first container and the pod-level fields.
pub fn fill_pod_template(template: &mut PodTemplateSpec, fragment: &PodTemplateFragment) {
    template
        .metadata
        .get_or_insert_with(ObjectMeta::default)
        .labels = Some(fragment.labels.clone());

    let spec = template.spec.get_or_insert_with(Default::default);
    if let Some(container) = spec.containers.first_mut() {
        container.env = non_empty(&fragment.env);
        container.command = non_empty(&fragment.command);
        container.args = non_empty(&fragment.args);
        container.working_dir = fragment.working_dir.clone();
        container.volume_mounts = non_empty(&fragment.volume_mounts);
        container.ports = non_empty(&fragment.ports);
        // Unprivileged containers carry no security context at all.
        container.security_context = fragment.privileged.then(|| SecurityContext {
            privileged: Some(true),
            ..Default::default()
        });
    }
    spec.volumes = non_empty(&fragment.volumes);
    spec.restart_policy = Some(fragment.restart_policy.as_pod_policy().to_string());
}

pub fn fill_object_meta(
    meta: &mut ObjectMeta,
    labels: &BTreeMap<String, String>,
    annotations: &BTreeMap<String, String>,
) {
    meta.labels = Some(labels.clone());
    meta.annotations = (!annotations.is_empty()).then(|| annotations.clone());
}
