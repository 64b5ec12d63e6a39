// ABOUTME: Skeleton constructors for each controller kind and the network object.
// ABOUTME: All kinds select pods by {"service": name} and wrap a one-container template.

use super::ResourceKind;
use super::deployment_config::DeploymentConfig;
use super::mappers;
use super::template::{PodTemplateFragment, fill_object_meta, fill_pod_template};
use crate::model::ServiceConfig;
use k8s_openapi::api::apps::v1::{DaemonSet, DaemonSetSpec, Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{
    Container, PodSpec, PodTemplateSpec, ReplicationController, ReplicationControllerSpec,
    Service, ServicePort, ServiceSpec,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use nonempty::NonEmpty;
use serde::Serialize;
use std::collections::BTreeMap;

/// A resource that manages pods through an embedded pod template.
pub trait PodController: Serialize {
    const KIND: ResourceKind;

    fn object_meta_mut(&mut self) -> &mut ObjectMeta;

    fn pod_template_mut(&mut self) -> &mut PodTemplateSpec;

    fn pod_template(&self) -> Option<&PodTemplateSpec>;
}

/// Apply shared metadata and the pod template fragment to a controller.
pub fn update_controller<C: PodController>(
    controller: &mut C,
    fragment: &PodTemplateFragment,
    annotations: &BTreeMap<String, String>,
) {
    fill_object_meta(controller.object_meta_mut(), &fragment.labels, annotations);
    fill_pod_template(controller.pod_template_mut(), fragment);
}

fn object_meta(name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn pod_template_stub(name: &str, service: &ServiceConfig) -> PodTemplateSpec {
    PodTemplateSpec {
        metadata: None,
        spec: Some(PodSpec {
            containers: vec![Container {
                name: name.to_string(),
                image: service.image.clone(),
                ..Default::default()
            }],
            ..Default::default()
        }),
    }
}

fn label_selector(name: &str) -> LabelSelector {
    LabelSelector {
        match_labels: Some(mappers::labels(name)),
        ..Default::default()
    }
}

pub fn replication_controller(
    name: &str,
    service: &ServiceConfig,
    replicas: i32,
) -> ReplicationController {
    ReplicationController {
        metadata: object_meta(name),
        spec: Some(ReplicationControllerSpec {
            replicas: Some(replicas),
            selector: Some(mappers::labels(name)),
            template: Some(pod_template_stub(name, service)),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn deployment(name: &str, service: &ServiceConfig, replicas: i32) -> Deployment {
    Deployment {
        metadata: object_meta(name),
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            selector: label_selector(name),
            template: pod_template_stub(name, service),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn daemon_set(name: &str, service: &ServiceConfig) -> DaemonSet {
    DaemonSet {
        metadata: object_meta(name),
        spec: Some(DaemonSetSpec {
            selector: label_selector(name),
            template: pod_template_stub(name, service),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn deployment_config(name: &str, service: &ServiceConfig) -> DeploymentConfig {
    DeploymentConfig::new(
        name,
        mappers::labels(name),
        pod_template_stub(name, service),
    )
}

/// The network object only exists for services with at least one port.
pub fn service(name: &str, service: &ServiceConfig, ports: NonEmpty<ServicePort>) -> Service {
    Service {
        metadata: object_meta(name),
        spec: Some(ServiceSpec {
            selector: Some(mappers::labels(name)),
            ports: Some(ports.into_iter().collect()),
            type_: service.service_type.map(|t| t.as_str().to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

impl PodController for ReplicationController {
    const KIND: ResourceKind = ResourceKind::ReplicationController;

    fn object_meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }

    fn pod_template_mut(&mut self) -> &mut PodTemplateSpec {
        self.spec
            .get_or_insert_with(Default::default)
            .template
            .get_or_insert_with(Default::default)
    }

    fn pod_template(&self) -> Option<&PodTemplateSpec> {
        self.spec.as_ref().and_then(|spec| spec.template.as_ref())
    }
}

impl PodController for Deployment {
    const KIND: ResourceKind = ResourceKind::Deployment;

    fn object_meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }

    fn pod_template_mut(&mut self) -> &mut PodTemplateSpec {
        &mut self.spec.get_or_insert_with(Default::default).template
    }

    fn pod_template(&self) -> Option<&PodTemplateSpec> {
        self.spec.as_ref().map(|spec| &spec.template)
    }
}

impl PodController for DaemonSet {
    const KIND: ResourceKind = ResourceKind::DaemonSet;

    fn object_meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }

    fn pod_template_mut(&mut self) -> &mut PodTemplateSpec {
        &mut self.spec.get_or_insert_with(Default::default).template
    }

    fn pod_template(&self) -> Option<&PodTemplateSpec> {
        self.spec.as_ref().map(|spec| &spec.template)
    }
}

impl PodController for DeploymentConfig {
    const KIND: ResourceKind = ResourceKind::DeploymentConfig;

    fn object_meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }

    fn pod_template_mut(&mut self) -> &mut PodTemplateSpec {
        &mut self.spec.template
    }

    fn pod_template(&self) -> Option<&PodTemplateSpec> {
        Some(&self.spec.template)
    }
}
