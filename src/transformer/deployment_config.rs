// ABOUTME: OpenShift DeploymentConfig resource, which k8s-openapi does not model.
// ABOUTME: Map selector, pod template, and triggers; no replica count.

use k8s_openapi::api::core::v1::PodTemplateSpec;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const API_VERSION: &str = "apps.openshift.io/v1";
pub const KIND: &str = "DeploymentConfig";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    pub api_version: String,
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    pub spec: DeploymentConfigSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfigSpec {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,
    pub template: PodTemplateSpec,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<DeploymentTriggerPolicy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTriggerPolicy {
    #[serde(rename = "type")]
    pub type_: String,
}

impl DeploymentTriggerPolicy {
    /// Redeploy whenever the pod template changes.
    pub fn config_change() -> Self {
        DeploymentTriggerPolicy {
            type_: "ConfigChange".to_string(),
        }
    }
}

impl DeploymentConfig {
    pub fn new(
        name: &str,
        selector: BTreeMap<String, String>,
        template: PodTemplateSpec,
    ) -> Self {
        DeploymentConfig {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            spec: DeploymentConfigSpec {
                selector,
                template,
                triggers: vec![DeploymentTriggerPolicy::config_change()],
            },
        }
    }
}
