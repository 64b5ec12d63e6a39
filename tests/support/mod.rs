// ABOUTME: Test support utilities.
// ABOUTME: Provides tracing setup, model fixtures, and decoding helpers.

// Each test binary only uses some of these helpers.
#![allow(dead_code)]

use k8s_openapi::api::apps::v1::{DaemonSet, Deployment};
use k8s_openapi::api::core::v1::{PodTemplateSpec, ReplicationController};
use konvoy::diagnostics::Diagnostics;
use konvoy::model::ServiceModel;
use konvoy::options::ConvertOptions;
use konvoy::serializer::{OutputFormat, deserialize};
use konvoy::transformer::{DeploymentConfig, OutputBundle, PodController, ServiceOutputs};
use serde::de::DeserializeOwned;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env().add_directive("konvoy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const SHOP_YAML: &str = r#"
services:
  web:
    image: nginx:1.25
    restart: always
    ports:
      - 80
      - "443"
    environment:
      LOG_LEVEL: info
      WORKERS: 4
    annotations:
      team: frontend
  worker:
    image: myorg/worker:2
    command: ["bundle", "exec", "sidekiq"]
    working_dir: /app
    restart: on-failure
    volumes:
      - ./cache:/cache:ro
      - /tmp/scratch
"#;

pub fn shop_model() -> ServiceModel {
    ServiceModel::from_yaml(SHOP_YAML).unwrap()
}

pub fn convert(model: &ServiceModel, options: &ConvertOptions) -> (OutputBundle, Diagnostics) {
    init_tracing();
    let mut diag = Diagnostics::default();
    let bundle = konvoy::transformer::transform(model, options, &mut diag).unwrap();
    (bundle, diag)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8], format: OutputFormat) -> T {
    deserialize(bytes, format).unwrap()
}

pub fn template_of<C: PodController + DeserializeOwned>(
    bytes: &[u8],
    format: OutputFormat,
) -> PodTemplateSpec {
    let controller: C = decode(bytes, format);
    controller.pod_template().cloned().unwrap()
}

/// Pod templates of the four controller kinds: rc, deployment, daemon set,
/// deployment config.
pub fn pod_templates(outputs: &ServiceOutputs, format: OutputFormat) -> [PodTemplateSpec; 4] {
    [
        template_of::<ReplicationController>(&outputs.replication_controller, format),
        template_of::<Deployment>(&outputs.deployment, format),
        template_of::<DaemonSet>(&outputs.daemon_set, format),
        template_of::<DeploymentConfig>(&outputs.deployment_config, format),
    ]
}
