// ABOUTME: Pure conversions from service attributes to Kubernetes sub-structures.
// ABOUTME: Environment, ports, service ports, volumes, labels, and annotations.

use crate::model::{ServiceConfig, VolumeSource};
use k8s_openapi::api::core::v1::{
    ContainerPort, EmptyDirVolumeSource, EnvVar, HostPathVolumeSource, ServicePort, Volume,
    VolumeMount,
};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use std::collections::BTreeMap;

/// Label key every controller selects its pods by.
pub const SERVICE_LABEL: &str = "service";

/// Longest name a service port may carry.
pub const MAX_PORT_NAME_LEN: usize = 15;

pub fn labels(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([(SERVICE_LABEL.to_string(), name.to_string())])
}

pub fn annotations(service: &ServiceConfig) -> BTreeMap<String, String> {
    service.annotations.clone()
}

/// One entry per declared variable, in declaration order.
pub fn env(service: &ServiceConfig) -> Vec<EnvVar> {
    service
        .environment
        .iter()
        .map(|(name, value)| EnvVar {
            name: name.clone(),
            value: Some(value.clone()),
            ..Default::default()
        })
        .collect()
}

pub fn ports(service: &ServiceConfig) -> Vec<ContainerPort> {
    service
        .ports
        .iter()
        .map(|port| ContainerPort {
            container_port: i32::from(port.container_port),
            protocol: Some(port.protocol.as_str().to_string()),
            ..Default::default()
        })
        .collect()
}

/// Ports of the network object. The service-facing port is the published
/// port when one is declared. Ports are only named when there is more than
/// one, since names must then be unique.
pub fn service_ports(name: &str, service: &ServiceConfig) -> Vec<ServicePort> {
    let named = service.ports.len() > 1;
    service
        .ports
        .iter()
        .enumerate()
        .map(|(index, port)| ServicePort {
            name: named.then(|| port_name(name, index)),
            port: i32::from(port.host_port.unwrap_or(port.container_port)),
            target_port: Some(IntOrString::Int(i32::from(port.container_port))),
            protocol: Some(port.protocol.as_str().to_string()),
            ..Default::default()
        })
        .collect()
}

/// `<service>-<index>`, with the service prefix shortened so the whole name
/// fits in [`MAX_PORT_NAME_LEN`]. A prefix cut on a hyphen drops the hyphen
/// so the name never holds `--`.
fn port_name(service: &str, index: usize) -> String {
    let suffix = format!("-{index}");
    let budget = MAX_PORT_NAME_LEN.saturating_sub(suffix.len());
    let prefix: String = service.chars().take(budget).collect();
    format!("{}{suffix}", prefix.trim_end_matches('-'))
}

/// One mount and one pod volume per declaration, linked by a shared name.
pub fn volumes(name: &str, service: &ServiceConfig) -> (Vec<VolumeMount>, Vec<Volume>) {
    service
        .volume_specs()
        .enumerate()
        .map(|(index, spec)| {
            let volume_name = format!("{name}-volume-{index}");

            let mount = VolumeMount {
                name: volume_name.clone(),
                mount_path: spec.target,
                read_only: spec.read_only.then_some(true),
                ..Default::default()
            };

            let volume = match spec.source {
                VolumeSource::HostPath(path) => Volume {
                    name: volume_name,
                    host_path: Some(HostPathVolumeSource {
                        path,
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                VolumeSource::Ephemeral => Volume {
                    name: volume_name,
                    empty_dir: Some(EmptyDirVolumeSource::default()),
                    ..Default::default()
                },
            };

            (mount, volume)
        })
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PortMapping, Protocol};

    fn service_with_ports(ports: Vec<PortMapping>) -> ServiceConfig {
        ServiceConfig {
            ports,
            ..ServiceConfig::new("nginx")
        }
    }

    #[test]
    fn env_keeps_declaration_order() {
        let mut service = ServiceConfig::new("app");
        service.environment.insert("ZETA".to_string(), "1".to_string());
        service.environment.insert("ALPHA".to_string(), "2".to_string());

        let names: Vec<_> = env(&service).into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["ZETA", "ALPHA"]);
    }

    #[test]
    fn ports_default_to_tcp() {
        let service = service_with_ports(vec![PortMapping::new(80)]);
        let mapped = ports(&service);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].container_port, 80);
        assert_eq!(mapped[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn single_service_port_is_unnamed() {
        let service = service_with_ports(vec![PortMapping::new(80)]);
        let mapped = service_ports("web", &service);
        assert_eq!(mapped[0].name, None);
        assert_eq!(mapped[0].port, 80);
        assert_eq!(mapped[0].target_port, Some(IntOrString::Int(80)));
    }

    #[test]
    fn multiple_service_ports_are_named() {
        let service = service_with_ports(vec![
            PortMapping::new(80),
            PortMapping::new(53).protocol(Protocol::Udp),
        ]);
        let mapped = service_ports("web", &service);
        assert_eq!(mapped[0].name.as_deref(), Some("web-0"));
        assert_eq!(mapped[1].name.as_deref(), Some("web-1"));
        assert_eq!(mapped[1].protocol.as_deref(), Some("UDP"));
    }

    #[test]
    fn long_service_names_are_shortened_in_port_names() {
        let service = service_with_ports(vec![
            PortMapping::new(80).published(8080),
            PortMapping::new(443),
        ]);
        let mapped = service_ports("payment-gateway", &service);
        let names: Vec<_> = mapped.iter().map(|p| p.name.clone().unwrap()).collect();

        assert_eq!(names, ["payment-gatew-0", "payment-gatew-1"]);
        assert!(names.iter().all(|n| n.len() <= MAX_PORT_NAME_LEN));
    }

    #[test]
    fn shortened_prefix_drops_trailing_hyphen() {
        assert_eq!(port_name("order-service-api", 3), "order-service-3");
        assert_eq!(port_name("abcdefghijkl-xyz", 0), "abcdefghijkl-0");
        assert_eq!(port_name("web", 12), "web-12");
    }

    #[test]
    fn published_port_faces_the_service() {
        let service = service_with_ports(vec![PortMapping::new(80).published(8080)]);
        let mapped = service_ports("web", &service);
        assert_eq!(mapped[0].port, 8080);
        assert_eq!(mapped[0].target_port, Some(IntOrString::Int(80)));
    }

    #[test]
    fn mounts_and_volumes_share_names() {
        let service = ServiceConfig {
            volumes: vec!["/data".to_string(), "./conf:/etc/conf:ro".to_string()],
            ..ServiceConfig::new("app")
        };
        let (mounts, vols) = volumes("db", &service);

        assert_eq!(mounts.len(), 2);
        assert_eq!(vols.len(), 2);
        for (mount, volume) in mounts.iter().zip(&vols) {
            assert_eq!(mount.name, volume.name);
        }
        assert_eq!(mounts[0].name, "db-volume-0");
        assert!(vols[0].empty_dir.is_some());
        assert_eq!(mounts[1].mount_path, "/etc/conf");
        assert_eq!(mounts[1].read_only, Some(true));
        assert_eq!(vols[1].host_path.as_ref().map(|h| h.path.as_str()), Some("./conf"));
    }

    #[test]
    fn selector_labels() {
        assert_eq!(labels("web").get(SERVICE_LABEL).map(String::as_str), Some("web"));
    }
}
