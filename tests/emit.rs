// ABOUTME: Integration tests for the emission policy and chart packaging.
// ABOUTME: Verifies kind ordering, stream separators, per-resource files, and charts.

mod support;

use konvoy::emit::{self, Document, select, write_stream};
use konvoy::options::{ConvertOptions, Destination, EmitFlags};
use konvoy::output::Output;
use konvoy::serializer::OutputFormat;
use konvoy::transformer::ResourceKind;
use std::fs;
use std::path::PathBuf;
use support::*;

fn all_kinds() -> EmitFlags {
    EmitFlags {
        deployment: true,
        daemon_set: true,
        replication_controller: true,
        deployment_config: true,
        chart: false,
    }
}

fn kinds_of(documents: &[Document<'_>]) -> Vec<(String, ResourceKind)> {
    documents
        .iter()
        .map(|d| (d.service.to_string(), d.kind))
        .collect()
}

mod selection {
    use super::*;

    #[test]
    fn fixed_kind_order_then_service_order() {
        let (bundle, _) = convert(&shop_model(), &ConvertOptions::default());
        let documents = select(&bundle, &all_kinds());

        let expected = vec![
            ("web".to_string(), ResourceKind::Service),
            ("web".to_string(), ResourceKind::Deployment),
            ("worker".to_string(), ResourceKind::Deployment),
            ("web".to_string(), ResourceKind::DaemonSet),
            ("worker".to_string(), ResourceKind::DaemonSet),
            ("web".to_string(), ResourceKind::ReplicationController),
            ("worker".to_string(), ResourceKind::ReplicationController),
            ("web".to_string(), ResourceKind::DeploymentConfig),
            ("worker".to_string(), ResourceKind::DeploymentConfig),
        ];
        assert_eq!(kinds_of(&documents), expected);
    }

    #[test]
    fn disabled_kinds_are_skipped() {
        let (bundle, _) = convert(&shop_model(), &ConvertOptions::default());
        let flags = EmitFlags {
            daemon_set: true,
            ..Default::default()
        };
        let documents = select(&bundle, &flags);

        assert_eq!(
            kinds_of(&documents),
            vec![
                ("web".to_string(), ResourceKind::Service),
                ("web".to_string(), ResourceKind::DaemonSet),
                ("worker".to_string(), ResourceKind::DaemonSet),
            ]
        );
    }

    #[test]
    fn file_names_follow_kind_suffixes() {
        let document = Document {
            service: "web",
            kind: ResourceKind::ReplicationController,
            data: b"{}",
        };
        assert_eq!(document.file_name(OutputFormat::Json), "web-rc.json");
        assert_eq!(document.file_name(OutputFormat::Yaml), "web-rc.yaml");
    }
}

mod streams {
    use super::*;

    #[test]
    fn yaml_documents_are_separated() {
        let options = ConvertOptions {
            format: OutputFormat::Yaml,
            ..Default::default()
        };
        let (bundle, _) = convert(&shop_model(), &options);
        let documents = select(&bundle, &options.emit);

        let mut buffer = Vec::new();
        write_stream(&mut buffer, &documents, OutputFormat::Yaml).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert_eq!(text.matches("---\n").count(), documents.len() - 1);
        assert!(text.starts_with("apiVersion: v1\nkind: Service\n"));
    }

    #[test]
    fn json_documents_end_with_newlines() {
        let (bundle, _) = convert(&shop_model(), &ConvertOptions::default());
        let documents = select(&bundle, &EmitFlags::default());

        let mut buffer = Vec::new();
        write_stream(&mut buffer, &documents, OutputFormat::Json).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let parsed: Vec<serde_json::Value> = serde_json::Deserializer::from_str(&text)
            .into_iter::<serde_json::Value>()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(parsed.len(), documents.len());
        assert_eq!(parsed[0]["kind"], "Service");
        assert!(text.ends_with("}\n"));
    }
}

mod destinations {
    use super::*;

    #[test]
    fn directory_gets_one_file_per_resource() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions {
            destination: Destination::Directory(dir.path().to_path_buf()),
            emit: all_kinds(),
            ..Default::default()
        };
        let (bundle, _) = convert(&shop_model(), &options);

        let written = emit::emit(&bundle, &options, &Output::quiet()).unwrap();
        assert_eq!(written.len(), 9);
        assert!(dir.path().join("web-svc.json").exists());
        assert!(dir.path().join("worker-deploymentconfig.json").exists());
        assert!(!dir.path().join("worker-svc.json").exists());
    }

    #[test]
    fn single_file_holds_every_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all.yaml");
        let options = ConvertOptions {
            format: OutputFormat::Yaml,
            destination: Destination::File(path.clone()),
            ..Default::default()
        };
        let (bundle, _) = convert(&shop_model(), &options);

        let written = emit::emit(&bundle, &options, &Output::quiet()).unwrap();
        assert_eq!(written, vec![path.clone()]);

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("kind: Service\n").count(), 1);
        assert_eq!(text.matches("kind: Deployment\n").count(), 2);
    }

    #[test]
    fn out_path_resolution() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Destination::from_out_path(dir.path()),
            Destination::Directory(dir.path().to_path_buf())
        );
        assert_eq!(
            Destination::from_out_path(&PathBuf::from("manifests/")),
            Destination::Directory(PathBuf::from("manifests/"))
        );
        assert_eq!(
            Destination::from_out_path(&PathBuf::from("out.json")),
            Destination::File(PathBuf::from("out.json"))
        );
    }
}

mod chart {
    use super::*;

    #[test]
    fn chart_packages_enabled_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions {
            input: PathBuf::from("shop.yml"),
            format: OutputFormat::Yaml,
            destination: Destination::Directory(dir.path().join("out")),
            emit: EmitFlags {
                deployment: true,
                deployment_config: true,
                chart: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let (bundle, _) = convert(&shop_model(), &options);
        emit::emit(&bundle, &options, &Output::quiet()).unwrap();

        let chart = dir.path().join("out").join("shop");
        let metadata = fs::read_to_string(chart.join("Chart.yaml")).unwrap();
        assert!(metadata.contains("name: shop"));
        assert!(metadata.contains("apiVersion: v2"));
        assert!(chart.join("README.md").exists());

        let templates = chart.join("templates");
        assert!(templates.join("web-svc.yaml").exists());
        assert!(templates.join("web-deployment.yaml").exists());
        assert!(templates.join("worker-deployment.yaml").exists());
        assert!(!templates.join("worker-svc.yaml").exists());
        assert!(!templates.join("web-deploymentconfig.yaml").exists());
        assert!(!templates.join("web-daemonset.yaml").exists());
    }

    #[test]
    fn chart_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // A file where the chart directory should go.
        fs::write(dir.path().join("shop"), "").unwrap();

        let options = ConvertOptions {
            input: PathBuf::from("shop.yml"),
            destination: Destination::Directory(dir.path().to_path_buf()),
            emit: EmitFlags {
                deployment: true,
                chart: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let (bundle, _) = convert(&shop_model(), &options);
        let err = emit::emit(&bundle, &options, &Output::quiet()).unwrap_err();
        assert!(err.to_string().contains("chart"));
    }
}
