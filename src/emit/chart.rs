// ABOUTME: Helm chart packaging of generated documents.
// ABOUTME: Writes Chart.yaml, README.md, and one template per emitted resource.

use super::Document;
use crate::error::{Error, Result};
use crate::options::EmitFlags;
use crate::transformer::{OutputBundle, ResourceKind};
use serde::Serialize;
use std::path::Path;

/// Kinds a chart may contain. DeploymentConfigs stay out of charts.
const CHART_KINDS: [ResourceKind; 4] = [
    ResourceKind::Service,
    ResourceKind::Deployment,
    ResourceKind::DaemonSet,
    ResourceKind::ReplicationController,
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartMetadata<'a> {
    api_version: &'static str,
    name: &'a str,
    description: String,
    version: &'static str,
    keywords: Vec<&'a str>,
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    std::fs::write(path, contents).map_err(|source| Error::Chart {
        path: path.to_path_buf(),
        source,
    })
}

/// Package the documents of `service_names` into a chart rooted at `dir`.
pub fn generate(
    dir: &Path,
    name: &str,
    service_names: &[&str],
    bundle: &OutputBundle,
    flags: &EmitFlags,
) -> Result<()> {
    let templates = dir.join("templates");
    std::fs::create_dir_all(&templates).map_err(|source| Error::Chart {
        path: templates.clone(),
        source,
    })?;

    let metadata = ChartMetadata {
        api_version: "v2",
        name,
        description: format!("A generated Helm chart for {name}"),
        version: "0.0.1",
        keywords: vec![name],
    };
    write_file(
        &dir.join("Chart.yaml"),
        serde_yaml::to_string(&metadata)?.as_bytes(),
    )?;
    write_file(
        &dir.join("README.md"),
        format!("# {name}\n\nThis chart was generated by konvoy.\n").as_bytes(),
    )?;

    let format = bundle.format();
    let mut count = 0;
    for kind in CHART_KINDS.into_iter().filter(|kind| flags.enabled(*kind)) {
        for &service in service_names {
            let Some(data) = bundle.get(service).and_then(|outputs| outputs.get(kind)) else {
                continue;
            };
            let document = Document {
                service,
                kind,
                data,
            };
            write_file(&templates.join(document.file_name(format)), data)?;
            count += 1;
        }
    }

    tracing::debug!(chart = name, templates = count, path = %dir.display(), "chart generated");
    Ok(())
}
