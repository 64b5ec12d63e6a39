// ABOUTME: Emission policy: picks which generated documents are written and where.
// ABOUTME: Fixed kind order, per-resource files or one concatenated stream, optional chart.

pub mod chart;

use crate::error::Result;
use crate::options::{ConvertOptions, Destination, EmitFlags};
use crate::output::Output;
use crate::serializer::OutputFormat;
use crate::transformer::{OutputBundle, ResourceKind};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// One serialized resource selected for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    pub service: &'a str,
    pub kind: ResourceKind,
    pub data: &'a [u8],
}

impl Document<'_> {
    /// e.g. `web-svc.yaml`, `web-deployment.json`
    pub fn file_name(&self, format: OutputFormat) -> String {
        format!(
            "{}-{}.{}",
            self.service,
            self.kind.file_suffix(),
            format.extension()
        )
    }
}

/// Documents to write, grouped by kind in emission order and by service in
/// processing order within a kind.
pub fn select<'a>(bundle: &'a OutputBundle, flags: &EmitFlags) -> Vec<Document<'a>> {
    ResourceKind::EMISSION_ORDER
        .into_iter()
        .filter(|kind| flags.enabled(*kind))
        .flat_map(move |kind| {
            bundle.iter().filter_map(move |(service, outputs)| {
                outputs.get(kind).map(|data| Document {
                    service,
                    kind,
                    data,
                })
            })
        })
        .collect()
}

/// Concatenate documents onto one writer. YAML documents are separated by
/// `---`; every document ends with a newline.
pub fn write_stream<W: Write>(
    writer: &mut W,
    documents: &[Document<'_>],
    format: OutputFormat,
) -> io::Result<()> {
    for (index, document) in documents.iter().enumerate() {
        if format == OutputFormat::Yaml && index > 0 {
            writer.write_all(b"---\n")?;
        }
        writer.write_all(document.data)?;
        if !document.data.ends_with(b"\n") {
            writer.write_all(b"\n")?;
        }
    }
    writer.flush()
}

/// Write the selected documents to the configured destination and, when
/// requested, package a chart. Returns every file written.
pub fn emit(
    bundle: &OutputBundle,
    options: &ConvertOptions,
    output: &Output,
) -> Result<Vec<PathBuf>> {
    let documents = select(bundle, &options.emit);
    let format = bundle.format();
    let mut written = Vec::new();

    match &options.destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            write_stream(&mut stdout.lock(), &documents, format)?;
        }
        Destination::File(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_stream(&mut writer, &documents, format)?;
            output.created("file", path);
            written.push(path.clone());
        }
        Destination::Directory(dir) => {
            written.extend(write_files(dir, &documents, format, output)?);
        }
    }

    if options.emit.chart
        && let Some(base) = options.destination.base_dir()
    {
        let chart_dir = base.join(options.chart_name());
        let names: Vec<&str> = bundle.service_names().collect();
        chart::generate(&chart_dir, &options.chart_name(), &names, bundle, &options.emit)?;
        output.created("chart", &chart_dir);
    }

    Ok(written)
}

fn write_files(
    dir: &Path,
    documents: &[Document<'_>],
    format: OutputFormat,
    output: &Output,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    documents
        .iter()
        .map(|document| {
            let path = dir.join(document.file_name(format));
            std::fs::write(&path, document.data)?;
            output.created("file", &path);
            Ok(path)
        })
        .collect()
}
