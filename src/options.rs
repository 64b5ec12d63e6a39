// ABOUTME: Run-wide conversion options: replicas, format, destination, emitted kinds.
// ABOUTME: Validates flag combinations before any conversion work starts.

use crate::error::{Error, Result};
use crate::serializer::OutputFormat;
use crate::transformer::ResourceKind;
use std::path::{Path, PathBuf};

/// Where emitted documents go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// One file per resource inside a directory.
    Directory(PathBuf),
    /// All documents concatenated into one file.
    File(PathBuf),
    /// All documents concatenated onto standard output.
    Stdout,
}

impl Destination {
    /// Resolve an `--out` argument: existing directories and paths ending in a
    /// separator are directories, anything else is a single file.
    pub fn from_out_path(path: &Path) -> Self {
        let is_dir = path.is_dir() || path.as_os_str().to_string_lossy().ends_with('/');
        if is_dir {
            Destination::Directory(path.to_path_buf())
        } else {
            Destination::File(path.to_path_buf())
        }
    }

    /// Directory that sibling artifacts, like a chart, are written next to.
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            Destination::Directory(dir) => Some(dir),
            Destination::File(path) => Some(
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .unwrap_or(Path::new(".")),
            ),
            Destination::Stdout => None,
        }
    }

    pub fn is_stream(&self) -> bool {
        !matches!(self, Destination::Directory(_))
    }
}

impl Default for Destination {
    fn default() -> Self {
        Destination::Directory(PathBuf::from("."))
    }
}

/// Which generated kinds are written out. Network objects are always written
/// when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitFlags {
    pub deployment: bool,
    pub daemon_set: bool,
    pub replication_controller: bool,
    pub deployment_config: bool,
    pub chart: bool,
}

impl EmitFlags {
    pub fn enabled(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Service => true,
            ResourceKind::Deployment => self.deployment,
            ResourceKind::DaemonSet => self.daemon_set,
            ResourceKind::ReplicationController => self.replication_controller,
            ResourceKind::DeploymentConfig => self.deployment_config,
        }
    }

    pub fn controller_count(&self) -> usize {
        [
            self.deployment,
            self.daemon_set,
            self.replication_controller,
            self.deployment_config,
        ]
        .into_iter()
        .filter(|enabled| *enabled)
        .count()
    }

    /// Fall back to deployments when no controller kind was asked for.
    pub fn or_default_controller(mut self) -> Self {
        if self.controller_count() == 0 {
            self.deployment = true;
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Model file the run was loaded from; names the chart.
    pub input: PathBuf,
    /// Desired replicas for replication controllers and deployments.
    pub replicas: i32,
    pub format: OutputFormat,
    pub destination: Destination,
    pub emit: EmitFlags,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            input: PathBuf::from(crate::model::MODEL_FILENAME),
            replicas: 1,
            format: OutputFormat::default(),
            destination: Destination::default(),
            emit: EmitFlags::default().or_default_controller(),
        }
    }
}

impl ConvertOptions {
    pub fn validate(&self) -> Result<()> {
        if self.replicas < 0 {
            return Err(Error::InvalidOptions(format!(
                "replicas must not be negative, got {}",
                self.replicas
            )));
        }

        if self.destination.is_stream() && self.emit.controller_count() > 1 {
            return Err(Error::InvalidOptions(
                "only one controller kind can be written to a single file or stdout".to_string(),
            ));
        }

        if self.emit.chart && self.destination == Destination::Stdout {
            return Err(Error::InvalidOptions(
                "a chart cannot be generated when writing to stdout".to_string(),
            ));
        }

        Ok(())
    }

    /// Name of the generated chart: the model file name without extension.
    pub fn chart_name(&self) -> String {
        self.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "konvoy".to_string())
    }
}
