// ABOUTME: Lenient parsing of "[source:]target[:mode]" volume declarations.
// ABOUTME: Never fails; malformed input still yields a mount.

/// Where a volume's data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeSource {
    /// No source, or a named volume: backed by scratch storage.
    Ephemeral,
    /// A path on the node.
    HostPath(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSpec {
    pub source: VolumeSource,
    pub target: String,
    pub read_only: bool,
}

impl VolumeSpec {
    pub fn parse(s: &str) -> Self {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();

        let (source, target, mode) = match parts.as_slice() {
            [target] => (None, *target, None),
            [source, target] => (Some(*source), *target, None),
            [source, target, mode, ..] => (Some(*source), *target, Some(*mode)),
            [] => (None, "", None),
        };

        let source = match source {
            Some(src) if is_path(src) => VolumeSource::HostPath(src.to_string()),
            _ => VolumeSource::Ephemeral,
        };

        VolumeSpec {
            source,
            target: target.to_string(),
            read_only: mode == Some("ro"),
        }
    }
}

fn is_path(source: &str) -> bool {
    source.starts_with('/') || source.starts_with('.') || source.starts_with('~')
}
