// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal and quiet modes; generated manifests never go through here.

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly messages about written files
    Normal,
    /// No feedback; used for scripting and when manifests go to stdout
    Quiet,
}

/// Handles CLI feedback based on the configured mode.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    pub fn quiet() -> Self {
        Self::new(OutputMode::Quiet)
    }

    /// Print a progress message (suppressed in quiet mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Report a created file or directory.
    pub fn created(&self, what: &str, path: &std::path::Path) {
        self.progress(&format!("{what} {:?} created", path.display().to_string()));
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        eprintln!("Error: {message}");
    }
}
