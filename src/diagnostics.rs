// ABOUTME: Diagnostics accumulator for non-fatal warnings during conversion.
// ABOUTME: Collects warnings that shouldn't fail a run but should be shown to users.

/// Collects non-fatal warnings during a conversion run.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(service = %warning.service, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A non-fatal warning collected during conversion.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub service: String,
    pub message: String,
}

impl Warning {
    /// Create a warning for a service whose network object was skipped.
    pub fn missing_ports(service: impl Into<String>) -> Self {
        let service = service.into();
        Self {
            kind: WarningKind::MissingPorts,
            message: format!("[{service}] Service cannot be created because of missing port."),
            service,
        }
    }
}

/// Categories of warnings that can occur during conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// No ports declared, so no network object was generated.
    MissingPorts,
}
