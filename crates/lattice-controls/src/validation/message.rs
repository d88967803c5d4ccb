//! Severity-tagged validation messages.

use std::fmt;

use lattice_controls_core::ControlId;
use serde::{Deserialize, Serialize};

/// How serious a validation message is.
///
/// Orders with `Error` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// One message about one control.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidationMessage {
    text: String,
    severity: Severity,
    target: ControlId,
}

impl ValidationMessage {
    pub fn new(target: ControlId, text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
            target,
        }
    }

    pub fn error(target: ControlId, text: impl Into<String>) -> Self {
        Self::new(target, text, Severity::Error)
    }

    pub fn warning(target: ControlId, text: impl Into<String>) -> Self {
        Self::new(target, text, Severity::Warning)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// The control the message is about.
    pub fn target(&self) -> ControlId {
        self.target
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_display() {
        let id = ControlId::next();
        assert_eq!(
            ValidationMessage::error(id, "Text is required").to_string(),
            "ERROR: Text is required"
        );
        assert_eq!(
            ValidationMessage::warning(id, "Looks odd").to_string(),
            "WARNING: Looks odd"
        );
    }

    #[test]
    fn test_severity_order() {
        assert!(Severity::Error < Severity::Warning);
        let mut severities = vec![Severity::Warning, Severity::Error];
        severities.sort();
        assert_eq!(severities, vec![Severity::Error, Severity::Warning]);
    }
}
