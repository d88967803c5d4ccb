//! Error types for Lattice Controls.

use lattice_controls_core::CoreError;

/// Result type alias for control operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring the controls.
///
/// Validation failures are data, not errors: they are reported through
/// [`ValidationResult`](crate::validation::ValidationResult).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A validator pattern failed to compile.
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration document could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Error raised by a core primitive.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl Error {
    /// Create a pattern error.
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }
}
