//! Error types for Lattice Controls core.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the core primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A [`Value`](crate::Value) held a different variant than requested.
    #[error("Value type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// The requested type name.
        expected: &'static str,
        /// The type name actually held.
        got: &'static str,
    },
}
