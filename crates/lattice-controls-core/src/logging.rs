//! Logging facilities for Lattice Controls.
//!
//! Lattice Controls uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_controls=debug")
//!     .init();
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "lattice_controls_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_controls_core::signal";
    /// Property system target.
    pub const PROPERTY: &str = "lattice_controls_core::property";
    /// Control stand-ins target.
    pub const CONTROL: &str = "lattice_controls_core::control";
    /// Property sheet rebuilds.
    pub const PROPERTY_SHEET: &str = "lattice_controls::property_sheet";
    /// Validation engine.
    pub const VALIDATION: &str = "lattice_controls::validation";
}
