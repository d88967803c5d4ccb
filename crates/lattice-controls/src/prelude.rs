//! Prelude module for Lattice Controls.
//!
//! ```
//! use lattice_controls::prelude::*;
//! ```
//!
//! This provides access to:
//! - Observers (`Signal`, `Property`, `ObservableProperty`)
//! - Values and controls (`Value`, `Color`, `Control`, `ValueControl`)
//! - The property sheet (`PropertySheet`, `SimpleItem`, `Mode`)
//! - Validation (`ValidationSupport`, the built-in validators)

// ============================================================================
// Observers
// ============================================================================

pub use crate::{ConnectionId, ObservableProperty, Property, Signal};

// ============================================================================
// Values and Controls
// ============================================================================

pub use crate::{Color, Control, ControlId, ControlKind, Decoration, TypeTag, Value, ValueControl};

// ============================================================================
// Property Sheet
// ============================================================================

pub use crate::property_sheet::{
    DefaultEditorFactory, EditorFactory, EditorRef, Item, ItemRef, Mode, PropertyEditor,
    PropertySheet, RenderedSheet, SimpleItem, editor_ref,
};

// ============================================================================
// Validation
// ============================================================================

pub use crate::validation::{
    CustomValidator, Severity, ValidationMessage, ValidationResult, ValidationResultBuilder,
    ValidationSupport, Validator, empty_validator, equals_validator, predicate_validator,
    regex_validator,
};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::ControlsConfig;
pub use crate::Error;
