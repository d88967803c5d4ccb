//! Lattice Controls - a property sheet and a validation framework.
//!
//! This is the main crate; it re-exports the core primitives from
//! `lattice_controls_core` alongside its two engines:
//!
//! - [`property_sheet`]: lists named, typed properties as label/editor rows,
//!   flat or grouped by category, filtered by name
//! - [`validation`]: attaches validators to controls, decorates invalid
//!   controls and publishes an aggregate result
//!
//! Both engines are headless. They describe what to show (a render tree, a
//! decoration per control) and leave drawing to the host toolkit.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lattice_controls::prelude::*;
//!
//! let sheet = PropertySheet::new();
//! sheet.set_items([SimpleItem::new("Age", 25).with_category("Personal").into_ref()]);
//! sheet.set_filter("AG");
//! assert_eq!(sheet.current().row_labels(), vec!["Age"]);
//!
//! let support = ValidationSupport::new();
//! let field = Arc::new(ValueControl::new(ControlKind::TextField, ""));
//! support.register_validator(field.clone(), empty_validator("Text is required"));
//! assert!(support.is_invalid());
//! ```

pub use lattice_controls_core::*;

pub mod config;
mod error;
pub mod prelude;
pub mod property_sheet;
pub mod validation;

pub use error::{Error, Result};
