//! Validation of control values.
//!
//! A [`Validator`] maps a control and its value to a [`ValidationResult`]:
//! an immutable list of [`ValidationMessage`]s, each an error or a warning.
//! [`ValidationSupport`] attaches validators to controls, re-runs them when a
//! control's value changes, decorates controls by severity, and publishes an
//! aggregate result for message lists and "invalid" indicators.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lattice_controls::validation::{
//!     ValidationSupport, empty_validator, equals_validator, predicate_validator,
//! };
//! use lattice_controls_core::{Color, ControlKind, Value, ValueControl};
//!
//! let support = ValidationSupport::new();
//! let name = Arc::new(ValueControl::new(ControlKind::TextField, ""));
//! let color = Arc::new(ValueControl::new(ControlKind::ColorPicker, Color::BLUE));
//! let slider = Arc::new(ValueControl::new(ControlKind::Slider, -10.0));
//!
//! support.register_validator(name.clone(), empty_validator("Text is required"));
//! support.register_validator(color.clone(), equals_validator("Color should be RED", [Color::RED]));
//! support.register_validator(
//!     slider.clone(),
//!     predicate_validator("Slider value should be > 0", |v: &Value| {
//!         v.as_float().is_some_and(|n| n <= 0.0)
//!     }),
//! );
//! assert_eq!(support.result().len(), 3);
//!
//! name.set_value("Ann");
//! color.set_value(Color::RED);
//! slider.set_value(10.0);
//! assert!(support.result().is_empty());
//! ```

mod message;
mod result;
mod support;
mod validator;
mod validators;

pub use message::{Severity, ValidationMessage};
pub use result::{ValidationResult, ValidationResultBuilder};
pub use support::{ControlRef, Registration, RegistrationId, ValidationSupport};
pub use validator::{CustomValidator, Validator, ValidatorRef};
pub use validators::{
    CombinedValidator, EmptyValidator, EqualsValidator, PredicateValidator, RegexValidator,
    combine, empty_validator, empty_validator_with_severity, equals_validator,
    equals_validator_with_severity, predicate_validator, predicate_validator_with_severity,
    regex_validator, regex_validator_with_severity,
};
