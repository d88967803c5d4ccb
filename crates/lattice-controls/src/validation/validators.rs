//! Built-in validators.
//!
//! Every validator here is stateless apart from its configuration and can be
//! shared across controls.
//!
//! - [`empty_validator`]: the value must not be empty
//! - [`equals_validator`]: the value must be one of an allowed set
//! - [`predicate_validator`]: fails when a predicate on the value holds
//! - [`regex_validator`]: the value's text must match a pattern
//! - [`combine`]: runs several validators as one

use std::fmt;

use lattice_controls_core::{Control, Value};

use super::message::{Severity, ValidationMessage};
use super::result::ValidationResult;
use super::validator::{Validator, ValidatorRef};
use crate::error::{Error, Result};

fn report(
    control: &dyn Control,
    message: &str,
    severity: Severity,
    failed: bool,
) -> ValidationResult {
    if failed {
        ValidationResult::from_message(ValidationMessage::new(control.id(), message, severity))
    } else {
        ValidationResult::empty()
    }
}

// =========================================================================
// Required
// =========================================================================

/// Fails when the value is absent, empty text or an empty list.
///
/// A selection control with nothing selected holds [`Value::None`] and so
/// fails as well.
#[derive(Debug, Clone)]
pub struct EmptyValidator {
    message: String,
    severity: Severity,
}

impl Validator for EmptyValidator {
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult {
        report(control, &self.message, self.severity, value.is_empty())
    }

    fn label(&self) -> &str {
        "required"
    }
}

/// A required-value validator reporting errors.
pub fn empty_validator(message: impl Into<String>) -> EmptyValidator {
    empty_validator_with_severity(message, Severity::Error)
}

/// A required-value validator reporting at the given severity.
pub fn empty_validator_with_severity(
    message: impl Into<String>,
    severity: Severity,
) -> EmptyValidator {
    EmptyValidator {
        message: message.into(),
        severity,
    }
}

// =========================================================================
// Equals
// =========================================================================

/// Fails when the value is not one of the allowed values.
#[derive(Debug, Clone)]
pub struct EqualsValidator {
    message: String,
    severity: Severity,
    allowed: Vec<Value>,
}

impl EqualsValidator {
    pub fn allowed(&self) -> &[Value] {
        &self.allowed
    }
}

impl Validator for EqualsValidator {
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult {
        report(control, &self.message, self.severity, !self.allowed.contains(value))
    }

    fn label(&self) -> &str {
        "equals"
    }
}

/// An allowed-values validator reporting errors.
///
/// ```
/// use lattice_controls::validation::{Validator, equals_validator};
/// use lattice_controls_core::{Color, Control, ControlKind, ValueControl};
///
/// let validator = equals_validator("Color should be WHITE", [Color::WHITE]);
/// let picker = ValueControl::new(ControlKind::ColorPicker, Color::BLUE);
///
/// assert!(validator.validate(&picker, &picker.value()).errors_present());
/// ```
pub fn equals_validator<I, V>(message: impl Into<String>, allowed: I) -> EqualsValidator
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    equals_validator_with_severity(message, Severity::Error, allowed)
}

/// An allowed-values validator reporting at the given severity.
pub fn equals_validator_with_severity<I, V>(
    message: impl Into<String>,
    severity: Severity,
    allowed: I,
) -> EqualsValidator
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    EqualsValidator {
        message: message.into(),
        severity,
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

// =========================================================================
// Predicate
// =========================================================================

/// Fails when its predicate returns `true`.
///
/// The predicate describes the failure, not the success: a validator built
/// from `|v| v <= 0` rejects non-positive values.
pub struct PredicateValidator<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    message: String,
    severity: Severity,
    fails: F,
}

impl<F> Validator for PredicateValidator<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult {
        report(control, &self.message, self.severity, (self.fails)(value))
    }

    fn label(&self) -> &str {
        "predicate"
    }
}

impl<F> fmt::Debug for PredicateValidator<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateValidator")
            .field("message", &self.message)
            .field("severity", &self.severity)
            .finish()
    }
}

/// A validator reporting an error whenever `fails` holds.
///
/// ```
/// use lattice_controls::validation::{Validator, predicate_validator};
/// use lattice_controls_core::{ControlKind, Value, ValueControl};
///
/// let positive = predicate_validator("Slider value should be > 0", |v: &Value| {
///     v.as_float().is_some_and(|n| n <= 0.0)
/// });
/// let slider = ValueControl::new(ControlKind::Slider, -10.0);
///
/// assert!(positive.validate(&slider, &Value::from(-10.0)).errors_present());
/// assert!(positive.validate(&slider, &Value::from(10.0)).is_empty());
/// ```
pub fn predicate_validator<F>(message: impl Into<String>, fails: F) -> PredicateValidator<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    predicate_validator_with_severity(message, Severity::Error, fails)
}

/// A validator reporting at the given severity whenever `fails` holds.
pub fn predicate_validator_with_severity<F>(
    message: impl Into<String>,
    severity: Severity,
    fails: F,
) -> PredicateValidator<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    PredicateValidator {
        message: message.into(),
        severity,
        fails,
    }
}

// =========================================================================
// Regex
// =========================================================================

/// Fails when the value's text does not match a pattern.
///
/// Non-text values are matched against their display form; an absent value
/// never matches.
#[derive(Debug, Clone)]
pub struct RegexValidator {
    message: String,
    severity: Severity,
    pattern: regex::Regex,
}

impl RegexValidator {
    /// Get the pattern string.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Validator for RegexValidator {
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult {
        let matched = match value {
            Value::None => false,
            Value::Text(text) => self.pattern.is_match(text),
            other => self.pattern.is_match(&other.to_string()),
        };
        report(control, &self.message, self.severity, !matched)
    }

    fn label(&self) -> &str {
        "regex"
    }
}

/// A pattern validator reporting errors.
///
/// Returns [`Error::InvalidPattern`] when `pattern` does not compile.
pub fn regex_validator(message: impl Into<String>, pattern: &str) -> Result<RegexValidator> {
    regex_validator_with_severity(message, Severity::Error, pattern)
}

/// A pattern validator reporting at the given severity.
pub fn regex_validator_with_severity(
    message: impl Into<String>,
    severity: Severity,
    pattern: &str,
) -> Result<RegexValidator> {
    let compiled = regex::Regex::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e))?;
    Ok(RegexValidator {
        message: message.into(),
        severity,
        pattern: compiled,
    })
}

// =========================================================================
// Combined
// =========================================================================

/// Runs several validators and concatenates their results in order.
#[derive(Clone)]
pub struct CombinedValidator {
    validators: Vec<ValidatorRef>,
}

impl CombinedValidator {
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Validator for CombinedValidator {
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult {
        ValidationResult::combine_all(self.validators.iter().map(|v| v.validate(control, value)))
    }

    fn label(&self) -> &str {
        "combined"
    }
}

impl fmt::Debug for CombinedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = self.validators.iter().map(|v| v.label()).collect();
        f.debug_struct("CombinedValidator")
            .field("validators", &labels)
            .finish()
    }
}

/// Combine validators into one. Every validator always runs.
pub fn combine<I>(validators: I) -> CombinedValidator
where
    I: IntoIterator<Item = ValidatorRef>,
{
    CombinedValidator {
        validators: validators.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_controls_core::{Color, ControlKind, ValueControl};
    use std::sync::Arc;

    fn check(validator: &dyn Validator, control: &ValueControl) -> ValidationResult {
        validator.validate(control, &control.value())
    }

    #[test]
    fn test_empty_validator() {
        let required = empty_validator("Text is required");

        let field = ValueControl::new(ControlKind::TextField, "");
        let result = check(&required, &field);
        assert_eq!(result.len(), 1);
        assert_eq!(result.messages()[0].severity(), Severity::Error);
        assert_eq!(result.messages()[0].target(), field.id());

        field.set_value("x");
        assert!(check(&required, &field).is_empty());

        let list = ValueControl::new(ControlKind::ListView, Vec::<Value>::new());
        assert!(check(&required, &list).errors_present());
    }

    #[test]
    fn test_empty_validator_on_selection() {
        let required = empty_validator_with_severity("Pick one", Severity::Warning);
        let combo = ValueControl::with_options(ControlKind::ComboBox, ["Item A", "Item B"]);

        let result = check(&required, &combo);
        assert!(result.warnings_present());
        assert!(!result.errors_present());

        combo.select(Some(1));
        assert!(check(&required, &combo).is_empty());

        combo.select(None);
        assert_eq!(check(&required, &combo).len(), 1);
    }

    #[test]
    fn test_empty_validator_ignores_control_kind() {
        let required = empty_validator("Required");
        let combo = ValueControl::with_options(ControlKind::ComboBox, ["Item A"]);
        let field = ValueControl::new(ControlKind::TextField, "");

        for value in [Value::None, Value::from(""), Value::from("Item A")] {
            assert_eq!(
                required.validate(&combo, &value).len(),
                required.validate(&field, &value).len(),
                "value {value:?}"
            );
        }
    }

    #[test]
    fn test_equals_validator() {
        let only_red = equals_validator("Color should be RED", [Color::RED]);
        let picker = ValueControl::new(ControlKind::ColorPicker, Color::BLUE);

        assert!(check(&only_red, &picker).errors_present());
        picker.set_value(Color::RED);
        assert!(check(&only_red, &picker).is_empty());
        assert_eq!(only_red.allowed(), &[Value::from(Color::RED)]);
    }

    #[test]
    fn test_predicate_polarity() {
        let negative = predicate_validator_with_severity(
            "Should not be negative",
            Severity::Warning,
            |v: &Value| v.as_int().is_some_and(|n| n < 0),
        );
        let spinner = ValueControl::new(ControlKind::Slider, -1);

        assert!(check(&negative, &spinner).warnings_present());
        spinner.set_value(1);
        assert!(check(&negative, &spinner).is_empty());
    }

    #[test]
    fn test_regex_validator() {
        let digits = regex_validator("Digits only", r"^\d+$").unwrap();
        let field = ValueControl::new(ControlKind::TextField, "12a");

        assert!(check(&digits, &field).errors_present());
        field.set_value("123");
        assert!(check(&digits, &field).is_empty());
        field.set_value(Value::None);
        assert!(check(&digits, &field).errors_present());
        field.set_value(42);
        assert!(check(&digits, &field).is_empty());
        assert_eq!(digits.pattern(), r"^\d+$");
    }

    #[test]
    fn test_regex_validator_rejects_bad_pattern() {
        let err = regex_validator("never", "(unclosed").unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_combine_runs_every_validator() {
        let combined = combine([
            Arc::new(empty_validator("Required")) as ValidatorRef,
            Arc::new(regex_validator("Letters only", "^[a-z]+$").unwrap()),
            Arc::new(predicate_validator("Too short", |v: &Value| {
                v.as_text().is_some_and(|t| t.len() < 3)
            })),
        ]);
        let field = ValueControl::new(ControlKind::TextField, "");

        let texts: Vec<_> = check(&combined, &field)
            .messages()
            .iter()
            .map(|m| m.text().to_string())
            .collect();
        assert_eq!(texts, vec!["Required", "Letters only", "Too short"]);
        assert_eq!(combined.len(), 3);
    }
}
