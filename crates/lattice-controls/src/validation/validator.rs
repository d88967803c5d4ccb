//! The validator abstraction.

use std::fmt;
use std::sync::Arc;

use lattice_controls_core::{Control, Value};

use super::result::ValidationResult;

/// Checks a control's value.
///
/// A validator is a pure function of the control and the value being
/// checked; the same instance may be registered on any number of controls.
/// Messages it returns should target `control.id()`.
///
/// # Thread Safety
///
/// Validators must be `Send + Sync` to be shared between controls.
pub trait Validator: Send + Sync {
    /// Validate `value`, the control's new value.
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult;

    /// Short name used in logs and in the message reported when the
    /// validator panics.
    fn label(&self) -> &str {
        "validator"
    }
}

impl<V: Validator + ?Sized> Validator for Arc<V> {
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult {
        (**self).validate(control, value)
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult {
        (**self).validate(control, value)
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

/// Shared handle to a validator.
pub type ValidatorRef = Arc<dyn Validator>;

/// A validator backed by a closure.
///
/// # Example
///
/// ```
/// use lattice_controls::validation::{CustomValidator, ValidationResultBuilder, Validator};
/// use lattice_controls_core::{Control, ControlKind, ValueControl};
///
/// let checked = CustomValidator::new(|control, value| {
///     ValidationResultBuilder::new(control.id())
///         .add_error_if("Checkbox should be checked", || value.as_bool() != Some(true))
///         .build()
/// })
/// .with_label("checked");
///
/// let check_box = ValueControl::new(ControlKind::CheckBox, false);
/// assert!(checked.validate(&check_box, &check_box.value()).errors_present());
/// ```
pub struct CustomValidator<F>
where
    F: Fn(&dyn Control, &Value) -> ValidationResult + Send + Sync,
{
    validate_fn: F,
    label: String,
}

impl<F> CustomValidator<F>
where
    F: Fn(&dyn Control, &Value) -> ValidationResult + Send + Sync,
{
    /// Create a new custom validator with the given validation function.
    pub fn new(validate_fn: F) -> Self {
        Self {
            validate_fn,
            label: "custom validator".to_string(),
        }
    }

    /// Name the validator.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl<F> Validator for CustomValidator<F>
where
    F: Fn(&dyn Control, &Value) -> ValidationResult + Send + Sync,
{
    fn validate(&self, control: &dyn Control, value: &Value) -> ValidationResult {
        (self.validate_fn)(control, value)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl<F> fmt::Debug for CustomValidator<F>
where
    F: Fn(&dyn Control, &Value) -> ValidationResult + Send + Sync,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidator")
            .field("label", &self.label)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_controls_core::{ControlKind, ValueControl};

    fn positive() -> CustomValidator<impl Fn(&dyn Control, &Value) -> ValidationResult + Send + Sync>
    {
        CustomValidator::new(|control: &dyn Control, value: &Value| {
            ValidationResult::from_error_if(
                control.id(),
                "Value should be > 0",
                value.as_float().is_some_and(|v| v <= 0.0),
            )
        })
    }

    #[test]
    fn test_custom_validator() {
        let slider = ValueControl::new(ControlKind::Slider, -10.0);
        let validator = positive();

        let result = validator.validate(&slider, &Value::from(-10.0));
        assert!(result.errors_present());
        assert_eq!(result.messages()[0].target(), slider.id());

        assert!(validator.validate(&slider, &Value::from(10.0)).is_empty());
        assert_eq!(validator.label(), "custom validator");
    }

    #[test]
    fn test_shared_handles_delegate() {
        let slider = ValueControl::new(ControlKind::Slider, 0.0);
        let shared: ValidatorRef = Arc::new(positive().with_label("positive"));
        let boxed: Box<dyn Validator> = Box::new(shared.clone());

        assert_eq!(boxed.label(), "positive");
        assert_eq!(boxed.validate(&slider, &Value::from(0.0)).len(), 1);
    }
}
