//! The validation engine.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lattice_controls_core::logging::targets;
use lattice_controls_core::{
    ConnectionId, Control, ControlId, Decoration, ObservableProperty, Property, Signal, Value,
};
use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use super::message::ValidationMessage;
use super::result::ValidationResult;
use super::validator::{Validator, ValidatorRef};
use crate::config::ValidationConfig;

new_key_type! {
    /// Identifies one validator attached to one control.
    pub struct RegistrationId;
}

/// Handle returned by [`ValidationSupport::register_validator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Registration {
    id: RegistrationId,
    control: ControlId,
}

impl Registration {
    pub fn id(&self) -> RegistrationId {
        self.id
    }

    /// The control the validator is attached to.
    pub fn control(&self) -> ControlId {
        self.control
    }
}

/// Shared handle to a control watched by the engine.
pub type ControlRef = Arc<dyn Control>;

struct Entry {
    id: ControlId,
    control: ControlRef,
    validators: Vec<(RegistrationId, ValidatorRef)>,
    last_result: ValidationResult,
    connection: ConnectionId,
}

struct Inner {
    /// Registry entries in registration order.
    entries: Mutex<Vec<Entry>>,
    registrations: Mutex<SlotMap<RegistrationId, ControlId>>,
    result: ObservableProperty<ValidationResult>,
    invalid: Property<bool>,
    invalid_changed: Signal<bool>,
    config: ValidationConfig,
    /// Number of validator runs in progress.
    running: AtomicUsize,
}

impl Inner {
    fn warn_if_reentrant(&self, operation: &'static str) {
        if self.running.load(Ordering::Acquire) > 0 {
            tracing::warn!(
                target: targets::VALIDATION,
                operation,
                "validation registry changed from inside a validator"
            );
        }
    }

    fn on_value_changed(&self, control: ControlId, value: &Value) {
        if self.validate_control(control, Some(value.clone())).is_some() {
            self.publish();
        }
    }

    /// Run every validator of one control and store the result.
    ///
    /// Returns `None` when the control is not registered. Locks are released
    /// while validators run.
    fn validate_control(
        &self,
        control: ControlId,
        value: Option<Value>,
    ) -> Option<ValidationResult> {
        let (target, validators) = {
            let entries = self.entries.lock();
            let entry = entries.iter().find(|e| e.id == control)?;
            let validators: Vec<ValidatorRef> =
                entry.validators.iter().map(|(_, v)| v.clone()).collect();
            (entry.control.clone(), validators)
        };
        let value = value.unwrap_or_else(|| target.value());

        self.running.fetch_add(1, Ordering::AcqRel);
        let result = ValidationResult::combine_all(
            validators
                .iter()
                .map(|validator| run_validator(validator.as_ref(), target.as_ref(), &value)),
        );
        self.running.fetch_sub(1, Ordering::AcqRel);

        let stored = {
            let mut entries = self.entries.lock();
            match entries.iter_mut().find(|e| e.id == control) {
                Some(entry) => {
                    entry.last_result = result.clone();
                    true
                }
                None => false,
            }
        };
        if stored {
            self.decorate(target.as_ref(), &result);
        }

        tracing::debug!(
            target: targets::VALIDATION,
            %control,
            validators = validators.len(),
            messages = result.len(),
            "validated control"
        );
        Some(result)
    }

    fn decorate(&self, control: &dyn Control, result: &ValidationResult) {
        if !self.config.decorations_enabled {
            return;
        }
        let decoration = Decoration::for_state(result.errors_present(), result.warnings_present());
        let tooltip = (self.config.tooltips_enabled && !result.is_empty()).then(|| {
            result
                .messages()
                .iter()
                .map(ValidationMessage::text)
                .collect::<Vec<_>>()
                .join("\n")
        });
        control.apply_decoration(decoration, tooltip.as_deref());
    }

    /// Rebuild the aggregate from every entry and install it wholesale.
    fn publish(&self) {
        let aggregate = {
            let entries = self.entries.lock();
            ValidationResult::combine_all(entries.iter().map(|e| e.last_result.clone()))
        };
        let invalid = aggregate.errors_present();

        tracing::trace!(
            target: targets::VALIDATION,
            messages = aggregate.len(),
            invalid,
            "publishing validation result"
        );
        self.result.publish(aggregate);
        if self.invalid.set(invalid) {
            self.invalid_changed.emit(invalid);
        }
    }
}

/// Run one validator, turning a panic into an error message.
fn run_validator(
    validator: &dyn Validator,
    control: &dyn Control,
    value: &Value,
) -> ValidationResult {
    match panic::catch_unwind(AssertUnwindSafe(|| validator.validate(control, value))) {
        Ok(result) => result,
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            tracing::error!(
                target: targets::VALIDATION,
                control = %control.id(),
                validator = validator.label(),
                %reason,
                "validator panicked"
            );
            ValidationResult::from_error(
                control.id(),
                format!("Validator '{}' failed", validator.label()),
            )
        }
    }
}

/// Attaches validators to controls and keeps an aggregate result.
///
/// Registering a validator validates its control at once and subscribes to
/// the control's value changes; each change re-runs that control's
/// validators only, then republishes the aggregate. The aggregate lists
/// controls in registration order and, within a control, validators in
/// registration order.
///
/// Controls stay registered until [`deregister`](Self::deregister) or until
/// the engine is dropped. A validator that panics is reported as an error on
/// its control and does not affect other validators.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use lattice_controls::validation::{ValidationSupport, empty_validator};
/// use lattice_controls_core::{ControlKind, Decoration, ValueControl};
///
/// let support = ValidationSupport::new();
/// let field = Arc::new(ValueControl::new(ControlKind::TextField, ""));
///
/// support.register_validator(field.clone(), empty_validator("Text is required"));
/// assert!(support.is_invalid());
/// assert_eq!(field.decoration(), Decoration::Error);
///
/// field.set_value("x");
/// assert!(support.result().is_empty());
/// assert_eq!(field.decoration(), Decoration::None);
/// ```
pub struct ValidationSupport {
    inner: Arc<Inner>,
}

impl ValidationSupport {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::with_config(ValidationConfig::default())
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(Vec::new()),
                registrations: Mutex::new(SlotMap::with_key()),
                result: ObservableProperty::new(ValidationResult::empty()),
                invalid: Property::new(false),
                invalid_changed: Signal::new(),
                config,
                running: AtomicUsize::new(0),
            }),
        }
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Attach a validator to a control.
    ///
    /// A second validator on the same control is added after the first.
    /// The control is validated immediately.
    pub fn register_validator<V>(&self, control: ControlRef, validator: V) -> Registration
    where
        V: Validator + 'static,
    {
        self.inner.warn_if_reentrant("register_validator");

        let id = control.id();
        let label = validator.label().to_string();
        let validator: ValidatorRef = Arc::new(validator);
        let registration_id = self.inner.registrations.lock().insert(id);

        {
            let mut entries = self.inner.entries.lock();
            match entries.iter_mut().find(|e| e.id == id) {
                Some(entry) => entry.validators.push((registration_id, validator)),
                None => {
                    let weak = Arc::downgrade(&self.inner);
                    let connection = control.value_changed().connect(move |value| {
                        if let Some(inner) = weak.upgrade() {
                            inner.on_value_changed(id, value);
                        }
                    });
                    entries.push(Entry {
                        id,
                        control,
                        validators: vec![(registration_id, validator)],
                        last_result: ValidationResult::empty(),
                        connection,
                    });
                }
            }
        }

        tracing::debug!(
            target: targets::VALIDATION,
            control = %id,
            validator = %label,
            "registered validator"
        );

        self.inner.validate_control(id, None);
        self.inner.publish();

        Registration {
            id: registration_id,
            control: id,
        }
    }

    /// Remove a control and all its validators.
    ///
    /// Clears the control's decoration and republishes the aggregate.
    /// Returns `false` if the control was not registered.
    pub fn deregister(&self, control: ControlId) -> bool {
        self.inner.warn_if_reentrant("deregister");

        let removed = {
            let mut entries = self.inner.entries.lock();
            entries
                .iter()
                .position(|e| e.id == control)
                .map(|index| entries.remove(index))
        };
        let Some(entry) = removed else {
            return false;
        };

        entry.control.value_changed().disconnect(entry.connection);
        self.inner
            .registrations
            .lock()
            .retain(|_, owner| *owner != control);
        if self.inner.config.decorations_enabled {
            entry.control.apply_decoration(Decoration::None, None);
        }

        tracing::debug!(target: targets::VALIDATION, %control, "deregistered control");
        self.inner.publish();
        true
    }

    /// Remove one validator and revalidate its control.
    ///
    /// Removing a control's last validator deregisters the control.
    pub fn deregister_validator(&self, registration: Registration) -> bool {
        self.inner.warn_if_reentrant("deregister_validator");

        let Some(control) = self.inner.registrations.lock().remove(registration.id) else {
            return false;
        };

        let now_empty = {
            let mut entries = self.inner.entries.lock();
            match entries.iter_mut().find(|e| e.id == control) {
                Some(entry) => {
                    entry.validators.retain(|(id, _)| *id != registration.id);
                    entry.validators.is_empty()
                }
                None => return false,
            }
        };

        if now_empty {
            return self.deregister(control);
        }
        self.inner.validate_control(control, None);
        self.inner.publish();
        true
    }

    pub fn is_registered(&self, control: ControlId) -> bool {
        self.inner.entries.lock().iter().any(|e| e.id == control)
    }

    /// Registered controls in registration order.
    pub fn registered_controls(&self) -> Vec<ControlId> {
        self.inner.entries.lock().iter().map(|e| e.id).collect()
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Re-run one control's validators against its current value.
    ///
    /// An unregistered control yields an empty result and changes nothing.
    pub fn validate(&self, control: ControlId) -> ValidationResult {
        match self.inner.validate_control(control, None) {
            Some(result) => {
                self.inner.publish();
                result
            }
            None => ValidationResult::empty(),
        }
    }

    /// Re-run every control's validators, then publish once.
    pub fn revalidate(&self) {
        for control in self.registered_controls() {
            self.inner.validate_control(control, None);
        }
        self.inner.publish();
    }

    // =========================================================================
    // Results
    // =========================================================================

    /// The current aggregate result.
    pub fn result(&self) -> ValidationResult {
        self.inner.result.get()
    }

    /// Emitted with every new aggregate, changed or not.
    pub fn result_changed(&self) -> &Signal<ValidationResult> {
        &self.inner.result.changed
    }

    /// The latest result for one control; empty if unregistered.
    pub fn result_for(&self, control: ControlId) -> ValidationResult {
        self.inner
            .entries
            .lock()
            .iter()
            .find(|e| e.id == control)
            .map(|e| e.last_result.clone())
            .unwrap_or_default()
    }

    /// The control's first error, or failing that its first warning.
    pub fn highest_message(&self, control: ControlId) -> Option<ValidationMessage> {
        self.result_for(control).highest_message().cloned()
    }

    /// Whether the aggregate holds any error.
    pub fn is_invalid(&self) -> bool {
        self.inner.invalid.get()
    }

    /// Emitted when [`is_invalid`](Self::is_invalid) flips.
    pub fn invalid_changed(&self) -> &Signal<bool> {
        &self.inner.invalid_changed
    }
}

impl Default for ValidationSupport {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ValidationSupport {
    fn drop(&mut self) {
        let entries = std::mem::take(&mut *self.inner.entries.lock());
        for entry in entries {
            entry.control.value_changed().disconnect(entry.connection);
            if self.inner.config.decorations_enabled {
                entry.control.apply_decoration(Decoration::None, None);
            }
        }
    }
}

impl fmt::Debug for ValidationSupport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationSupport")
            .field("controls", &self.registered_controls())
            .field("invalid", &self.is_invalid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::message::Severity;
    use crate::validation::validator::CustomValidator;
    use crate::validation::validators::{
        empty_validator, equals_validator_with_severity, predicate_validator,
        predicate_validator_with_severity,
    };
    use lattice_controls_core::{Color, ControlKind, ValueControl};
    use std::sync::atomic::AtomicBool;

    fn text_field(value: &str) -> Arc<ValueControl> {
        Arc::new(ValueControl::new(ControlKind::TextField, value))
    }

    fn counting(count: Arc<AtomicUsize>) -> impl Validator + 'static {
        CustomValidator::new(move |_: &dyn Control, _: &Value| {
            count.fetch_add(1, Ordering::SeqCst);
            ValidationResult::empty()
        })
    }

    fn texts(result: &ValidationResult) -> Vec<String> {
        result.messages().iter().map(|m| m.text().to_string()).collect()
    }

    #[test]
    fn test_register_validates_immediately() {
        let support = ValidationSupport::new();
        let field = text_field("");

        support.register_validator(field.clone(), empty_validator("Required"));

        let result = support.result();
        assert_eq!(result.len(), 1);
        assert_eq!(result.messages()[0].target(), field.id());
        assert!(support.is_invalid());

        field.set_value("x");
        assert!(support.result().is_empty());
        assert!(!support.is_invalid());
    }

    #[test]
    fn test_validators_are_additive_and_ordered() {
        let support = ValidationSupport::new();
        let field = text_field("");

        support.register_validator(field.clone(), empty_validator("Required"));
        support.register_validator(
            field.clone(),
            predicate_validator("Too short", |v: &Value| {
                v.as_text().is_some_and(|t| t.len() < 3)
            }),
        );
        assert_eq!(texts(&support.result()), vec!["Required", "Too short"]);

        field.set_value("ab");
        assert_eq!(texts(&support.result()), vec!["Too short"]);

        field.set_value("abc");
        assert!(support.result().is_empty());
    }

    #[test]
    fn test_change_revalidates_only_that_control() {
        let support = ValidationSupport::new();
        let first = text_field("a");
        let second = text_field("b");
        let first_runs = Arc::new(AtomicUsize::new(0));
        let second_runs = Arc::new(AtomicUsize::new(0));

        support.register_validator(first.clone(), counting(first_runs.clone()));
        support.register_validator(second.clone(), counting(second_runs.clone()));
        assert_eq!(first_runs.load(Ordering::SeqCst), 1);
        assert_eq!(second_runs.load(Ordering::SeqCst), 1);

        first.set_value("changed");

        assert_eq!(first_runs.load(Ordering::SeqCst), 2);
        assert_eq!(second_runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_aggregate_follows_registration_order() {
        let support = ValidationSupport::new();
        let first = text_field("");
        let second = text_field("");

        support.register_validator(first.clone(), empty_validator("first"));
        support.register_validator(second.clone(), empty_validator("second"));

        // A later change to the first control keeps it first.
        first.set_value("x");
        first.set_value("");
        assert_eq!(texts(&support.result()), vec!["first", "second"]);
    }

    #[test]
    fn test_result_published_on_every_recompute() {
        let support = ValidationSupport::new();
        let field = text_field("ok");
        let published = Arc::new(AtomicUsize::new(0));

        let published_clone = published.clone();
        support
            .result_changed()
            .connect(move |_| {
                published_clone.fetch_add(1, Ordering::SeqCst);
            });

        support.register_validator(field.clone(), empty_validator("Required"));
        field.set_value("still ok");
        support.validate(field.id());
        support.revalidate();

        assert_eq!(published.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_unregistered_control_is_a_no_op() {
        let support = ValidationSupport::new();
        let stray = text_field("");
        let published = Arc::new(AtomicUsize::new(0));

        let published_clone = published.clone();
        support.result_changed().connect(move |_| {
            published_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert!(support.validate(stray.id()).is_empty());
        assert!(support.result_for(stray.id()).is_empty());
        assert!(!support.deregister(stray.id()));
        assert_eq!(published.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_panicking_validator_is_isolated() {
        let support = ValidationSupport::new();
        let field = text_field("");
        let other = text_field("fine");

        support.register_validator(
            field.clone(),
            CustomValidator::new(|_: &dyn Control, _: &Value| -> ValidationResult {
                panic!("broken validator")
            })
            .with_label("broken"),
        );
        support.register_validator(field.clone(), empty_validator("Required"));
        support.register_validator(other.clone(), empty_validator("Required"));

        assert_eq!(
            texts(&support.result_for(field.id())),
            vec!["Validator 'broken' failed", "Required"]
        );
        assert!(support.result_for(other.id()).is_empty());
        assert_eq!(support.result().len(), 2);
    }

    #[test]
    fn test_decorations_follow_severity() {
        let support = ValidationSupport::new();
        let picker = Arc::new(ValueControl::new(ControlKind::ColorPicker, Color::BLUE));

        support.register_validator(
            picker.clone(),
            equals_validator_with_severity("Prefer RED", Severity::Warning, [Color::RED]),
        );
        assert_eq!(picker.decoration(), Decoration::Warning);
        assert_eq!(picker.tooltip().as_deref(), Some("Prefer RED"));
        assert!(!support.is_invalid());

        picker.set_value(Color::RED);
        assert_eq!(picker.decoration(), Decoration::None);
        assert_eq!(picker.tooltip(), None);
    }

    #[test]
    fn test_decorations_can_be_disabled() {
        let support = ValidationSupport::with_config(ValidationConfig {
            decorations_enabled: false,
            tooltips_enabled: true,
        });
        let field = text_field("");

        support.register_validator(field.clone(), empty_validator("Required"));

        assert!(support.is_invalid());
        assert_eq!(field.decoration(), Decoration::None);
    }

    #[test]
    fn test_deregister_stops_watching() {
        let support = ValidationSupport::new();
        let field = text_field("");
        let runs = Arc::new(AtomicUsize::new(0));

        support.register_validator(field.clone(), empty_validator("Required"));
        support.register_validator(field.clone(), counting(runs.clone()));
        assert_eq!(field.decoration(), Decoration::Error);

        assert!(support.deregister(field.id()));
        assert!(support.result().is_empty());
        assert!(!support.is_registered(field.id()));
        assert_eq!(field.decoration(), Decoration::None);
        assert_eq!(field.value_changed().connection_count(), 0);

        field.set_value("x");
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_deregister_single_validator() {
        let support = ValidationSupport::new();
        let field = text_field("");

        let required = support.register_validator(field.clone(), empty_validator("Required"));
        let short = support.register_validator(
            field.clone(),
            predicate_validator("Too short", |v: &Value| {
                v.as_text().is_some_and(|t| t.len() < 3)
            }),
        );
        assert_eq!(required.control(), field.id());

        assert!(support.deregister_validator(required));
        assert_eq!(texts(&support.result()), vec!["Too short"]);
        assert!(!support.deregister_validator(required));

        assert!(support.deregister_validator(short));
        assert!(!support.is_registered(field.id()));
    }

    #[test]
    fn test_invalid_changed_flips() {
        let support = ValidationSupport::new();
        let field = text_field("");
        let flips = Arc::new(Mutex::new(Vec::new()));

        let flips_clone = flips.clone();
        support
            .invalid_changed()
            .connect(move |&invalid| flips_clone.lock().push(invalid));

        support.register_validator(field.clone(), empty_validator("Required"));
        field.set_value("x");
        field.set_value("y");
        field.set_value("");

        assert_eq!(*flips.lock(), vec![true, false, true]);
    }

    #[test]
    fn test_highest_message_prefers_errors() {
        let support = ValidationSupport::new();
        let field = text_field("");

        support.register_validator(
            field.clone(),
            predicate_validator_with_severity("Looks empty", Severity::Warning, |v: &Value| {
                v.is_empty()
            }),
        );
        support.register_validator(field.clone(), empty_validator("Required"));

        let message = support.highest_message(field.id()).unwrap();
        assert_eq!(message.text(), "Required");
        assert_eq!(message.severity(), Severity::Error);
    }

    #[test]
    fn test_reentrant_registration_is_applied() {
        let support = Arc::new(ValidationSupport::new());
        let trigger = text_field("");
        let late = text_field("");
        let registered = Arc::new(AtomicBool::new(false));

        let support_clone = support.clone();
        let late_clone = late.clone();
        let registered_clone = registered.clone();
        support.register_validator(
            trigger.clone(),
            CustomValidator::new(move |_: &dyn Control, _: &Value| {
                if !registered_clone.swap(true, Ordering::SeqCst) {
                    support_clone.register_validator(late_clone.clone(), empty_validator("Late"));
                }
                ValidationResult::empty()
            }),
        );

        assert!(support.is_registered(late.id()));
        assert_eq!(texts(&support.result()), vec!["Late"]);
    }

    #[test]
    fn test_drop_disconnects_and_clears_controls() {
        let field = text_field("");
        {
            let support = ValidationSupport::new();
            support.register_validator(field.clone(), empty_validator("Required"));
            assert_eq!(field.value_changed().connection_count(), 1);
            assert_eq!(field.decoration(), Decoration::Error);
        }
        assert_eq!(field.value_changed().connection_count(), 0);
        assert_eq!(field.decoration(), Decoration::None);
        assert_eq!(field.tooltip(), None);
    }
}
