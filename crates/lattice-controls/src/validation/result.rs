//! Immutable snapshots of validation messages.

use lattice_controls_core::ControlId;

use super::message::{Severity, ValidationMessage};

/// An ordered, immutable set of validation messages.
///
/// Results are never edited in place; combining two results yields a new
/// one. The presence flags are computed once on construction.
///
/// # Example
///
/// ```
/// use lattice_controls::validation::ValidationResult;
/// use lattice_controls_core::ControlId;
///
/// let id = ControlId::next();
/// let result = ValidationResult::from_error_if(id, "Value should be > 0", -10 <= 0)
///     .combine(&ValidationResult::from_warning(id, "Value is unusual"));
///
/// assert!(result.errors_present());
/// assert!(result.warnings_present());
/// assert_eq!(result.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    messages: Vec<ValidationMessage>,
    errors_present: bool,
    warnings_present: bool,
}

impl ValidationResult {
    /// Create a result holding `messages` in order.
    pub fn new<I>(messages: I) -> Self
    where
        I: IntoIterator<Item = ValidationMessage>,
    {
        let messages: Vec<_> = messages.into_iter().collect();
        let errors_present = messages.iter().any(|m| m.severity() == Severity::Error);
        let warnings_present = messages.iter().any(|m| m.severity() == Severity::Warning);
        Self {
            messages,
            errors_present,
            warnings_present,
        }
    }

    /// A result with no messages.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_message(message: ValidationMessage) -> Self {
        Self::new([message])
    }

    pub fn from_error(target: ControlId, text: impl Into<String>) -> Self {
        Self::from_message(ValidationMessage::error(target, text))
    }

    pub fn from_warning(target: ControlId, text: impl Into<String>) -> Self {
        Self::from_message(ValidationMessage::warning(target, text))
    }

    /// An error result when `condition` holds, otherwise empty.
    pub fn from_error_if(target: ControlId, text: impl Into<String>, condition: bool) -> Self {
        if condition {
            Self::from_error(target, text)
        } else {
            Self::empty()
        }
    }

    /// A warning result when `condition` holds, otherwise empty.
    pub fn from_warning_if(target: ControlId, text: impl Into<String>, condition: bool) -> Self {
        if condition {
            Self::from_warning(target, text)
        } else {
            Self::empty()
        }
    }

    /// A new result with this result's messages followed by `other`'s.
    pub fn combine(&self, other: &ValidationResult) -> Self {
        Self::new(self.messages.iter().chain(&other.messages).cloned())
    }

    /// Concatenate results in order.
    pub fn combine_all<I>(results: I) -> Self
    where
        I: IntoIterator<Item = ValidationResult>,
    {
        Self::new(results.into_iter().flat_map(|r| r.messages))
    }

    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    pub fn errors_present(&self) -> bool {
        self.errors_present
    }

    pub fn warnings_present(&self) -> bool {
        self.warnings_present
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| m.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(|m| m.severity() == Severity::Warning)
    }

    /// Messages about one control.
    pub fn messages_for(&self, target: ControlId) -> impl Iterator<Item = &ValidationMessage> {
        self.messages.iter().filter(move |m| m.target() == target)
    }

    /// The first error, or failing that the first warning.
    pub fn highest_message(&self) -> Option<&ValidationMessage> {
        self.errors().next().or_else(|| self.warnings().next())
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

impl FromIterator<ValidationMessage> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationMessage>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a ValidationMessage;
    type IntoIter = std::slice::Iter<'a, ValidationMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// Collects conditional messages about one control.
///
/// Each condition is a closure that is evaluated immediately; a message is
/// added when it returns `true`.
///
/// ```
/// use lattice_controls::validation::ValidationResultBuilder;
/// use lattice_controls_core::ControlId;
///
/// let checked = false;
/// let result = ValidationResultBuilder::new(ControlId::next())
///     .add_error_if("Checkbox should be checked", || !checked)
///     .add_warning_if("Never reached", || false)
///     .build();
///
/// assert_eq!(result.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ValidationResultBuilder {
    target: ControlId,
    messages: Vec<ValidationMessage>,
}

impl ValidationResultBuilder {
    pub fn new(target: ControlId) -> Self {
        Self {
            target,
            messages: Vec::new(),
        }
    }

    pub fn add_error(mut self, text: impl Into<String>) -> Self {
        self.messages.push(ValidationMessage::error(self.target, text));
        self
    }

    pub fn add_warning(mut self, text: impl Into<String>) -> Self {
        self.messages.push(ValidationMessage::warning(self.target, text));
        self
    }

    pub fn add_error_if<F>(self, text: impl Into<String>, condition: F) -> Self
    where
        F: FnOnce() -> bool,
    {
        if condition() { self.add_error(text) } else { self }
    }

    pub fn add_warning_if<F>(self, text: impl Into<String>, condition: F) -> Self
    where
        F: FnOnce() -> bool,
    {
        if condition() { self.add_warning(text) } else { self }
    }

    pub fn build(self) -> ValidationResult {
        ValidationResult::new(self.messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_follow_messages() {
        let id = ControlId::next();

        let empty = ValidationResult::empty();
        assert!(!empty.errors_present());
        assert!(!empty.warnings_present());
        assert!(empty.highest_message().is_none());

        let warning = ValidationResult::from_warning(id, "w");
        assert!(!warning.errors_present());
        assert!(warning.warnings_present());

        let error = ValidationResult::from_error(id, "e");
        assert!(error.errors_present());
        assert!(!error.warnings_present());
    }

    #[test]
    fn test_conditional_constructors() {
        let id = ControlId::next();
        assert!(ValidationResult::from_error_if(id, "e", false).is_empty());
        assert_eq!(ValidationResult::from_warning_if(id, "w", true).len(), 1);
    }

    #[test]
    fn test_combine_preserves_order() {
        let a = ControlId::next();
        let b = ControlId::next();
        let combined = ValidationResult::combine_all([
            ValidationResult::from_warning(a, "first"),
            ValidationResult::empty(),
            ValidationResult::from_error(b, "second"),
            ValidationResult::from_error(a, "third"),
        ]);

        let texts: Vec<_> = combined.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);

        let for_a: Vec<_> = combined.messages_for(a).map(|m| m.text()).collect();
        assert_eq!(for_a, vec!["first", "third"]);

        assert_eq!(combined.highest_message().unwrap().text(), "second");
        assert_eq!(combined.errors().count(), 2);
        assert_eq!(combined.warnings().count(), 1);
    }

    #[test]
    fn test_combine_does_not_touch_inputs() {
        let id = ControlId::next();
        let left = ValidationResult::from_error(id, "left");
        let right = ValidationResult::from_warning(id, "right");

        let combined = left.combine(&right);

        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);
        assert_eq!(combined.len(), 2);
    }

    #[test]
    fn test_builder_polarity() {
        let id = ControlId::next();
        let slider = -10;
        let result = ValidationResultBuilder::new(id)
            .add_error_if("Slider value should be > 0", || slider <= 0)
            .add_error_if("Slider value should be < 100", || slider >= 100)
            .add_warning("Slider was moved")
            .build();

        let texts: Vec<_> = result.messages().iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["Slider value should be > 0", "Slider was moved"]);
        assert!(result.messages().iter().all(|m| m.target() == id));
    }
}
