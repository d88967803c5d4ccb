//! Host-toolkit control abstraction.
//!
//! The engines never own widgets. They see a control through the [`Control`]
//! trait: an identity, a current value, a change notification, and a hook for
//! drawing a validation decoration. [`ValueControl`] is an in-memory
//! implementation used by tests, samples, and headless hosts.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::logging::targets;
use crate::property::Property;
use crate::signal::Signal;
use crate::value::Value;

static NEXT_CONTROL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(u64);

impl ControlId {
    /// Allocate a fresh identifier.
    pub fn next() -> Self {
        Self(NEXT_CONTROL_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "control#{}", self.0)
    }
}

/// The widget family a control belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    TextField,
    ComboBox,
    ChoiceBox,
    CheckBox,
    Slider,
    ColorPicker,
    ListView,
}

impl ControlKind {
    /// Whether the control's value is a choice among options.
    pub fn is_selection(self) -> bool {
        matches!(self, Self::ComboBox | Self::ChoiceBox | Self::ListView)
    }
}

/// Visual flag drawn on a control according to its validation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Decoration {
    /// No messages; the control is drawn normally.
    #[default]
    None,
    /// Only warnings.
    Warning,
    /// At least one error.
    Error,
}

impl Decoration {
    /// Map a control's message state to its decoration. Errors dominate.
    pub fn for_state(has_errors: bool, has_warnings: bool) -> Self {
        match (has_errors, has_warnings) {
            (true, _) => Self::Error,
            (false, true) => Self::Warning,
            (false, false) => Self::None,
        }
    }

    /// Style class a skin can attach for this decoration.
    pub fn style_class(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Warning => Some("warning"),
            Self::Error => Some("error"),
        }
    }
}

/// A widget the engines can observe and decorate.
pub trait Control: Send + Sync {
    /// The control's identity.
    fn id(&self) -> ControlId;

    /// The widget family.
    fn kind(&self) -> ControlKind;

    /// The control's current value.
    fn value(&self) -> Value;

    /// Emitted with the new value whenever the control's value changes.
    fn value_changed(&self) -> &Signal<Value>;

    /// Draw (or clear) a validation decoration.
    ///
    /// `tooltip` carries the control's messages, one per line, when the host
    /// should show them on hover. The default implementation ignores
    /// decorations.
    fn apply_decoration(&self, _decoration: Decoration, _tooltip: Option<&str>) {}
}

/// An observable control backed by a [`Property`].
///
/// # Example
///
/// ```
/// use lattice_controls_core::{Control, ControlKind, ValueControl, Value};
///
/// let field = ValueControl::new(ControlKind::TextField, "");
/// field.value_changed().connect(|v| println!("now {v}"));
/// field.set_value("hello");
/// assert_eq!(field.value(), Value::from("hello"));
/// ```
pub struct ValueControl {
    id: ControlId,
    kind: ControlKind,
    value: Property<Value>,
    options: Vec<Value>,
    decoration: Property<Decoration>,
    tooltip: Property<Option<String>>,
    value_changed: Signal<Value>,
    /// Emitted when the decoration drawn on this control changes.
    pub decoration_changed: Signal<Decoration>,
}

impl ValueControl {
    /// Create a control holding an initial value.
    pub fn new(kind: ControlKind, value: impl Into<Value>) -> Self {
        Self {
            id: ControlId::next(),
            kind,
            value: Property::new(value.into()),
            options: Vec::new(),
            decoration: Property::new(Decoration::None),
            tooltip: Property::new(None),
            value_changed: Signal::new(),
            decoration_changed: Signal::new(),
        }
    }

    /// Create a selection control over `options` with nothing selected.
    pub fn with_options<I, V>(kind: ControlKind, options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut control = Self::new(kind, Value::None);
        control.options = options.into_iter().map(Into::into).collect();
        control
    }

    /// The selectable options (empty for non-selection controls).
    pub fn options(&self) -> &[Value] {
        &self.options
    }

    /// Set the value, notifying observers if it changed.
    pub fn set_value(&self, value: impl Into<Value>) {
        let value = value.into();
        if self.value.set(value.clone()) {
            tracing::trace!(target: targets::CONTROL, control = %self.id, "value changed");
            self.value_changed.emit(value);
        }
    }

    /// Select the option at `index`, or clear the selection with `None`.
    ///
    /// An out-of-range index clears the selection.
    pub fn select(&self, index: Option<usize>) {
        let value = index
            .and_then(|i| self.options.get(i).cloned())
            .unwrap_or(Value::None);
        self.set_value(value);
    }

    /// The decoration currently drawn on the control.
    pub fn decoration(&self) -> Decoration {
        self.decoration.get()
    }

    /// The tooltip currently attached by the decoration, if any.
    pub fn tooltip(&self) -> Option<String> {
        self.tooltip.get()
    }
}

impl Control for ValueControl {
    fn id(&self) -> ControlId {
        self.id
    }

    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn value(&self) -> Value {
        self.value.get()
    }

    fn value_changed(&self) -> &Signal<Value> {
        &self.value_changed
    }

    fn apply_decoration(&self, decoration: Decoration, tooltip: Option<&str>) {
        self.tooltip.set(tooltip.map(str::to_string));
        if self.decoration.set(decoration) {
            self.decoration_changed.emit(decoration);
        }
    }
}

impl fmt::Debug for ValueControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueControl")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("value", &self.value.get())
            .field("decoration", &self.decoration.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_control_ids_are_unique() {
        let a = ValueControl::new(ControlKind::TextField, "");
        let b = ValueControl::new(ControlKind::TextField, "");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_value_changed_fires_only_on_change() {
        let field = ValueControl::new(ControlKind::Slider, -10.0);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        field
            .value_changed()
            .connect(move |v| seen_clone.lock().push(v.clone()));

        field.set_value(-10.0);
        field.set_value(10.0);

        assert_eq!(*seen.lock(), vec![Value::from(10.0)]);
    }

    #[test]
    fn test_selection() {
        let combo = ValueControl::with_options(ControlKind::ComboBox, ["Item A", "Item B"]);
        assert!(combo.kind().is_selection());
        assert_eq!(combo.value(), Value::None);

        combo.select(Some(1));
        assert_eq!(combo.value(), Value::from("Item B"));

        combo.select(Some(7));
        assert_eq!(combo.value(), Value::None);
    }

    #[test]
    fn test_decoration_mapping() {
        assert_eq!(Decoration::for_state(false, false), Decoration::None);
        assert_eq!(Decoration::for_state(false, true), Decoration::Warning);
        assert_eq!(Decoration::for_state(true, false), Decoration::Error);
        assert_eq!(Decoration::for_state(true, true), Decoration::Error);
        assert_eq!(Decoration::Error.style_class(), Some("error"));
    }

    #[test]
    fn test_apply_decoration() {
        let field = ValueControl::new(ControlKind::TextField, "");
        let count = Arc::new(Mutex::new(0));

        let count_clone = count.clone();
        field.decoration_changed.connect(move |_| *count_clone.lock() += 1);

        field.apply_decoration(Decoration::Error, Some("Text is required"));
        field.apply_decoration(Decoration::Error, Some("Text is required"));
        assert_eq!(field.decoration(), Decoration::Error);
        assert_eq!(field.tooltip().as_deref(), Some("Text is required"));
        assert_eq!(*count.lock(), 1);

        field.apply_decoration(Decoration::None, None);
        assert_eq!(field.tooltip(), None);
    }
}
