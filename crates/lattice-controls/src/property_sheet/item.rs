//! Property descriptors shown by a property sheet.

use std::fmt;
use std::sync::Arc;

use lattice_controls_core::{CoreError, ObservableProperty, TypeTag, Value};

use crate::error::Result;

/// A named, typed, categorized property.
///
/// The sheet holds items by `Arc` and never owns the values behind them:
/// `value` and `set_value` are accessors into whatever object the item
/// describes. Name, category and type are fixed for the item's lifetime.
pub trait Item: Send + Sync {
    /// The value type, used to pick an editor.
    fn type_tag(&self) -> TypeTag;

    /// The category used for grouping. `None` or empty means ungrouped.
    fn category(&self) -> Option<&str>;

    /// Display name; also what the filter matches against.
    fn name(&self) -> &str;

    /// Help text shown as the label's tooltip.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Read the current value.
    fn value(&self) -> Value;

    /// Write a new value.
    fn set_value(&self, value: Value);
}

/// Shared handle to an item.
pub type ItemRef = Arc<dyn Item>;

/// An item that owns its value.
///
/// # Example
///
/// ```
/// use lattice_controls::property_sheet::{Item, SimpleItem};
/// use lattice_controls_core::Value;
///
/// let age = SimpleItem::new("Age", 25)
///     .with_category("Personal")
///     .with_description("Age in whole years");
///
/// assert_eq!(age.category(), Some("Personal"));
/// age.set_value(Value::from(26));
/// assert_eq!(age.get_as::<i64>().unwrap(), 26);
/// ```
pub struct SimpleItem {
    name: String,
    category: Option<String>,
    description: Option<String>,
    type_tag: TypeTag,
    value: ObservableProperty<Value>,
}

impl SimpleItem {
    /// Create an item whose type is inferred from its initial value.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            category: None,
            description: None,
            type_tag: value.type_tag(),
            value: ObservableProperty::new(value),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the inferred type tag.
    pub fn with_type(mut self, type_tag: TypeTag) -> Self {
        self.type_tag = type_tag;
        self
    }

    /// Emitted after the value changes.
    pub fn value_changed(&self) -> &lattice_controls_core::Signal<Value> {
        &self.value.changed
    }

    /// Read the value as a concrete type.
    pub fn get_as<T>(&self) -> Result<T>
    where
        T: TryFrom<Value, Error = CoreError>,
    {
        Ok(T::try_from(self.value.get())?)
    }

    /// Wrap in an `Arc` for handing to a sheet.
    pub fn into_ref(self) -> ItemRef {
        Arc::new(self)
    }
}

impl Item for SimpleItem {
    fn type_tag(&self) -> TypeTag {
        self.type_tag.clone()
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn value(&self) -> Value {
        self.value.get()
    }

    fn set_value(&self, value: Value) {
        self.value.set(value);
    }
}

impl fmt::Debug for SimpleItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleItem")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("type", &self.type_tag)
            .field("value", &self.value.get())
            .finish()
    }
}
