//! Property editors and the factory that picks one per item.
//!
//! An editor is bound to a single [`Item`](super::Item). The sheet hands it
//! the item's value once per rebuild; editable editors push user edits back
//! to the item, while the fallback [`ObjectViewer`] only displays.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lattice_controls_core::{Property, TypeTag, Value};

use super::item::{Item, ItemRef};
use super::render::{EditorNode, EditorWidget};

/// A widget bound to one item's value.
pub trait PropertyEditor: Send + Sync {
    /// The item this editor is bound to.
    fn item(&self) -> &ItemRef;

    /// The value currently displayed.
    fn value(&self) -> Value;

    /// Display a value without touching the item. Called once per rebuild.
    fn bind(&self, value: Value);

    /// Apply a user edit. Editable editors write it to their item.
    fn set_value(&self, value: Value);

    /// Describe the editor for the render tree.
    fn as_node(&self) -> EditorNode;
}

/// Shared handle to an editor.
pub type EditorRef = Arc<dyn PropertyEditor>;

/// Wrap an editor in a shared handle.
pub fn editor_ref(editor: impl PropertyEditor + 'static) -> EditorRef {
    Arc::new(editor)
}

/// Picks an editor for an item.
///
/// Returning `None` makes the sheet fall back to an [`ObjectViewer`].
pub trait EditorFactory: Send + Sync {
    fn editor(&self, item: &ItemRef) -> Option<EditorRef>;
}

impl<F> EditorFactory for F
where
    F: Fn(&ItemRef) -> Option<EditorRef> + Send + Sync,
{
    fn editor(&self, item: &ItemRef) -> Option<EditorRef> {
        self(item)
    }
}

/// An editor backed by an input widget.
pub struct FieldEditor {
    item: ItemRef,
    widget: EditorWidget,
    display: Property<Value>,
}

impl FieldEditor {
    /// Create an editor of the given widget kind.
    pub fn new(item: ItemRef, widget: EditorWidget) -> Self {
        Self {
            item,
            widget,
            display: Property::new(Value::None),
        }
    }

    pub fn text_field(item: ItemRef) -> Self {
        Self::new(item, EditorWidget::TextField)
    }

    pub fn numeric_field(item: ItemRef) -> Self {
        Self::new(item, EditorWidget::NumericField)
    }

    pub fn check_box(item: ItemRef) -> Self {
        Self::new(item, EditorWidget::CheckBox)
    }

    pub fn color_picker(item: ItemRef) -> Self {
        Self::new(item, EditorWidget::ColorPicker)
    }
}

impl PropertyEditor for FieldEditor {
    fn item(&self) -> &ItemRef {
        &self.item
    }

    fn value(&self) -> Value {
        self.display.get()
    }

    fn bind(&self, value: Value) {
        self.display.set(value);
    }

    fn set_value(&self, value: Value) {
        self.display.set(value.clone());
        self.item.set_value(value);
    }

    fn as_node(&self) -> EditorNode {
        EditorNode::new(self.widget, self.display.get(), true)
    }
}

impl fmt::Debug for FieldEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEditor")
            .field("item", &self.item.name())
            .field("widget", &self.widget)
            .field("value", &self.display.get())
            .finish()
    }
}

/// Read-only fallback editor showing a value's text form.
///
/// Never writes to its item.
pub struct ObjectViewer {
    item: ItemRef,
    display: Property<Value>,
}

impl ObjectViewer {
    pub fn new(item: ItemRef) -> Self {
        Self {
            item,
            display: Property::new(Value::None),
        }
    }
}

impl PropertyEditor for ObjectViewer {
    fn item(&self) -> &ItemRef {
        &self.item
    }

    fn value(&self) -> Value {
        self.display.get()
    }

    fn bind(&self, value: Value) {
        self.display.set(value);
    }

    fn set_value(&self, value: Value) {
        self.bind(value);
    }

    fn as_node(&self) -> EditorNode {
        EditorNode::new(EditorWidget::Viewer, self.display.get(), false)
    }
}

impl fmt::Debug for ObjectViewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectViewer")
            .field("item", &self.item.name())
            .field("value", &self.display.get())
            .finish()
    }
}

/// Constructor registered for a type tag.
pub type EditorConstructor = Arc<dyn Fn(ItemRef) -> EditorRef + Send + Sync>;

/// Type-tag keyed editor registry with an [`ObjectViewer`] fallback.
///
/// # Example
///
/// ```
/// use lattice_controls::property_sheet::{
///     DefaultEditorFactory, EditorFactory, EditorWidget, FieldEditor, SimpleItem, editor_ref,
/// };
/// use lattice_controls_core::TypeTag;
///
/// let mut factory = DefaultEditorFactory::new();
/// factory.register(TypeTag::custom("path"), |item| editor_ref(FieldEditor::text_field(item)));
///
/// let item = SimpleItem::new("Home", "/home").with_type(TypeTag::custom("path")).into_ref();
/// let editor = factory.editor(&item).unwrap();
/// assert_eq!(editor.as_node().widget, EditorWidget::TextField);
/// ```
#[derive(Clone)]
pub struct DefaultEditorFactory {
    constructors: HashMap<TypeTag, EditorConstructor>,
}

impl DefaultEditorFactory {
    /// Create a factory with editors for the built-in value types.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory
            .register(TypeTag::Text, |item| editor_ref(FieldEditor::text_field(item)))
            .register(TypeTag::Integer, |item| editor_ref(FieldEditor::numeric_field(item)))
            .register(TypeTag::Float, |item| editor_ref(FieldEditor::numeric_field(item)))
            .register(TypeTag::Boolean, |item| editor_ref(FieldEditor::check_box(item)))
            .register(TypeTag::Color, |item| editor_ref(FieldEditor::color_picker(item)));
        factory
    }

    /// Create a factory that resolves every item to the fallback viewer.
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor for a type tag.
    pub fn register<F>(&mut self, type_tag: TypeTag, constructor: F) -> &mut Self
    where
        F: Fn(ItemRef) -> EditorRef + Send + Sync + 'static,
    {
        self.constructors.insert(type_tag, Arc::new(constructor));
        self
    }

    /// Remove the constructor for a type tag.
    pub fn unregister(&mut self, type_tag: &TypeTag) -> bool {
        self.constructors.remove(type_tag).is_some()
    }

    /// Whether a specific editor exists for the tag.
    pub fn supports(&self, type_tag: &TypeTag) -> bool {
        self.constructors.contains_key(type_tag)
    }
}

impl Default for DefaultEditorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorFactory for DefaultEditorFactory {
    fn editor(&self, item: &ItemRef) -> Option<EditorRef> {
        let editor = match self.constructors.get(&item.type_tag()) {
            Some(constructor) => constructor(item.clone()),
            None => editor_ref(ObjectViewer::new(item.clone())),
        };
        Some(editor)
    }
}

impl fmt::Debug for DefaultEditorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.constructors.keys().map(TypeTag::name).collect();
        tags.sort_unstable();
        f.debug_struct("DefaultEditorFactory")
            .field("types", &tags)
            .finish()
    }
}

/// Resolve an item's editor, substituting the viewer when the factory has none.
pub(crate) fn resolve_editor(factory: &dyn EditorFactory, item: &ItemRef) -> EditorRef {
    factory
        .editor(item)
        .unwrap_or_else(|| editor_ref(ObjectViewer::new(item.clone())))
}
