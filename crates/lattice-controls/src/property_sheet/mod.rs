//! A control listing named properties with an editor for each.
//!
//! The sheet keeps an ordered collection of [`Item`]s, a display [`Mode`], a
//! name filter and an [`EditorFactory`]. Whenever any of them changes it
//! rebuilds a [`RenderedSheet`]: one label/editor row per visible item,
//! either as a single list or grouped into collapsible category sections.
//!
//! # Example
//!
//! ```
//! use lattice_controls::property_sheet::{EditorWidget, Mode, PropertySheet, SimpleItem};
//! use lattice_controls_core::Color;
//!
//! let sheet = PropertySheet::new();
//! sheet.set_items([
//!     SimpleItem::new("Title", "Quarterly report").with_category("General").into_ref(),
//!     SimpleItem::new("Background", Color::WHITE).with_category("Appearance").into_ref(),
//! ]);
//! sheet.set_mode(Mode::Grouped);
//!
//! let current = sheet.current();
//! assert_eq!(current.groups()[0].title, "Appearance");
//! assert_eq!(current.rows()[0].editor.widget, EditorWidget::ColorPicker);
//! ```

mod editor;
mod item;
mod render;
mod sheet;

pub use editor::{
    DefaultEditorFactory, EditorConstructor, EditorFactory, EditorRef, FieldEditor, ObjectViewer,
    PropertyEditor, editor_ref,
};
pub use item::{Item, ItemRef, SimpleItem};
pub use render::{
    CategoryGroup, EditorNode, EditorWidget, LabelNode, ModeButton, PropertyPane, PropertyRow,
    RenderedSheet, SearchField, SheetContent, SheetState, Stretch, Toolbar, category_key,
    matches_filter, render,
};
pub use sheet::{Mode, PropertySheet};
