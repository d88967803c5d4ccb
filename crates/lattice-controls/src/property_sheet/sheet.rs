//! The property sheet control.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use lattice_controls_core::logging::targets;
use lattice_controls_core::{Property, Signal};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::editor::{DefaultEditorFactory, EditorFactory};
use super::item::ItemRef;
use super::render::{RenderedSheet, SheetState, render};
use crate::config::SheetConfig;

/// How the sheet arranges its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One list in item order.
    #[default]
    Flat,
    /// One collapsible section per category, sorted by category.
    Grouped,
}

impl Mode {
    /// Every mode, in toolbar order.
    pub const ALL: [Mode; 2] = [Mode::Flat, Mode::Grouped];

    /// Label of the toolbar button selecting this mode.
    pub fn action_label(self) -> &'static str {
        match self {
            Mode::Flat => "By Name",
            Mode::Grouped => "By Category",
        }
    }
}

/// A control listing named properties with an editor for each.
///
/// Any change to the items, mode, filter, editor factory, toolbar flags or
/// group expansion rebuilds the render tree and emits [`rendered`]. Values
/// are read once per rebuild; call [`refresh`] after changing item values
/// behind the sheet's back.
///
/// [`rendered`]: PropertySheet::rendered
/// [`refresh`]: PropertySheet::refresh
///
/// # Example
///
/// ```
/// use lattice_controls::property_sheet::{Mode, PropertySheet, SimpleItem};
///
/// let sheet = PropertySheet::new();
/// sheet.set_items([
///     SimpleItem::new("Age", 25).with_category("Personal").into_ref(),
///     SimpleItem::new("Width", 120).with_category("Layout").into_ref(),
/// ]);
///
/// sheet.set_filter("ag");
/// assert_eq!(sheet.current().row_labels(), vec!["Age"]);
///
/// sheet.set_filter("");
/// sheet.set_mode(Mode::Grouped);
/// assert_eq!(sheet.current().row_labels(), vec!["Width", "Age"]);
/// ```
pub struct PropertySheet {
    items: RwLock<Vec<ItemRef>>,
    mode: Property<Mode>,
    filter: Property<String>,
    factory: RwLock<Arc<dyn EditorFactory>>,
    expansion: RwLock<HashMap<String, bool>>,
    config: RwLock<SheetConfig>,
    current: RwLock<Arc<RenderedSheet>>,

    /// Emitted with every new render tree.
    pub rendered: Signal<Arc<RenderedSheet>>,
    /// Emitted with the item count after the items are replaced.
    pub items_changed: Signal<usize>,
    /// Emitted when the display mode changes.
    pub mode_changed: Signal<Mode>,
    /// Emitted when the filter text changes.
    pub filter_changed: Signal<String>,
}

impl PropertySheet {
    /// Create an empty sheet with default settings.
    pub fn new() -> Self {
        Self::with_config(SheetConfig::default())
    }

    /// Create an empty sheet.
    pub fn with_config(config: SheetConfig) -> Self {
        let factory: Arc<dyn EditorFactory> = Arc::new(DefaultEditorFactory::new());
        let mode = config.mode;
        let initial = render(&SheetState {
            items: &[],
            mode,
            filter: "",
            factory: factory.as_ref(),
            expansion: &HashMap::new(),
            config: &config,
        });

        Self {
            items: RwLock::new(Vec::new()),
            mode: Property::new(mode),
            filter: Property::new(String::new()),
            factory: RwLock::new(factory),
            expansion: RwLock::new(HashMap::new()),
            config: RwLock::new(config),
            current: RwLock::new(Arc::new(initial)),
            rendered: Signal::new(),
            items_changed: Signal::new(),
            mode_changed: Signal::new(),
            filter_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// The items, in display order for flat mode.
    pub fn items(&self) -> Vec<ItemRef> {
        self.items.read().clone()
    }

    /// Replace the items.
    pub fn set_items<I>(&self, items: I)
    where
        I: IntoIterator<Item = ItemRef>,
    {
        let items: Vec<ItemRef> = items.into_iter().collect();
        let count = items.len();
        *self.items.write() = items;
        self.rebuild();
        self.items_changed.emit(count);
    }

    /// Append one item.
    pub fn add_item(&self, item: ItemRef) {
        let count = {
            let mut items = self.items.write();
            items.push(item);
            items.len()
        };
        self.rebuild();
        self.items_changed.emit(count);
    }

    /// Remove every item.
    pub fn clear_items(&self) {
        self.set_items(Vec::new());
    }

    // =========================================================================
    // Mode, filter, factory
    // =========================================================================

    pub fn mode(&self) -> Mode {
        self.mode.get()
    }

    /// Switch between flat and grouped display.
    ///
    /// Entering grouped mode discards expansion chosen earlier, so every
    /// group starts in its configured state with the first one open.
    pub fn set_mode(&self, mode: Mode) {
        if !self.mode.set(mode) {
            return;
        }
        if mode == Mode::Grouped {
            self.expansion.write().clear();
        }
        self.rebuild();
        self.mode_changed.emit(mode);
    }

    pub fn filter(&self) -> String {
        self.filter.get()
    }

    /// Show only items whose name contains `filter`, ignoring case.
    pub fn set_filter(&self, filter: impl Into<String>) {
        let filter = filter.into();
        if !self.filter.set(filter.clone()) {
            return;
        }
        self.rebuild();
        self.filter_changed.emit(filter);
    }

    /// Handle an edit in the toolbar's search field.
    pub fn search_text_changed(&self, text: &str) {
        self.set_filter(text);
    }

    pub fn editor_factory(&self) -> Arc<dyn EditorFactory> {
        self.factory.read().clone()
    }

    /// Replace the editor factory. `None` restores the default factory.
    pub fn set_editor_factory(&self, factory: Option<Arc<dyn EditorFactory>>) {
        let factory = factory.unwrap_or_else(|| Arc::new(DefaultEditorFactory::new()));
        *self.factory.write() = factory;
        self.rebuild();
    }

    // =========================================================================
    // Groups and toolbar
    // =========================================================================

    /// Expand or collapse one category's section.
    ///
    /// The choice lasts until the sheet next enters grouped mode.
    pub fn set_group_expanded(&self, category: impl Into<String>, expanded: bool) {
        let category = category.into();
        let previous = self.expansion.write().insert(category, expanded);
        if previous != Some(expanded) {
            self.rebuild();
        }
    }

    /// Whether a category's section is expanded in the current render.
    pub fn is_group_expanded(&self, category: &str) -> Option<bool> {
        self.current
            .read()
            .groups()
            .iter()
            .find(|group| group.title == category)
            .map(|group| group.expanded)
    }

    pub fn is_toolbar_visible(&self) -> bool {
        self.config.read().toolbar_visible
    }

    pub fn set_toolbar_visible(&self, visible: bool) {
        self.update_config(|config| &mut config.toolbar_visible, visible);
    }

    pub fn is_toolbar_mode_visible(&self) -> bool {
        self.config.read().toolbar_mode_visible
    }

    pub fn set_toolbar_mode_visible(&self, visible: bool) {
        self.update_config(|config| &mut config.toolbar_mode_visible, visible);
    }

    pub fn is_toolbar_search_visible(&self) -> bool {
        self.config.read().toolbar_search_visible
    }

    pub fn set_toolbar_search_visible(&self, visible: bool) {
        self.update_config(|config| &mut config.toolbar_search_visible, visible);
    }

    fn update_config<F>(&self, field: F, value: bool)
    where
        F: FnOnce(&mut SheetConfig) -> &mut bool,
    {
        let changed = {
            let mut config = self.config.write();
            let slot = field(&mut *config);
            std::mem::replace(slot, value) != value
        };
        if changed {
            self.rebuild();
        }
    }

    /// A copy of the sheet's settings.
    pub fn config(&self) -> SheetConfig {
        self.config.read().clone()
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// The current render tree.
    pub fn current(&self) -> Arc<RenderedSheet> {
        self.current.read().clone()
    }

    /// Rebuild from current state, picking up item values changed elsewhere.
    pub fn refresh(&self) {
        self.rebuild();
    }

    fn rebuild(&self) {
        // Snapshot under the locks, render without them: editor factories
        // and item accessors are foreign code.
        let items = self.items.read().clone();
        let mode = self.mode.get();
        let filter = self.filter.get();
        let factory = self.factory.read().clone();
        let expansion = self.expansion.read().clone();
        let config = self.config.read().clone();

        let sheet = Arc::new(render(&SheetState {
            items: &items,
            mode,
            filter: &filter,
            factory: factory.as_ref(),
            expansion: &expansion,
            config: &config,
        }));

        tracing::debug!(
            target: targets::PROPERTY_SHEET,
            items = items.len(),
            rows = sheet.editors().len(),
            ?mode,
            filter = %filter,
            "rebuilt property sheet"
        );

        *self.current.write() = sheet.clone();
        self.rendered.emit(sheet);
    }
}

impl Default for PropertySheet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PropertySheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertySheet")
            .field("items", &self.items.read().len())
            .field("mode", &self.mode.get())
            .field("filter", &self.filter.get())
            .finish()
    }
}
