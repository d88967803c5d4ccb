//! The property sheet's render tree and the pure function that builds it.
//!
//! [`render`] maps a [`SheetState`] snapshot to a [`RenderedSheet`]. It has no
//! side effects on the sheet; the only calls it makes outward are reading
//! item values and asking the editor factory for editors. A host skin mounts
//! the resulting tree however its toolkit lays out rows and columns.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use lattice_controls_core::Value;

use super::editor::{EditorFactory, EditorRef, resolve_editor};
use super::item::{Item, ItemRef};
use super::sheet::Mode;
use crate::config::{Insets, SheetConfig};

/// Widget family an editor renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorWidget {
    TextField,
    NumericField,
    CheckBox,
    ColorPicker,
    /// Read-only text display.
    Viewer,
}

/// How a column claims spare horizontal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stretch {
    #[default]
    Never,
    Always,
}

/// Visual description of an editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorNode {
    pub widget: EditorWidget,
    /// The value shown, read once when the tree was built.
    pub value: Value,
    /// The value's text form.
    pub text: String,
    pub editable: bool,
}

impl EditorNode {
    pub fn new(widget: EditorWidget, value: Value, editable: bool) -> Self {
        Self {
            widget,
            text: value.to_string(),
            value,
            editable,
        }
    }
}

/// A property's name label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelNode {
    pub text: String,
    /// The item's description, when it has a non-blank one.
    pub tooltip: Option<String>,
    pub min_width: f32,
}

/// One label/editor pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRow {
    /// Row index within the pane.
    pub row: usize,
    pub label: LabelNode,
    pub editor: EditorNode,
    pub editor_min_width: f32,
    pub editor_stretch: Stretch,
}

/// A two-column grid of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyPane {
    pub rows: Vec<PropertyRow>,
    pub row_gap: f32,
    pub column_gap: f32,
    pub padding: Insets,
}

/// A collapsible section holding one category's rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub title: String,
    pub expanded: bool,
    pub pane: PropertyPane,
}

/// The sheet body.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetContent {
    Flat(PropertyPane),
    /// Groups sorted by title; categories with no visible rows are omitted.
    Grouped(Vec<CategoryGroup>),
}

/// A toggle button selecting a display mode.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeButton {
    pub mode: Mode,
    pub label: String,
    pub selected: bool,
}

/// The search box feeding the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchField {
    pub prompt: String,
    pub text: String,
}

/// The strip above the sheet body.
#[derive(Debug, Clone, PartialEq)]
pub struct Toolbar {
    pub visible: bool,
    /// Present when the mode buttons are shown.
    pub mode_buttons: Option<Vec<ModeButton>>,
    /// Present when the search field is shown.
    pub search: Option<SearchField>,
}

/// A complete render of the sheet.
///
/// Equality compares the visual tree only; two renders of the same state are
/// equal even though each owns fresh editor instances.
#[derive(Clone)]
pub struct RenderedSheet {
    pub toolbar: Toolbar,
    pub content: SheetContent,
    editors: Vec<EditorRef>,
}

impl RenderedSheet {
    /// Editors in row order (group by group in grouped mode).
    pub fn editors(&self) -> &[EditorRef] {
        &self.editors
    }

    /// The editor bound to the first visible item with this name.
    pub fn editor_for(&self, name: &str) -> Option<&EditorRef> {
        self.editors.iter().find(|editor| editor.item().name() == name)
    }

    /// Every row, in display order.
    pub fn rows(&self) -> Vec<&PropertyRow> {
        match &self.content {
            SheetContent::Flat(pane) => pane.rows.iter().collect(),
            SheetContent::Grouped(groups) => {
                groups.iter().flat_map(|g| g.pane.rows.iter()).collect()
            }
        }
    }

    /// Labels of every row, in display order.
    pub fn row_labels(&self) -> Vec<&str> {
        self.rows().into_iter().map(|r| r.label.text.as_str()).collect()
    }

    /// Groups in grouped mode; empty in flat mode.
    pub fn groups(&self) -> &[CategoryGroup] {
        match &self.content {
            SheetContent::Flat(_) => &[],
            SheetContent::Grouped(groups) => groups,
        }
    }
}

impl PartialEq for RenderedSheet {
    fn eq(&self, other: &Self) -> bool {
        self.toolbar == other.toolbar && self.content == other.content
    }
}

impl fmt::Debug for RenderedSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedSheet")
            .field("toolbar", &self.toolbar)
            .field("content", &self.content)
            .field("editors", &self.editors.len())
            .finish()
    }
}

/// Everything a render depends on.
pub struct SheetState<'a> {
    pub items: &'a [ItemRef],
    pub mode: Mode,
    pub filter: &'a str,
    pub factory: &'a dyn EditorFactory,
    /// Per-category expansion chosen by the user since grouped mode began.
    pub expansion: &'a HashMap<String, bool>,
    pub config: &'a SheetConfig,
}

/// Whether `name` passes `filter`: trimmed, case-insensitive substring match.
/// A blank filter passes everything.
pub fn matches_filter(name: &str, filter: &str) -> bool {
    let filter = filter.trim();
    filter.is_empty() || name.to_lowercase().contains(&filter.to_lowercase())
}

/// The group key for an item.
pub fn category_key<'a>(item: &'a dyn Item, config: &'a SheetConfig) -> &'a str {
    match item.category() {
        Some(category) if !category.is_empty() => category,
        _ => &config.default_category,
    }
}

/// Build the render tree for a state snapshot.
pub fn render(state: &SheetState<'_>) -> RenderedSheet {
    let mut editors = Vec::new();
    let visible: Vec<&ItemRef> = state
        .items
        .iter()
        .filter(|item| matches_filter(item.name(), state.filter))
        .collect();

    let content = match state.mode {
        Mode::Flat => SheetContent::Flat(build_pane(state, &visible, &mut editors)),
        Mode::Grouped => {
            let mut categories: BTreeMap<&str, Vec<&ItemRef>> = BTreeMap::new();
            for &item in &visible {
                categories
                    .entry(category_key(&**item, state.config))
                    .or_default()
                    .push(item);
            }

            let groups = categories
                .into_iter()
                .enumerate()
                .map(|(index, (title, items))| {
                    let expanded = state
                        .expansion
                        .get(title)
                        .copied()
                        .unwrap_or(index == 0 || state.config.groups_expanded);
                    CategoryGroup {
                        title: title.to_string(),
                        expanded,
                        pane: build_pane(state, &items, &mut editors),
                    }
                })
                .collect();
            SheetContent::Grouped(groups)
        }
    };

    RenderedSheet {
        toolbar: build_toolbar(state),
        content,
        editors,
    }
}

fn build_pane(
    state: &SheetState<'_>,
    items: &[&ItemRef],
    editors: &mut Vec<EditorRef>,
) -> PropertyPane {
    let config = state.config;

    let rows = items
        .iter()
        .enumerate()
        .map(|(row, item)| {
            let tooltip = item
                .description()
                .filter(|d| !d.trim().is_empty())
                .map(str::to_string);

            let editor = resolve_editor(state.factory, item);
            editor.bind(item.value());
            let node = editor.as_node();
            editors.push(editor);

            PropertyRow {
                row,
                label: LabelNode {
                    text: item.name().to_string(),
                    tooltip,
                    min_width: config.min_column_width,
                },
                editor: node,
                editor_min_width: config.min_column_width,
                editor_stretch: Stretch::Always,
            }
        })
        .collect();

    PropertyPane {
        rows,
        row_gap: config.row_gap,
        column_gap: config.column_gap,
        padding: config.padding,
    }
}

fn build_toolbar(state: &SheetState<'_>) -> Toolbar {
    let config = state.config;
    let mode_buttons = config.toolbar_mode_visible.then(|| {
        Mode::ALL
            .iter()
            .map(|&mode| ModeButton {
                mode,
                label: mode.action_label().to_string(),
                selected: mode == state.mode,
            })
            .collect()
    });
    let search = config.toolbar_search_visible.then(|| SearchField {
        prompt: "Search".to_string(),
        text: state.filter.to_string(),
    });

    Toolbar {
        visible: config.toolbar_visible,
        mode_buttons,
        search,
    }
}
