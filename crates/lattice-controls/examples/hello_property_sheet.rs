//! Property sheet sample: lists a document's properties, then regroups and
//! filters them the way the toolbar would.
//!
//! Run with: cargo run -p lattice-controls --example hello_property_sheet
//!
//! An optional argument names a TOML configuration file:
//!
//! ```toml
//! [sheet]
//! mode = "grouped"
//! groups_expanded = false
//! ```

use std::sync::Arc;

use lattice_controls::config::ControlsConfig;
use lattice_controls::prelude::*;
use lattice_controls::property_sheet::{PropertyPane, SheetContent};
use tracing_subscriber::EnvFilter;

fn print_pane(pane: &PropertyPane, indent: &str) {
    for row in &pane.rows {
        let tooltip = row
            .label
            .tooltip
            .as_deref()
            .map(|t| format!("  ({t})"))
            .unwrap_or_default();
        println!(
            "{indent}{:<12} {:?} = {}{tooltip}",
            row.label.text, row.editor.widget, row.editor.text
        );
    }
}

fn print_sheet(sheet: &RenderedSheet) {
    if let Some(buttons) = &sheet.toolbar.mode_buttons {
        let labels: Vec<_> = buttons
            .iter()
            .map(|b| if b.selected { format!("[{}]", b.label) } else { b.label.clone() })
            .collect();
        print!("{}", labels.join(" "));
    }
    if let Some(search) = &sheet.toolbar.search {
        print!("  {}: {:?}", search.prompt, search.text);
    }
    println!();

    match &sheet.content {
        SheetContent::Flat(pane) => print_pane(pane, "  "),
        SheetContent::Grouped(groups) => {
            for group in groups {
                println!("  {} {}", if group.expanded { "v" } else { ">" }, group.title);
                if group.expanded {
                    print_pane(&group.pane, "    ");
                }
            }
        }
    }
    println!();
}

fn load_config() -> Result<ControlsConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(ControlsConfig::from_toml_str(&std::fs::read_to_string(path)?)?),
        None => Ok(ControlsConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config()?;
    let sheet = PropertySheet::with_config(config.sheet);

    let title = Arc::new(
        SimpleItem::new("Title", "Quarterly report")
            .with_category("General")
            .with_description("Shown in the window title"),
    );
    sheet.set_items([
        title.clone() as ItemRef,
        SimpleItem::new("Author", "Ann").with_category("General").into_ref(),
        SimpleItem::new("Pages", 12).with_category("Layout").into_ref(),
        SimpleItem::new("Margin", 2.5).with_category("Layout").into_ref(),
        SimpleItem::new("Background", Color::WHITE)
            .with_category("Appearance")
            .into_ref(),
        SimpleItem::new("Draft", true).with_category("Appearance").into_ref(),
        SimpleItem::new("Tags", vec!["finance", "q3"]).into_ref(),
    ]);

    title.value_changed().connect(|value| println!("title changed to {value:?}"));

    println!("By name:");
    print_sheet(&sheet.current());

    sheet.set_mode(Mode::Grouped);
    println!("By category:");
    print_sheet(&sheet.current());

    sheet.search_text_changed("a");
    println!("Filtered by \"a\":");
    print_sheet(&sheet.current());

    sheet.set_filter("");
    sheet.set_group_expanded("Layout", false);
    println!("Layout collapsed:");
    print_sheet(&sheet.current());

    // Edit through the rendered editor, as a user would.
    if let Some(editor) = sheet.current().editor_for("Title") {
        editor.set_value(Value::from("Annual report"));
    }
    sheet.refresh();
    print_sheet(&sheet.current());

    Ok(())
}
