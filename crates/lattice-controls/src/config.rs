//! Configuration for the property sheet and validation engine.
//!
//! Every field has a default, so a configuration document only needs to
//! name what it changes:
//!
//! ```
//! use lattice_controls::config::ControlsConfig;
//! use lattice_controls::property_sheet::Mode;
//!
//! let config = ControlsConfig::from_toml_str(
//!     r#"
//!     [sheet]
//!     mode = "grouped"
//!     toolbar_search_visible = false
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.sheet.mode, Mode::Grouped);
//! assert!(!config.sheet.toolbar_search_visible);
//! assert_eq!(config.sheet.min_column_width, 100.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::property_sheet::Mode;

/// Padding around a property pane, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Property sheet presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Initial display mode.
    pub mode: Mode,
    /// Minimum width of both the label and the editor column.
    pub min_column_width: f32,
    /// Vertical gap between rows.
    pub row_gap: f32,
    /// Horizontal gap between the label and editor columns.
    pub column_gap: f32,
    /// Padding around each pane.
    pub padding: Insets,
    /// Initial expansion of groups other than the first in grouped mode.
    pub groups_expanded: bool,
    /// Group key for items without a category.
    pub default_category: String,
    pub toolbar_visible: bool,
    pub toolbar_mode_visible: bool,
    pub toolbar_search_visible: bool,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Flat,
            min_column_width: 100.0,
            row_gap: 5.0,
            column_gap: 5.0,
            padding: Insets::new(5.0, 15.0, 5.0, 15.0),
            groups_expanded: true,
            default_category: "Other".to_string(),
            toolbar_visible: true,
            toolbar_mode_visible: true,
            toolbar_search_visible: true,
        }
    }
}

/// Validation engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Draw decorations on controls with messages.
    pub decorations_enabled: bool,
    /// Attach a control's messages as its decoration tooltip.
    pub tooltips_enabled: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            decorations_enabled: true,
            tooltips_enabled: true,
        }
    }
}

/// Combined configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub sheet: SheetConfig,
    pub validation: ValidationConfig,
}

impl ControlsConfig {
    /// Parse a TOML configuration document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = ControlsConfig::from_toml_str("").unwrap();
        assert_eq!(config, ControlsConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let config = ControlsConfig::from_toml_str(
            r#"
            [sheet]
            default_category = "General"
            groups_expanded = false

            [validation]
            tooltips_enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.sheet.default_category, "General");
        assert!(!config.sheet.groups_expanded);
        assert_eq!(config.sheet.mode, Mode::Flat);
        assert!(config.validation.decorations_enabled);
        assert!(!config.validation.tooltips_enabled);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = ControlsConfig::default();
        config.sheet.mode = Mode::Grouped;
        config.sheet.padding = Insets::new(1.0, 2.0, 3.0, 4.0);

        let text = config.to_toml_string().unwrap();
        assert_eq!(ControlsConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_document() {
        let err = ControlsConfig::from_toml_str("[sheet]\nmode = \"sideways\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
