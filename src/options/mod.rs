//! Picking options with TOML preset support.
//!
//! All tweakable settings (default pick modes, transparency thresholds,
//! click gesture tolerance) are consolidated here. Options serialize to/from
//! TOML so editor hosts can keep per-project presets.

mod input;
mod picking;
mod transparency;

use std::path::Path;

pub use input::InputOptions;
pub use picking::{PickModes, PickingOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use transparency::TransparencyOptions;

use crate::error::PickError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[transparency]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Defaults for click picks.
    pub picking: PickingOptions,
    /// Transparency classification thresholds.
    pub transparency: TransparencyOptions,
    /// Mouse gesture parameters.
    pub input: InputOptions,
}

impl Options {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, PickError> {
        toml::from_str(content)
            .map_err(|e| PickError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PickError> {
        let content = std::fs::read_to_string(path).map_err(PickError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PickError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PickError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PickError::Io)?;
        }
        std::fs::write(path, content).map_err(PickError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[transparency]
ui_visible_alpha = 0.5
";
        let opts = Options::from_toml_str(toml_str).unwrap();
        assert_eq!(opts.transparency.ui_visible_alpha, 0.5);
        // Everything else should be default
        assert_eq!(opts.transparency.transparent_queue_threshold, 3000);
        assert!(opts.picking.modes.renderers);
        assert!(!opts.picking.include_transparent);
        assert_eq!(opts.input.click_drag_threshold, 4.0);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml_str("[picking\nmodes = 3").unwrap_err();
        assert!(matches!(err, PickError::OptionsParse(_)));
    }

    #[test]
    fn relaxed_invisible_rule() {
        let t = TransparencyOptions::default();
        assert!(t.is_invisible_graphic(0.0, true));
        assert!(t.is_invisible_graphic(0.5, false));
        assert!(!t.is_invisible_graphic(0.5, true));
        assert!(!t.is_invisible_graphic(0.95, false));
        assert!(t.is_transparent_queue(3000));
        assert!(!t.is_transparent_queue(2450));
    }

    #[test]
    fn save_then_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("scenepick-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.picking.include_transparent = true;
        opts.save(&dir.join("faint.toml")).unwrap();
        Options::default().save(&dir.join("base.toml")).unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["base", "faint"]);
        assert_eq!(Options::load(&dir.join("faint.toml")).unwrap(), opts);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("picking"));
        assert!(props.contains_key("transparency"));
        assert!(props.contains_key("input"));

        let transparency = &props["transparency"]["properties"];
        assert!(transparency.get("ui_visible_alpha").is_some());
        assert!(transparency.get("transparent_queue_threshold").is_some());
    }
}
