//! Persistent defaults for the contact map, stored as TOML.
//!
//! Every section uses `#[serde(default)]`, so a file that only overrides
//! `[render.thresholds]` is valid.

use crate::error::ContactMapError;
use crate::export::CSV_DISTANCE_CUTOFF;
use crate::render::RenderParams;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quiet period before a dragged threshold is applied, in milliseconds
    pub debounce_ms: u64,
    pub render: RenderParams,
    pub export: ExportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            render: RenderParams::default(),
            export: ExportSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Largest distance written to the pair table, in Å
    pub pair_cutoff: f64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            pair_cutoff: CSV_DISTANCE_CUTOFF,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file. Missing fields use defaults and
    /// out-of-range values are clamped.
    pub fn load(path: &Path) -> Result<Self, ContactMapError> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: Settings =
            toml::from_str(&content).map_err(|e| ContactMapError::Settings(e.to_string()))?;
        settings.render = settings.render.normalized();
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), ContactMapError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ContactMapError::Settings(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interactions::FilterCategory;
    use crate::render::{FilterState, Theme};

    #[test]
    fn test_partial_file() {
        let settings: Settings = toml::from_str(
            r#"
            [render]
            theme = "dark"

            [render.thresholds]
            contact = 6.0
            "#,
        )
        .unwrap();
        assert_eq!(settings.debounce_ms, 150);
        assert_eq!(settings.render.theme, Theme::Dark);
        assert_eq!(settings.render.thresholds.contact, 6.0);
        assert_eq!(settings.render.thresholds.proximal, 12.0);
        assert_eq!(settings.render.filter, FilterState::ShowAll);
        assert_eq!(settings.export.pair_cutoff, CSV_DISTANCE_CUTOFF);
    }

    #[test]
    fn test_save_and_load() {
        let mut settings = Settings::default();
        settings.debounce_ms = 80;
        settings.render.show_grid = true;
        settings.render.filter =
            FilterState::from_categories([FilterCategory::SaltBridge, FilterCategory::Hydrophobic]);

        let path = std::env::temp_dir()
            .join("resmap-settings-test")
            .join("settings.toml");
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(loaded.debounce(), Duration::from_millis(80));
    }

    #[test]
    fn test_load_clamps() {
        let path = std::env::temp_dir().join("resmap-settings-clamp.toml");
        std::fs::write(&path, "[render]\nscale = 99\n[render.thresholds]\ncontact = 1.0\n").unwrap();
        let loaded = Settings::load(&path).unwrap();
        // zoom is derived per structure, so a stored value is ignored
        assert_eq!(loaded.render.scale, crate::matrix::MIN_SCALE);
        assert_eq!(loaded.render.thresholds.contact, 3.0);
    }

    #[test]
    fn test_scale_not_saved() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        assert!(!text.contains("scale"));
        assert!(text.contains("show_grid"));
    }

    #[test]
    fn test_bad_file() {
        let path = std::env::temp_dir().join("resmap-settings-bad.toml");
        std::fs::write(&path, "debounce_ms = \"soon\"\n").unwrap();
        assert!(matches!(Settings::load(&path), Err(ContactMapError::Settings(_))));
    }
}
