//! Centralized simulation/display options with TOML preset support.
//!
//! All tweakable settings (camera, simulation sizing, display) are
//! consolidated here. Options serialize to/from TOML for view presets stored
//! in `assets/view_presets/`.

mod camera;
mod display;
mod simulation;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
use serde::{Deserialize, Serialize};
pub use simulation::SimulationOptions;

use crate::error::SwellError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Wave field and surface mesh sizing.
    pub simulation: SimulationOptions,
    /// Window and presentation settings.
    pub display: DisplayOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SwellError> {
        let content = std::fs::read_to_string(path).map_err(SwellError::Io)?;
        toml::from_str(&content)
            .map_err(|e| SwellError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SwellError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SwellError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SwellError::Io)?;
        }
        std::fs::write(path, content).map_err(SwellError::Io)
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
[camera]
fovy = 60.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.fovy, 60.0);
        // Everything else should be default
        assert_eq!(opts.camera.znear, 0.1);
        assert_eq!(opts.simulation.field_size, 256);
    }

    #[test]
    fn field_size_stays_workgroup_aligned_by_default() {
        let opts = SimulationOptions::default();
        assert_eq!(opts.field_size % 16, 0);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = std::env::temp_dir().join("swell_options_test");
        let path = dir.join("preset.toml");

        let mut opts = Options::default();
        opts.simulation.extent = 12.5;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(opts, loaded);

        assert_eq!(Options::list_presets(&dir), vec!["preset".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
