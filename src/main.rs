//! Swell viewer binary: opens a window showing the animated wave surface.
//!
//! Usage: `swell [preset]` where `preset` is a TOML file path or the name of
//! a preset under `assets/view_presets/`.

use std::path::{Path, PathBuf};

use swell::options::Options;
use swell::Viewer;

/// Resolve a preset argument to a TOML path: either a file path, or the stem
/// of a preset under `assets/view_presets/`.
fn resolve_preset_path(input: &str) -> Result<PathBuf, String> {
    let direct = Path::new(input);
    if direct.exists() {
        return Ok(direct.to_path_buf());
    }

    let presets_dir = Path::new("assets/view_presets");
    let candidate = presets_dir.join(format!("{input}.toml"));
    if candidate.exists() {
        return Ok(candidate);
    }

    let available = Options::list_presets(presets_dir).join(", ");
    Err(format!(
        "Preset not found: {input} (available: {available})"
    ))
}

fn main() {
    env_logger::init();

    let mut builder = Viewer::builder().with_title("Swell");

    if let Some(arg) = std::env::args().nth(1) {
        let path = match resolve_preset_path(&arg) {
            Ok(path) => path,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        };
        match Options::load(&path) {
            Ok(options) => {
                log::info!("Loaded options from {}", path.display());
                builder = builder.with_options(options);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
