//! Configuration loading for hexcoord CLI.
//!
//! Handles loading configuration from a JSON file in the home directory.

use hexcoord::HexcoordOptions;
use std::path::Path;
use tracing::warn;

const CONFIG_FILE_JSON: &str = "config.json";

/// Load HexcoordOptions from `config.json` in the given home directory.
///
/// Returns options with defaults if no config file is found or it cannot
/// be parsed. The home directory always comes from the caller.
pub fn load_config(home_dir: &Path) -> HexcoordOptions {
    let mut options = HexcoordOptions {
        home_dir: home_dir.to_path_buf(),
        ..HexcoordOptions::default()
    };

    if let Some(config) = try_load_json(home_dir) {
        options.listen_addr = config.listen_addr;
        if config.assets_dir.is_some() {
            options.assets_dir = config.assets_dir;
        }
    }

    options
}

fn try_load_json(home_dir: &Path) -> Option<HexcoordOptions> {
    let config_path = home_dir.join(CONFIG_FILE_JSON);
    if !config_path.exists() {
        return None;
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warn!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            );
            return None;
        }
    };

    match serde_json::from_str::<HexcoordOptions>(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            );
            None
        }
    }
}
