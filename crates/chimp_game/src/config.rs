use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chimp_platform::PlatformConfig;
use serde::Deserialize;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CHIMP_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "chimp.json";

pub const TITLE_NORWEGIAN: &str = "Treff apen!";
pub const TITLE_ENGLISH: &str = "Hit the monkey!";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub asset_dir: PathBuf,
    pub title_text: String,
    /// Font file inside `asset_dir`. `None` uses the bundled font.
    pub font_file: Option<String>,
    pub show_debug_overlay: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            title_text: TITLE_NORWEGIAN.to_string(),
            font_file: None,
            show_debug_overlay: false,
        }
    }
}

impl GameConfig {
    /// The window is fixed: 800x600, classic caption, cursor hidden.
    pub fn platform(&self) -> PlatformConfig {
        PlatformConfig::default()
    }

    pub fn screen_size(&self) -> (u32, u32) {
        let platform = self.platform();
        (platform.width, platform.height)
    }

    pub fn font_path(&self) -> Option<PathBuf> {
        self.font_file.as_ref().map(|name| self.asset_dir.join(name))
    }
}

/// Resolve the config file: `$CHIMP_CONFIG` if set, else `chimp.json`.
///
/// An explicitly named file must exist. The default file is optional and its
/// absence yields the built-in defaults.
pub fn load_config() -> Result<GameConfig, String> {
    match env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_config_from_path(Path::new(&path)),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                load_config_from_path(path)
            } else {
                log::info!("No {DEFAULT_CONFIG_FILE} found, using default config");
                Ok(GameConfig::default())
            }
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    log::info!("Loaded config from {}", path.display());
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.font_file.as_deref() == Some("") {
        return Err("Config validation failed: font_file is empty".to_string());
    }
    Ok(())
}
