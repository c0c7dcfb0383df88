//! Runtime configuration resource.
//!
//! Operator-tunable settings loaded from an INI configuration file. Provides
//! defaults for safe startup and a loader that keeps current values for any
//! missing key.
//!
//! # Configuration File Format
//!
//! ```ini
//! [schematics]
//! dir = ./schematics
//!
//! [lights]
//! restore_red = 255
//! restore_green = 255
//! restore_blue = 255
//! restore_alpha = 255
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::color::Rgba;

/// Default safe values for startup
const DEFAULT_SCHEMATICS_DIR: &str = "./schematics";
const DEFAULT_RESTORE_COLOR: Rgba = Rgba::WHITE;
const DEFAULT_CONFIG_PATH: &str = "./mapforge.ini";

/// Runtime configuration resource.
///
/// `restore_color` is the documented default pushed back onto every light a
/// controller overrode, at the moment the controller is removed.
#[derive(Resource, Debug, Clone)]
pub struct RuntimeConfig {
    /// Directory the hosting layer reads schematic files from.
    pub schematics_dir: PathBuf,
    /// Color lights are restored to when an override is removed.
    pub restore_color: Rgba,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            schematics_dir: PathBuf::from(DEFAULT_SCHEMATICS_DIR),
            restore_color: DEFAULT_RESTORE_COLOR,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        info!(
            "Loaded runtime config from {}: schematics dir {}",
            self.config_path.display(),
            self.schematics_dir.display()
        );
        Ok(())
    }

    /// Apply values from a parsed INI document over the current ones.
    pub fn apply(&mut self, config: &Ini) {
        // [schematics] section
        if let Some(dir) = config.get("schematics", "dir") {
            self.schematics_dir = PathBuf::from(dir);
        }

        // [lights] section
        if let Some(red) = config.getuint("lights", "restore_red").ok().flatten() {
            self.restore_color.r = red as u8;
        }
        if let Some(green) = config.getuint("lights", "restore_green").ok().flatten() {
            self.restore_color.g = green as u8;
        }
        if let Some(blue) = config.getuint("lights", "restore_blue").ok().flatten() {
            self.restore_color.b = blue as u8;
        }
        if let Some(alpha) = config.getuint("lights", "restore_alpha").ok().flatten() {
            self.restore_color.a = alpha as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::new();
        assert_eq!(config.schematics_dir, PathBuf::from(DEFAULT_SCHEMATICS_DIR));
        assert_eq!(config.restore_color, Rgba::WHITE);
    }

    #[test]
    fn test_apply_overrides_values() {
        let mut ini = Ini::new();
        ini.read(
            "[schematics]\ndir = /srv/maps\n\n[lights]\nrestore_red = 10\nrestore_green = 20\nrestore_blue = 30\n"
                .to_string(),
        )
        .unwrap();

        let mut config = RuntimeConfig::new();
        config.apply(&ini);
        assert_eq!(config.schematics_dir, PathBuf::from("/srv/maps"));
        assert_eq!(config.restore_color, Rgba::new(10, 20, 30, 255));
    }

    #[test]
    fn test_apply_keeps_missing_values() {
        let mut ini = Ini::new();
        ini.read("[lights]\nrestore_red = 0\n".to_string()).unwrap();

        let mut config = RuntimeConfig::new();
        config.apply(&ini);
        assert_eq!(config.restore_color, Rgba::new(0, 255, 255, 255));
        assert_eq!(config.schematics_dir, PathBuf::from(DEFAULT_SCHEMATICS_DIR));
    }
}
