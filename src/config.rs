//! Configuration handling for easel
//!
//! Window appearance and frame pacing live in a TOML file; a missing file is
//! replaced with defaults on first run. Everything here feeds the window
//! constructor once, none of it is re-read while the frame loop runs.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

/// Configuration for the window and frame loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// RGBA clear color used by `Canvas::clear`.
    pub background_color: [u8; 4],
    /// Best-effort frame rate; the loop sleeps 1000/fps ms per iteration
    /// with no drift compensation.
    pub target_fps: u32,
    /// Font file used by the demo for text drawing. Text is skipped when
    /// unset or unreadable.
    pub font_path: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "easel".to_string(),
            background_color: [255, 255, 255, 255],
            target_fps: 60,
            font_path: None,
        }
    }
}

impl WindowConfig {
    /// Get the path to the configuration file
    pub fn get_config_path() -> PathBuf {
        let config_dir = if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("easel")
        } else {
            PathBuf::from(".config/easel")
        };

        config_dir.join("config.toml")
    }

    /// Load configuration from file, writing out the defaults if no file
    /// exists yet.
    pub fn load_from_file() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(content) => {
                let config: Self = toml::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let default_config = Self::default();
                default_config.save_to_file()?;
                Ok(default_config)
            }
            Err(e) => Err(Box::new(e)),
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            if !Path::exists(parent) {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        Ok(())
    }

    /// Sleep between frame iterations for the configured rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.target_fps.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_give_sixty_fps_pacing() {
        let config = WindowConfig::default();
        assert_eq!(config.frame_duration(), Duration::from_millis(16));
        assert_eq!((config.width, config.height), (800, 600));
    }

    #[test]
    fn zero_fps_does_not_divide_by_zero() {
        let config = WindowConfig {
            target_fps: 0,
            ..Default::default()
        };
        assert_eq!(config.frame_duration(), Duration::from_millis(1000));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: WindowConfig = toml::from_str("width = 320\nheight = 240").unwrap();
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.title, "easel");
        assert_eq!(config.target_fps, 60);
    }
}
