//! User configuration
//!
//! Read once at startup from `config.json` in the platform config directory:
//! - Linux: ~/.config/document-viewer/config.json
//! - macOS: ~/Library/Application Support/document-viewer/config.json
//! - Windows: %APPDATA%\document-viewer\config.json
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::render::FitMode;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Initial window size in logical pixels
    pub window_width: f32,
    pub window_height: f32,
    /// Width of the file list on the left
    pub sidebar_width: f32,
    /// Height reserved above the canvas for the toolbar and status line
    pub toolbar_height: f32,
    /// Multipliers applied by the Zoom In / Zoom Out buttons
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    /// Delay between animation frames
    pub frame_delay_ms: u64,
    /// How static images are fitted to the canvas
    pub fit_mode: FitMode,
    /// Path to the Pdfium shared library; the system library is used when unset
    pub pdfium_library: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 1000.0,
            window_height: 600.0,
            sidebar_width: 200.0,
            toolbar_height: 64.0,
            zoom_in_factor: 1.25,
            zoom_out_factor: 0.8,
            frame_delay_ms: 100,
            fit_mode: FitMode::Shrink,
            pdfium_library: None,
        }
    }
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// Never fails: a missing file yields the defaults, an unreadable or
    /// malformed one is logged and replaced by the defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("Could not determine config directory, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(config) => {
                tracing::info!("⚙️  Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("document-viewer");
        path.push("config.json");
        Some(path)
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms.max(1))
    }
}
