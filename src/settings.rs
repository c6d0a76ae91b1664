//! Display preferences
//!
//! Persisted in LocalStorage. Gameplay numbers live in `Tuning`, not here.

use serde::{Deserialize, Serialize};

use crate::renderer::vertex::colors;

/// Display settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show the frame counter under the canvas
    pub show_fps: bool,
    /// Outline the playfield edge
    pub show_border: bool,
    /// Line colours (RGBA, 0..1)
    pub player_color: [f32; 4],
    pub bullet_color: [f32; 4],
    pub border_color: [f32; 4],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: true,
            show_border: true,
            player_color: colors::PLAYER,
            bullet_color: colors::BULLET,
            border_color: colors::BORDER,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "websteroids_settings";

    /// Parse stored settings, falling back to defaults on bad JSON
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json_or_default(r#"{ "show_border": false }"#);
        assert!(!s.show_border);
        assert!(s.show_fps);
    }

    #[test]
    fn test_colour_override() {
        let s = Settings::from_json_or_default(r#"{ "bullet_color": [1.0, 0.0, 0.0, 1.0] }"#);
        assert_eq!(s.bullet_color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(s.player_color, colors::PLAYER);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }
}
