//! User settings stored as settings.json in the app data directory

use crate::constants::DEFAULT_INDEX_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Window geometry
    pub window_x: Option<f32>,
    pub window_y: Option<f32>,
    pub window_w: Option<f32>,
    pub window_h: Option<f32>,

    // Last directory index browsed
    pub index_url: Option<String>,

    // View
    pub large_cards: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_x: None,
            window_y: None,
            window_w: None,
            window_h: None,
            index_url: None,
            large_cards: true,
        }
    }
}

impl Settings {
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("settings.json");
        match std::fs::read_to_string(&path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(settings) => {
                    debug!(path = %path.display(), "Settings loaded");
                    settings
                }
                Err(e) => {
                    warn!(error = %e, "Failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                debug!("No settings file found, using defaults");
                Self::default()
            }
        }
    }

    pub fn save(&self, data_dir: &Path) {
        let path = data_dir.join("settings.json");
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    warn!(error = %e, "Failed to save settings");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize settings"),
        }
    }

    pub fn index_url_or_default(&self) -> String {
        self.index_url
            .clone()
            .unwrap_or_else(|| DEFAULT_INDEX_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = Settings::default();
        settings.window_w = Some(1280.0);
        settings.index_url = Some("http://example.test/pics/".to_string());
        settings.large_cards = false;
        settings.save(dir.path());

        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.window_w, Some(1280.0));
        assert_eq!(loaded.index_url.as_deref(), Some("http://example.test/pics/"));
        assert!(!loaded.large_cards);
    }

    #[test]
    fn missing_file_and_garbage_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.index_url, None);
        assert!(loaded.large_cards);

        std::fs::write(dir.path().join("settings.json"), "not json").unwrap();
        let loaded = Settings::load(dir.path());
        assert_eq!(loaded.index_url, None);
    }

    #[test]
    fn default_url_points_at_the_local_server() {
        assert_eq!(
            Settings::default().index_url_or_default(),
            "http://localhost:8000/images/"
        );
    }
}
