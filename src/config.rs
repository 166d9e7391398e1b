//! Settings file
//!
//! Optional JSON settings stored in the platform config directory. A missing
//! file means defaults; a broken file is reported and replaced by defaults.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.json";

/// Tunables for the journey and its decorative effects.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoyagerSettings {
    /// Time between accepting a navigation request and arriving (ms).
    pub transition_ms: u64,
    /// Lifetime of the lightspeed overlay before its completion message (ms).
    pub lightspeed_ms: u64,
    pub lightspeed_streaks: usize,
    pub landing_stars: usize,
    pub journey_stars: usize,
    pub detail_stars: usize,
    pub backdrop_stars: usize,
    /// Delay before the landing page offers the start button (ms).
    pub loading_ms: u64,
    pub audio_volume: f32,
    pub toast_secs: f32,
    /// Fixed seed for reproducible visuals.
    pub seed: Option<u64>,
}

impl Default for VoyagerSettings {
    fn default() -> Self {
        Self {
            transition_ms: 1500,
            lightspeed_ms: 1500,
            lightspeed_streaks: 100,
            landing_stars: 150,
            journey_stars: 200,
            detail_stars: 150,
            backdrop_stars: 5000,
            loading_ms: 2000,
            audio_volume: 0.5,
            toast_secs: 2.5,
            seed: None,
        }
    }
}

impl VoyagerSettings {
    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn lightspeed_duration(&self) -> Duration {
        Duration::from_millis(self.lightspeed_ms)
    }

    pub fn loading_duration(&self) -> Duration {
        Duration::from_millis(self.loading_ms)
    }

    /// Clamp values read from disk into ranges the views can handle.
    pub fn sanitized(mut self) -> Self {
        self.transition_ms = self.transition_ms.clamp(1000, 2000);
        self.lightspeed_ms = self.lightspeed_ms.clamp(250, 5000);
        self.lightspeed_streaks = self.lightspeed_streaks.min(1000);
        self.landing_stars = self.landing_stars.min(2000);
        self.journey_stars = self.journey_stars.min(2000);
        self.detail_stars = self.detail_stars.min(2000);
        self.backdrop_stars = self.backdrop_stars.min(20_000);
        self.loading_ms = self.loading_ms.min(10_000);
        self.audio_volume = self.audio_volume.clamp(0.0, 1.0);
        self.toast_secs = self.toast_secs.clamp(0.5, 10.0);
        self
    }
}

/// Reads and writes `settings.json`.
pub struct SettingsStore {
    config_dir: PathBuf,
}

impl SettingsStore {
    /// Resolve the platform config directory:
    /// - macOS: ~/Library/Application Support/stellar-voyager/
    /// - Linux: ~/.config/stellar-voyager/
    /// - Windows: %APPDATA%\stellar-voyager\config\
    pub fn new() -> Result<Self, anyhow::Error> {
        let proj_dirs = ProjectDirs::from("", "", "stellar-voyager")
            .ok_or_else(|| anyhow::anyhow!("Failed to resolve config directory"))?;
        Ok(Self::new_in_dir(proj_dirs.config_dir().to_path_buf()))
    }

    pub fn new_in_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Returns Ok(None) when no settings file exists.
    pub fn read(&self) -> Result<Option<VoyagerSettings>, anyhow::Error> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let settings: VoyagerSettings = serde_json::from_str(&contents)?;
        Ok(Some(settings.sanitized()))
    }

    pub fn write(&self, settings: &VoyagerSettings) -> Result<(), anyhow::Error> {
        fs::create_dir_all(&self.config_dir)?;
        let contents = serde_json::to_string_pretty(settings)?;
        fs::write(self.path(), contents)?;
        Ok(())
    }
}

/// Load settings, falling back to defaults on any failure.
pub fn load_settings() -> VoyagerSettings {
    let store = match SettingsStore::new() {
        Ok(store) => store,
        Err(e) => {
            warn!("Settings unavailable, using defaults: {}", e);
            return VoyagerSettings::default();
        }
    };
    match store.read() {
        Ok(Some(settings)) => {
            info!("Loaded settings from {}", store.path().display());
            settings
        }
        Ok(None) => {
            let settings = VoyagerSettings::default();
            if let Err(e) = store.write(&settings) {
                warn!("Could not write default settings: {}", e);
            }
            settings
        }
        Err(e) => {
            warn!(
                "Failed to read {}, using defaults: {}",
                store.path().display(),
                e
            );
            VoyagerSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(test_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!(
            "stellar-voyager-settings-{}-{}-{}",
            test_name,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn test_missing_file_is_none() {
        let store = SettingsStore::new_in_dir(unique_temp_dir("missing"));
        assert!(store.read().expect("read should not error").is_none());
    }

    #[test]
    fn test_write_and_read() {
        let store = SettingsStore::new_in_dir(unique_temp_dir("write_and_read"));
        let settings = VoyagerSettings {
            transition_ms: 1200,
            seed: Some(42),
            ..Default::default()
        };
        store.write(&settings).expect("write should succeed");

        let loaded = store
            .read()
            .expect("read should succeed")
            .expect("settings should exist");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = unique_temp_dir("partial");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SETTINGS_FILE), r#"{ "journey_stars": 64 }"#).unwrap();

        let loaded = SettingsStore::new_in_dir(dir).read().unwrap().unwrap();
        assert_eq!(loaded.journey_stars, 64);
        assert_eq!(loaded.transition_ms, 1500);
        assert_eq!(loaded.seed, None);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let dir = unique_temp_dir("clamped");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(SETTINGS_FILE),
            r#"{ "transition_ms": 10, "audio_volume": 3.0 }"#,
        )
        .unwrap();

        let loaded = SettingsStore::new_in_dir(dir).read().unwrap().unwrap();
        assert_eq!(loaded.transition_ms, 1000);
        assert_eq!(loaded.audio_volume, 1.0);
    }

    #[test]
    fn test_invalid_json_is_error() {
        let dir = unique_temp_dir("invalid");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(SETTINGS_FILE), "not json").unwrap();

        assert!(SettingsStore::new_in_dir(dir).read().is_err());
    }
}
