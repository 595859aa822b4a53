//! Game settings
//!
//! Tunables for a session, persisted as JSON next to the binary or wherever
//! `--settings` points.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::PlayField;
use crate::consts::{BOUNCE_DISAPPEAR_DELAY_MS, STARTING_LIVES};

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play field dimensions
    pub field: PlayField,
    /// Lives at the start of every run
    pub starting_lives: u8,
    /// Randomly placed platforms between start and final platform
    pub mid_platforms: usize,
    /// Host frame rate, used to turn millisecond delays into frames
    pub frames_per_second: u32,
    /// Fixed seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field: PlayField::default(),
            starting_lives: STARTING_LIVES,
            mid_platforms: 15,
            frames_per_second: 60,
            seed: None,
        }
    }
}

impl Settings {
    /// Frames between a bounce and its platform starting to vanish (at least 1)
    pub fn bounce_delay_frames(&self) -> u32 {
        let frames = (u64::from(BOUNCE_DISAPPEAR_DELAY_MS) * u64::from(self.frames_per_second))
            .div_ceil(1000)
            .max(1);
        u32::try_from(frames).unwrap_or(u32::MAX)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
