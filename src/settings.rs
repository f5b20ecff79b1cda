//! Headless runner settings
//!
//! Loaded from an optional JSON file. Anything missing takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Settings for a headless build session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Row scoring seed (None = derive from the clock)
    pub seed: Option<u64>,
    /// Simulated seconds to run
    pub run_secs: f32,
    /// Simulated frame length in milliseconds
    pub frame_ms: u64,
    /// Sell automatically once the tower reaches this many rows
    pub auto_sell_rows: Option<u32>,
    /// Print the final snapshot as JSON
    pub print_snapshot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            run_secs: 60.0,
            frame_ms: 16,
            auto_sell_rows: Some(5),
            print_snapshot: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Clamp values the runner can't work with
    pub fn sanitized(mut self) -> Self {
        if !self.run_secs.is_finite() || self.run_secs < 0.0 {
            self.run_secs = 0.0;
        }
        self.frame_ms = self.frame_ms.max(1);
        if self.auto_sell_rows == Some(0) {
            self.auto_sell_rows = None;
        }
        self
    }

    /// Number of frames covering `run_secs`
    pub fn frame_count(&self) -> u64 {
        let total_ms = (self.run_secs as f64 * 1000.0).ceil() as u64;
        total_ms.div_ceil(self.frame_ms.max(1))
    }
}
