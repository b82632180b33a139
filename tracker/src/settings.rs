//! Task configuration.
//!
//! Defaults: 60 fps, 20 px radius, 10 trials, 16x antialiasing, white
//! background, red target.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskSettings {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    #[serde(default = "default_target_radius")]
    pub target_radius: u32,
    #[serde(default = "default_trial_count")]
    pub trial_count: u32,
    /// Subsamples per edge pixel; 16 means a 4x4 grid, 1 disables smoothing.
    #[serde(default = "default_antialiasing")]
    pub antialiasing: u32,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_target_color")]
    pub target_color: [u8; 3],
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            version: default_version(),
            frame_rate: default_frame_rate(),
            target_radius: default_target_radius(),
            trial_count: default_trial_count(),
            antialiasing: default_antialiasing(),
            background: default_background(),
            target_color: default_target_color(),
        }
    }
}

impl TaskSettings {
    /// Clamps out-of-range values instead of erroring.
    pub fn sanitized(mut self) -> Self {
        self.version = default_version();
        self.frame_rate = self.frame_rate.clamp(1, 240);
        self.target_radius = self.target_radius.clamp(1, 512);
        self.trial_count = self.trial_count.max(1);
        self.antialiasing = self.antialiasing.clamp(1, 64);
        self
    }
}

fn default_version() -> u32 {
    1
}

fn default_frame_rate() -> u32 {
    60
}

fn default_target_radius() -> u32 {
    20
}

fn default_trial_count() -> u32 {
    10
}

fn default_antialiasing() -> u32 {
    16
}

fn default_background() -> [u8; 3] {
    [255, 255, 255]
}

fn default_target_color() -> [u8; 3] {
    [255, 0, 0]
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn from_env() -> Self {
        if let Some(explicit) = std::env::var_os("ATTN_SETTINGS_PATH") {
            return Self {
                path: PathBuf::from(explicit),
            };
        }

        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|home| {
                    let mut p = PathBuf::from(home);
                    p.push(".config");
                    p
                })
            })
            .unwrap_or_else(|| PathBuf::from("."));

        let mut path = base;
        path.push("attention-tracker");
        path.push("settings.json");
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Missing or malformed files fall back to the defaults.
    pub fn load(&self) -> TaskSettings {
        let Ok(bytes) = fs::read(&self.path) else {
            return TaskSettings::default();
        };
        serde_json::from_slice::<TaskSettings>(&bytes)
            .map(TaskSettings::sanitized)
            .unwrap_or_else(|_| TaskSettings::default())
    }

    pub fn save(&self, settings: &TaskSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, text)
    }
}
