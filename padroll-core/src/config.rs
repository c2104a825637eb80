use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::input::RepeatRate;
use crate::state::ClipboardPitch;

/// Embedded default configuration
const DEFAULT_CONFIG: &str = include_str!("../config.toml");

/// What a paste does to the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteMode {
    /// Clipboard survives, so the same notes can be stamped repeatedly.
    #[default]
    Repeat,
    /// Clipboard is emptied by the paste.
    Consume,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub log_level: String,
    pub track_count: usize,
    pub stick_deadzone: f32,
    pub grid_stick_threshold: f32,
    pub cursor_repeat: RepeatRate,
    pub length_repeat: RepeatRate,
    pub velocity_repeat: RepeatRate,
    pub selection_repeat: RepeatRate,
    pub start_long_press_ms: u64,
    pub secondary_tap_ms: u64,
    pub velocity_step: u8,
    pub default_velocity: u8,
    pub preview_seconds: f32,
    pub clipboard_pitch: ClipboardPitch,
    pub paste_mode: PasteMode,
    pub copy_clears_selection: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            track_count: 8,
            stick_deadzone: 0.2,
            grid_stick_threshold: 0.7,
            cursor_repeat: RepeatRate::CURSOR,
            length_repeat: RepeatRate::NOTE_LENGTH,
            velocity_repeat: RepeatRate::NOTE_VELOCITY,
            selection_repeat: RepeatRate::SELECTION_MOVE,
            start_long_press_ms: 500,
            secondary_tap_ms: 300,
            velocity_step: 5,
            default_velocity: 100,
            preview_seconds: 0.25,
            clipboard_pitch: ClipboardPitch::Absolute,
            paste_mode: PasteMode::Repeat,
            copy_clears_selection: true,
        }
    }
}

impl ControllerConfig {
    /// Load config: embedded default, with keys from the user file replacing it.
    pub fn load() -> Self {
        Self::load_with_override(user_config_path().as_deref())
    }

    pub fn load_with_override(path: Option<&Path>) -> Self {
        let mut base = match DEFAULT_CONFIG.parse::<toml::Table>() {
            Ok(table) => table,
            Err(e) => {
                log::error!("Embedded config.toml is invalid: {}", e);
                return Self::default();
            }
        };

        if let Some(path) = path.filter(|p| p.exists()) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match contents.parse::<toml::Table>() {
                    Ok(user) => merge_config(&mut base, user),
                    Err(e) => log::warn!("Ignoring malformed {}: {}", path.display(), e),
                },
                Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
            }
        }

        Self::from_table(base)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn from_table(table: toml::Table) -> Self {
        toml::Value::Table(table).try_into().unwrap_or_else(|e| {
            log::warn!("Invalid config value, using defaults: {}", e);
            Self::default()
        })
    }
}

/// `<config_dir>/padroll/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    let dir = dirs::config_dir()?;
    Some(dir.join("padroll").join("config.toml"))
}

/// User keys fully replace the default keys.
fn merge_config(base: &mut toml::Table, user: toml::Table) {
    for (key, value) in user {
        base.insert(key, value);
    }
}
