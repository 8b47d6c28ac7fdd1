//! Configuration management

use crate::application::board::{BoardSettings, DEFAULT_QUOTE_ERROR_DURATION};
use crate::domain::{CascadeLayout, Size};
use crate::error::{BoardError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Name of the directory holding board state
pub const BOARD_DIR: &str = ".stickies";

/// Longest accepted auto-save interval (one day)
pub const MAX_AUTOSAVE_SECS: u64 = 86_400;

/// Longest accepted quote error indicator (one minute)
pub const MAX_QUOTE_ERROR_MS: u64 = 60_000;

/// Keys accepted by `get`/`set`
pub const CONFIG_KEYS: &[&str] = &[
    "board_width",
    "board_height",
    "note_width",
    "note_height",
    "cascade_x",
    "cascade_y",
    "cascade_step",
    "autosave_secs",
    "quote_error_ms",
    "created",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_board_width")]
    pub board_width: f64,
    #[serde(default = "default_board_height")]
    pub board_height: f64,
    #[serde(default = "default_note_width")]
    pub note_width: f64,
    #[serde(default = "default_note_height")]
    pub note_height: f64,
    #[serde(default = "default_cascade_x")]
    pub cascade_x: f64,
    #[serde(default = "default_cascade_y")]
    pub cascade_y: f64,
    #[serde(default = "default_cascade_step")]
    pub cascade_step: f64,
    #[serde(default = "default_autosave_secs")]
    pub autosave_secs: u64,
    #[serde(default = "default_quote_error_ms")]
    pub quote_error_ms: u64,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

fn default_board_width() -> f64 {
    960.0
}

fn default_board_height() -> f64 {
    640.0
}

fn default_note_width() -> f64 {
    200.0
}

fn default_note_height() -> f64 {
    150.0
}

fn default_cascade_x() -> f64 {
    20.0
}

fn default_cascade_y() -> f64 {
    20.0
}

fn default_cascade_step() -> f64 {
    40.0
}

fn default_autosave_secs() -> u64 {
    5
}

fn default_quote_error_ms() -> u64 {
    DEFAULT_QUOTE_ERROR_DURATION.as_millis() as u64
}

impl Default for Config {
    fn default() -> Self {
        Config {
            board_width: default_board_width(),
            board_height: default_board_height(),
            note_width: default_note_width(),
            note_height: default_note_height(),
            cascade_x: default_cascade_x(),
            cascade_y: default_cascade_y(),
            cascade_step: default_cascade_step(),
            autosave_secs: default_autosave_secs(),
            quote_error_ms: default_quote_error_ms(),
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Create a new config for a board of the given size
    pub fn new(board_width: f64, board_height: f64) -> Self {
        Config {
            board_width,
            board_height,
            ..Config::default()
        }
    }

    /// Load config from .stickies/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(BOARD_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BoardError::NotBoardDirectory(path.to_path_buf())
            } else {
                BoardError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values a hand-edited config.toml can hold but `set` refuses
    pub fn validate(&self) -> Result<()> {
        let dimensions = [
            ("board_width", self.board_width),
            ("board_height", self.board_height),
            ("note_width", self.note_width),
            ("note_height", self.note_height),
            ("cascade_x", self.cascade_x),
            ("cascade_y", self.cascade_y),
            ("cascade_step", self.cascade_step),
        ];
        for (key, value) in dimensions {
            check_dimension(key, value)?;
        }
        check_count("autosave_secs", self.autosave_secs, MAX_AUTOSAVE_SECS)?;
        check_count("quote_error_ms", self.quote_error_ms, MAX_QUOTE_ERROR_MS)
    }

    /// Save config to .stickies/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let board_dir = path.join(BOARD_DIR);
        let config_path = board_dir.join("config.toml");

        if !board_dir.exists() {
            fs::create_dir(&board_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn board_size(&self) -> Size {
        Size::new(self.board_width, self.board_height)
    }

    pub fn note_size(&self) -> Size {
        Size::new(self.note_width, self.note_height)
    }

    /// Orchestrator tunables derived from this config
    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            cascade: CascadeLayout::new(self.cascade_x, self.cascade_y, self.cascade_step),
            autosave_interval: Duration::from_secs(self.autosave_secs),
            quote_error_duration: Duration::from_millis(self.quote_error_ms),
        }
    }

    /// Read one key as display text
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "board_width" => self.board_width.to_string(),
            "board_height" => self.board_height.to_string(),
            "note_width" => self.note_width.to_string(),
            "note_height" => self.note_height.to_string(),
            "cascade_x" => self.cascade_x.to_string(),
            "cascade_y" => self.cascade_y.to_string(),
            "cascade_step" => self.cascade_step.to_string(),
            "autosave_secs" => self.autosave_secs.to_string(),
            "quote_error_ms" => self.quote_error_ms.to_string(),
            "created" => self.created.to_rfc3339(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Update one key from text
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "board_width" => self.board_width = parse_dimension(key, value)?,
            "board_height" => self.board_height = parse_dimension(key, value)?,
            "note_width" => self.note_width = parse_dimension(key, value)?,
            "note_height" => self.note_height = parse_dimension(key, value)?,
            "cascade_x" => self.cascade_x = parse_dimension(key, value)?,
            "cascade_y" => self.cascade_y = parse_dimension(key, value)?,
            "cascade_step" => self.cascade_step = parse_dimension(key, value)?,
            "autosave_secs" => {
                self.autosave_secs = parse_count(key, value, MAX_AUTOSAVE_SECS)?
            }
            "quote_error_ms" => {
                self.quote_error_ms = parse_count(key, value, MAX_QUOTE_ERROR_MS)?
            }
            "created" => {
                return Err(BoardError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> BoardError {
    BoardError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_dimension(key: &str, value: &str) -> Result<f64> {
    let n = value.trim().parse::<f64>().map_err(|_| {
        BoardError::Config(format!(
            "Invalid value for '{}': '{}' (expected a non-negative number)",
            key, value
        ))
    })?;
    check_dimension(key, n)?;
    Ok(n)
}

fn check_dimension(key: &str, n: f64) -> Result<()> {
    if n.is_finite() && n >= 0.0 {
        return Ok(());
    }
    Err(BoardError::Config(format!(
        "Invalid value for '{}': '{}' (expected a non-negative number)",
        key, n
    )))
}

fn parse_count(key: &str, value: &str, max: u64) -> Result<u64> {
    let count = value.trim().parse::<u64>().map_err(|_| {
        BoardError::Config(format!(
            "Invalid value for '{}': '{}' (expected a whole number)",
            key, value
        ))
    })?;
    check_count(key, count, max)?;
    Ok(count)
}

fn check_count(key: &str, count: u64, max: u64) -> Result<()> {
    if count > max {
        return Err(BoardError::Config(format!(
            "Invalid value for '{}': '{}' (at most {})",
            key, count, max
        )));
    }
    Ok(())
}
