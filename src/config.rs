use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::search::DEFAULT_DEBOUNCE;

pub const DIR_VAR: &str = "SCRIBBLE_NOTES_DIR";
pub const LOG_VAR: &str = "SCRIBBLE_NOTES_LOG";
pub const CANVAS_SIZE_VAR: &str = "SCRIBBLE_CANVAS_SIZE";
pub const DEBOUNCE_VAR: &str = "SCRIBBLE_SEARCH_DEBOUNCE_MS";

pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (800, 400);
const APP_DIR_NAME: &str = "scribble-notes";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_filter: String,
    pub canvas_size: (u32, u32),
    pub search_debounce: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup(DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let log_filter = lookup(LOG_VAR)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let canvas_size = match lookup(CANVAS_SIZE_VAR) {
            Some(raw) => parse_size(&raw).ok_or(ConfigError::CanvasSize {
                key: CANVAS_SIZE_VAR,
                value: raw,
            })?,
            None => DEFAULT_CANVAS_SIZE,
        };

        let search_debounce = match lookup(DEBOUNCE_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::Duration {
                    key: DEBOUNCE_VAR,
                    value: raw,
                })?,
            None => DEFAULT_DEBOUNCE,
        };

        Ok(Self {
            data_dir,
            log_filter,
            canvas_size,
            search_debounce,
        })
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR_NAME}")))
}

fn parse_size(raw: &str) -> Option<(u32, u32)> {
    let (w, h) = raw.trim().split_once(['x', 'X'])?;
    let w = w.trim().parse::<u32>().ok()?;
    let h = h.trim().parse::<u32>().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}
