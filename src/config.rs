//! Page behaviour configuration.
//!
//! Every delay and threshold the behaviours use lives here. Defaults match
//! the stylesheet's animation lengths, so changing a timing usually means
//! changing `assets/page.css` too.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PageResult;

/// Animation and recovery timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub card_press_ms: u64,
    pub toggle_processing_ms: u64,
    pub celebrate_ms: u64,
    pub title_focus_delay_ms: u64,
    pub title_pulse_ms: u64,
    pub submit_recovery_ms: u64,
    pub filter_press_ms: u64,
    pub shake_ms: u64,
    pub main_fade_delay_ms: u64,
    pub fade_ms: u64,
    pub stat_card_stagger_ms: u64,
    pub delete_recovery_ms: u64,
    pub message_display_ms: u64,
    pub message_fade_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            card_press_ms: 150,
            toggle_processing_ms: 500,
            celebrate_ms: 1000,
            title_focus_delay_ms: 300,
            title_pulse_ms: 2000,
            submit_recovery_ms: 5000,
            filter_press_ms: 200,
            shake_ms: 500,
            main_fade_delay_ms: 300,
            fade_ms: 500,
            stat_card_stagger_ms: 100,
            delete_recovery_ms: 2000,
            message_display_ms: 5000,
            message_fade_ms: 500,
        }
    }
}

/// Convert a millisecond setting into a [`Duration`].
pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Animation duration as written in CSS (`0.5s`, `2s`).
pub fn css_seconds(value: u64) -> String {
    let secs = value as f64 / 1000.0;
    format!("{secs}s")
}

/// Top-level configuration for a [`PageController`](crate::PageController).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub timings: Timings,
    /// Length the description counter is measured against
    pub description_limit: usize,
    /// Counter switches to the warning colour above this length
    pub description_warning: usize,
    /// Priority shown when the selector value cannot be parsed
    pub default_priority: u8,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            timings: Timings::default(),
            description_limit: 1000,
            description_warning: 800,
            default_priority: 3,
        }
    }
}

impl PageConfig {
    pub fn from_json_str(json: &str) -> PageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> PageResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            PageConfig::from_json_str(r#"{"timings": {"shake_ms": 300}, "description_limit": 500}"#)
                .unwrap();
        assert_eq!(config.timings.shake_ms, 300);
        assert_eq!(config.timings.message_display_ms, 5000);
        assert_eq!(config.description_limit, 500);
        assert_eq!(config.description_warning, 800);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let err = PageConfig::from_json_str("{\"timings\": 5}").unwrap_err();
        assert_eq!(err.error_code(), "E_JSON");
    }

    #[test]
    fn test_css_seconds() {
        assert_eq!(css_seconds(500), "0.5s");
        assert_eq!(css_seconds(2000), "2s");
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.json");
        std::fs::write(&path, r#"{"default_priority": 2}"#).unwrap();
        let config = PageConfig::from_json_file(&path).unwrap();
        assert_eq!(config.default_priority, 2);
    }
}
