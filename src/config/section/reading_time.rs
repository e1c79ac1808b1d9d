//! `[reading_time]` section configuration.
//!
//! ```toml
//! [reading_time]
//! enable = true
//! words_per_minute = 200
//! ```

use crate::config::{ConfigDiagnostics, ConfigError};
use macros::Config;
use serde::{Deserialize, Serialize};

/// Words per minute used when nothing is configured.
pub const DEFAULT_WORDS_PER_MINUTE: f64 = 200.0;

/// Reading time estimation.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "reading_time")]
pub struct ReadingTimeConfig {
    /// Add `reading_time` (minutes) to the metadata.
    pub enable: bool,

    /// Reading speed.
    #[config(default = "200", inline_doc = "words per minute")]
    pub words_per_minute: WordsPerMinute,
}

impl Default for ReadingTimeConfig {
    fn default() -> Self {
        Self {
            enable: false,
            words_per_minute: WordsPerMinute::default(),
        }
    }
}

impl ReadingTimeConfig {
    /// The configured rate, or an error when it is not a positive number.
    pub fn rate(&self) -> Result<f64, ConfigError> {
        self.words_per_minute.value().ok_or_else(|| {
            ConfigError::Validation(format!(
                "{} must be a number.",
                Self::FIELDS.words_per_minute.as_str()
            ))
        })
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.words_per_minute.value().is_none() {
            diag.error_with_hint(
                Self::FIELDS.words_per_minute,
                format!("{} must be a number", Self::FIELDS.words_per_minute),
                format!("e.g. {}", Self::FIELDS.words_per_minute.example("200")),
            );
        }
    }
}

/// Reading rate as written in the config file.
///
/// Strings are accepted so that `"250"` works; anything that does not parse
/// to a positive number is rejected at validation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WordsPerMinute {
    Number(f64),
    Text(String),
}

impl Default for WordsPerMinute {
    fn default() -> Self {
        Self::Number(DEFAULT_WORDS_PER_MINUTE)
    }
}

impl WordsPerMinute {
    /// Positive, finite rate if the value is numeric.
    pub fn value(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (n.is_finite() && n > 0.0).then_some(n)
    }
}
