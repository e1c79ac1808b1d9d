//! Reader configuration management for `pandoc-reader.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [pandoc] and [reading_time]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # config file lookup
//! └── mod.rs         # ReaderConfig (this file)
//! ```
//!
//! The configuration is loaded once per run and shared read-only by every
//! document the reader converts.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    DEFAULT_WORDS_PER_MINUTE, Extensions, PandocConfig, ReadingTimeConfig, WordsPerMinute,
};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::log;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name, searched upward from the working directory.
pub const CONFIG_FILE: &str = "pandoc-reader.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing pandoc-reader.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Absolute path to the config file, empty when running on defaults
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory relative paths are resolved against
    #[serde(skip)]
    pub root: PathBuf,

    /// Converter settings
    #[serde(default)]
    pub pandoc: PandocConfig,

    /// Reading time settings
    #[serde(default)]
    pub reading_time: ReadingTimeConfig,
}

impl ReaderConfig {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Otherwise
    /// `pandoc-reader.toml` is searched upward from cwd, and defaults are
    /// used when none is found.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|err| ConfigError::Io(PathBuf::from("."), err))?;

        let found = match path {
            Some(path) => Some(cwd.join(path)),
            None => find_config_file(&cwd, Path::new(CONFIG_FILE)),
        };

        let mut config = match &found {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        match found {
            Some(path) => {
                let path = crate::utils::path::normalize_path(&path);
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = path;
            }
            None => config.root = cwd,
        }

        config.normalize_paths();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            log!("warning"; "- {}", field);
        }
    }

    /// Resolve every configured path against the config root.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        self.pandoc.normalize(&root);
    }

    /// Validate the whole configuration.
    ///
    /// Collects all problems and returns them at once. Hints are printed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.pandoc.validate(&mut diag);
        self.reading_time.validate(&mut diag);

        diag.print_hints();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    /// Commented TOML template with every section at its default.
    pub fn template() -> String {
        format!(
            "{}\n{}",
            PandocConfig::template_with_header(),
            ReadingTimeConfig::template_with_header()
        )
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = ReaderConfig::from_str("[pandoc\nbin = \"pandoc\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ReaderConfig::from_str("").unwrap();
        assert_eq!(config.pandoc.bin, "pandoc");
        assert!(config.pandoc.args.is_empty());
        assert!(!config.reading_time.enable);
    }

    #[test]
    fn test_full_config() {
        let content = r#"
[pandoc]
args = ["--mathjax", "--toc"]
extensions = ["+smart", "+implicit_figures"]
formatted_fields = ["summary"]

[reading_time]
enable = true
words_per_minute = 100
"#;
        let config = ReaderConfig::from_str(content).unwrap();
        assert_eq!(config.pandoc.args, vec!["--mathjax", "--toc"]);
        assert_eq!(config.pandoc.extensions.suffix(), "+smart+implicit_figures");
        assert_eq!(config.pandoc.formatted_fields, vec!["summary"]);
        assert!(config.reading_time.enable);
        assert_eq!(config.reading_time.rate().unwrap(), 100.0);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[pandoc]\nbin = \"pandoc\"\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = ReaderConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.pandoc.bin, "pandoc");
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_no_unknown_fields() {
        let content = "[pandoc]\nargs = []\n[reading_time]\nenable = false";
        let (_, ignored) = ReaderConfig::parse_with_ignored(content).unwrap();
        assert!(ignored.is_empty());
    }

    #[test]
    fn test_template_parses_back() {
        let template = ReaderConfig::template();
        let (config, ignored) = ReaderConfig::parse_with_ignored(&template).unwrap();
        assert!(ignored.is_empty(), "template has unknown fields: {ignored:?}");
        assert_eq!(config.pandoc.bin, "pandoc");
        assert_eq!(config.reading_time.rate().unwrap(), DEFAULT_WORDS_PER_MINUTE);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = ReaderConfig::load(Some(Path::new("/no/such/pandoc-reader.toml")));
        assert!(matches!(result, Err(ConfigError::Io(..))));
    }
}
