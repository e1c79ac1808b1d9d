//! `[pandoc]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [pandoc]
//! bin = "pandoc"
//! from = "markdown"
//! args = ["--mathjax", "--toc"]
//! extensions = ["+smart", "+citations"]
//! formatted_fields = ["summary"]
//! ```
//!
//! Or with Pandoc defaults files (`args` and `extensions` are then ignored):
//!
//! ```toml
//! [pandoc]
//! default_files = ["defaults/html.yaml"]
//! ```

use crate::config::ConfigDiagnostics;
use crate::pandoc::{PandocDefaults, UNSUPPORTED_ARGUMENTS};
use macros::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Pandoc converter settings.
#[derive(Debug, Clone, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "pandoc")]
pub struct PandocConfig {
    /// Converter binary, looked up on PATH.
    pub bin: String,

    /// Input format the extensions are appended to.
    #[config(inline_doc = "markdown, commonmark, gfm, ...")]
    pub from: String,

    /// Extra arguments forwarded verbatim to the converter.
    pub args: Vec<String>,

    /// Markdown extensions appended to the input format.
    #[config(default = "[]", inline_doc = "a list, or one string like \"+smart+citations\"")]
    pub extensions: Extensions,

    /// Pandoc defaults files. When set, `args` and `extensions` are ignored.
    pub default_files: Vec<PathBuf>,

    /// Metadata fields whose values are rendered to HTML.
    pub formatted_fields: Vec<String>,

    /// Template used for the table of contents (built-in when unset).
    pub toc_template: Option<PathBuf>,
}

impl Default for PandocConfig {
    fn default() -> Self {
        Self {
            bin: "pandoc".into(),
            from: "markdown".into(),
            args: Vec::new(),
            extensions: Extensions::default(),
            default_files: Vec::new(),
            formatted_fields: Vec::new(),
            toc_template: None,
        }
    }
}

impl PandocConfig {
    /// Whether defaults files replace the inline arguments.
    pub fn uses_default_files(&self) -> bool {
        !self.default_files.is_empty()
    }

    /// Resolve relative paths against the config root.
    pub fn normalize(&mut self, root: &Path) {
        self.default_files = self
            .default_files
            .iter()
            .map(|p| crate::utils::path::resolve_config_path(p, root))
            .collect();

        if let Some(template) = self.toc_template.take() {
            self.toc_template = Some(crate::utils::path::resolve_config_path(&template, root));
        }
    }

    /// Validate pandoc configuration.
    ///
    /// # Checks
    /// - `bin` must not be empty and must be an installed executable
    /// - `from` must not be empty
    /// - with `default_files`: every file must load and pass defaults validation
    /// - without: `args` must not contain unsupported flags and every
    ///   extension token must start with `+` or `-`
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.bin.trim().is_empty() {
            diag.error(Self::FIELDS.bin, format!("{} must not be empty", Self::FIELDS.bin));
        } else if which::which(&self.bin).is_err() {
            diag.error_with_hint(
                Self::FIELDS.bin,
                format!("`{}` not found", self.bin),
                format!(
                    "install pandoc or point {} at it, e.g. {}",
                    Self::FIELDS.bin,
                    Self::FIELDS.bin.example("\"/usr/local/bin/pandoc\"")
                ),
            );
        }

        if self.from.trim().is_empty() {
            diag.error(Self::FIELDS.from, format!("{} must not be empty", Self::FIELDS.from));
        }

        if self.uses_default_files() {
            self.validate_default_files(diag);
        } else {
            self.validate_inline_args(diag);
        }

        if let Some(template) = &self.toc_template
            && !template.is_file()
        {
            diag.error(
                Self::FIELDS.toc_template,
                format!("template not found: {}", template.display()),
            );
        }
    }

    fn validate_default_files(&self, diag: &mut ConfigDiagnostics) {
        if !self.args.is_empty() || !self.extensions.is_empty() {
            diag.hint(
                Self::FIELDS.default_files,
                format!(
                    "{} and {} are ignored while {} is set",
                    Self::FIELDS.args,
                    Self::FIELDS.extensions,
                    Self::FIELDS.default_files
                ),
            );
        }

        for path in &self.default_files {
            let result = PandocDefaults::load(path).and_then(|defaults| defaults.validate());
            if let Err(err) = result {
                diag.error(
                    Self::FIELDS.default_files,
                    format!("{}: {}", path.display(), err),
                );
            }
        }
    }

    fn validate_inline_args(&self, diag: &mut ConfigDiagnostics) {
        for arg in &self.args {
            if UNSUPPORTED_ARGUMENTS.contains(&arg.as_str()) {
                diag.error_with_hint(
                    Self::FIELDS.args,
                    format!("Argument {arg} is not supported."),
                    "the reader produces fragments; the site templates add the page shell",
                );
            }
        }

        for token in self.extensions.tokens() {
            if !token.starts_with(['+', '-']) {
                diag.error(
                    Self::FIELDS.extensions,
                    format!("extension `{token}` must start with `+` or `-`"),
                );
            }
        }
    }
}

// ============================================================================
// Extensions
// ============================================================================

/// Markdown extension toggles, as a list (`["+smart"]`) or one string
/// (`"+smart-raw_html"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extensions {
    List(Vec<String>),
    Joined(String),
}

impl Default for Extensions {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Extensions {
    /// Suffix appended to the input format, e.g. `+smart+citations`.
    pub fn suffix(&self) -> String {
        match self {
            Self::List(items) => items.concat(),
            Self::Joined(s) => s.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::List(items) => items.iter().all(String::is_empty),
            Self::Joined(s) => s.is_empty(),
        }
    }

    /// Individual toggles. The string form is split before each `+`/`-`.
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.iter().filter(|s| !s.is_empty()).cloned().collect(),
            Self::Joined(s) => split_toggles(s),
        }
    }
}

fn split_toggles(s: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for c in s.chars() {
        if matches!(c, '+' | '-') && !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
