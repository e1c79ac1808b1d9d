//! Converter command construction.
//!
//! Two mutually exclusive modes:
//!
//! - **direct**: `pandoc --from markdown+ext --to html5 <args>...`
//! - **defaults**: `pandoc --defaults=a.yaml --defaults=b.yaml`
//!
//! Either way the arguments are validated before anything runs, and the
//! features the reader has to handle itself (TOC, citations) are recorded.

use super::{
    CITATIONS_EXTENSION, CITEPROC_ARGUMENTS, DefaultsFlags, OUTPUT_FORMAT, PandocDefaults,
    TOC_ARGUMENTS, UNSUPPORTED_ARGUMENTS, bibliography::bibliography_args,
};
use crate::config::PandocConfig;
use crate::error::{ReaderError, Result};
use std::{fmt, path::Path};

/// A validated converter invocation, binary first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PandocCommand {
    argv: Vec<String>,
    toc: bool,
    citations: bool,
}

impl PandocCommand {
    /// Build the command for converting `source`.
    ///
    /// Bibliographies next to `source` are added when citations are on.
    pub fn build(config: &PandocConfig, source: &Path) -> Result<Self> {
        let mut command = if config.uses_default_files() {
            Self::from_defaults(config)?
        } else {
            Self::direct(config)?
        };

        if command.citations {
            command.argv.extend(bibliography_args(source));
        }
        Ok(command)
    }

    fn direct(config: &PandocConfig) -> Result<Self> {
        if let Some(arg) = config
            .args
            .iter()
            .find(|arg| UNSUPPORTED_ARGUMENTS.contains(&arg.as_str()))
        {
            return Err(ReaderError::UnsupportedArgument(arg.clone()));
        }

        let extensions = config.extensions.suffix();
        let mut argv = vec![
            config.bin.clone(),
            "--from".to_string(),
            format!("{}{}", config.from, extensions),
            "--to".to_string(),
            OUTPUT_FORMAT.to_string(),
        ];
        argv.extend(config.args.iter().cloned());

        Ok(Self {
            toc: contains_any(&config.args, TOC_ARGUMENTS),
            citations: contains_any(&config.args, CITEPROC_ARGUMENTS)
                && extensions.contains(CITATIONS_EXTENSION),
            argv,
        })
    }

    fn from_defaults(config: &PandocConfig) -> Result<Self> {
        let mut flags = DefaultsFlags::default();
        let mut argv = vec![config.bin.clone()];

        for path in &config.default_files {
            flags |= PandocDefaults::load(path)
                .and_then(|defaults| defaults.validate())
                .map_err(|error| ReaderError::Defaults {
                    path: path.clone(),
                    error,
                })?;
            argv.push(format!("--defaults={}", path.display()));
        }

        Ok(Self {
            argv,
            toc: flags.toc,
            citations: flags.citations,
        })
    }

    /// Full argument vector, binary first.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn toc(&self) -> bool {
        self.toc
    }

    pub fn citations(&self) -> bool {
        self.citations
    }

    /// Arguments for the standalone run that renders only the TOC.
    pub fn toc_argv(&self, template: &Path) -> Vec<String> {
        let mut argv = self.argv.clone();
        argv.extend([
            "--standalone".to_string(),
            "--template".to_string(),
            template.display().to_string(),
        ]);
        argv
    }
}

impl fmt::Display for PandocCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.argv.join(" "))
    }
}

fn contains_any(args: &[String], wanted: &[&str]) -> bool {
    args.iter().any(|arg| wanted.contains(&arg.as_str()))
}
