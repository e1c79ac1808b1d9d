//! Pandoc invocation.
//!
//! ```text
//! pandoc/
//! ├── command.rs       # argument vector + validation
//! ├── defaults.rs      # defaults file checks
//! ├── bibliography.rs  # bibliography discovery for citations
//! └── mod.rs           # constants, Pandoc runner (this file)
//! ```

pub mod bibliography;
pub mod command;
pub mod defaults;

pub use command::PandocCommand;
pub use defaults::{DefaultsError, DefaultsFlags, PandocDefaults};

use crate::debug;
use crate::error::{ReaderError, Result};
use crate::utils::exec::{Cmd, ExecError, FilterRule};
use std::path::{Path, PathBuf};

/// Flags that turn the output into a full page.
pub const UNSUPPORTED_ARGUMENTS: &[&str] = &["--standalone", "--self-contained"];

/// Flags that request a table of contents.
pub const TOC_ARGUMENTS: &[&str] = &["--toc", "--table-of-contents"];

/// Flags that enable citation processing.
pub const CITEPROC_ARGUMENTS: &[&str] = &["--citeproc", "-C"];

/// Extension toggle that must accompany citation processing.
pub const CITATIONS_EXTENSION: &str = "+citations";

pub const VALID_INPUT_FORMATS: &[&str] = &["markdown", "commonmark", "gfm"];
pub const VALID_OUTPUT_FORMATS: &[&str] = &["html", "html5"];

/// Output format of direct-mode commands.
pub const OUTPUT_FORMAT: &str = "html5";

/// Bibliography extensions, in lookup order.
pub const BIBLIOGRAPHY_EXTENSIONS: &[&str] = &["json", "yaml", "bibtex", "bib"];

/// Pandoc stderr lines that are not worth showing.
pub static PANDOC_FILTER: FilterRule = FilterRule::new(&["[INFO]"]);

/// A located converter binary.
#[derive(Debug, Clone)]
pub struct Pandoc {
    /// Configured name, used in logs and errors.
    bin: String,
    path: PathBuf,
}

impl Pandoc {
    /// Resolve `bin` on `PATH` (or as a path).
    pub fn locate(bin: &str) -> Result<Self> {
        which::which(bin)
            .map(|path| Self {
                bin: bin.to_string(),
                path,
            })
            .map_err(|_| ReaderError::ConverterNotFound(bin.to_string()))
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `argv` (binary first) with `input` on stdin and return stdout.
    ///
    /// The first element of `argv` is replaced by the located binary.
    pub fn run(&self, argv: &[String], input: &str) -> Result<String> {
        let args = argv.get(1..).unwrap_or_default();
        debug!("pandoc"; "{}", argv.join(" "));

        let output = Cmd::new(&self.path)
            .name(&self.bin)
            .args(args)
            .stdin(input)
            .filter(&PANDOC_FILTER)
            .run()
            .map_err(|err| match err {
                ExecError::Failed { status, stderr, .. } => ReaderError::ConverterExecution {
                    command: argv.join(" "),
                    status,
                    stderr,
                },
                other => ReaderError::Exec(other),
            })?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
