//! Embedded static resources.
//!
//! Pandoc only takes templates from disk, so embedded files are written to
//! the temp directory under a content-hashed name the first time they are
//! needed.
//!
//! # Usage
//!
//! ```ignore
//! use embed::TOC_TEMPLATE;
//!
//! let path = TOC_TEMPLATE.materialize()?; // /tmp/pandoc-reader/toc-template.1a2b3c4d.html
//! ```

use crate::utils::hash;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

/// Directory under the system temp dir that holds materialised files.
const TEMP_SUBDIR: &str = "pandoc-reader";

/// A file compiled into the binary.
pub struct EmbeddedFile {
    stem: &'static str,
    extension: &'static str,
    content: &'static str,
    path: OnceLock<PathBuf>,
}

impl EmbeddedFile {
    pub const fn new(stem: &'static str, extension: &'static str, content: &'static str) -> Self {
        Self {
            stem,
            extension,
            content,
            path: OnceLock::new(),
        }
    }

    pub const fn content(&self) -> &'static str {
        self.content
    }

    /// File name with content fingerprint, e.g. `toc-template.1a2b3c4d.html`.
    pub fn file_name(&self) -> String {
        format!(
            "{}.{}.{}",
            self.stem,
            hash::fingerprint(self.content),
            self.extension
        )
    }

    /// Write the file into the temp directory once per process and return
    /// its path.
    pub fn materialize(&self) -> io::Result<PathBuf> {
        if let Some(path) = self.path.get() {
            return Ok(path.clone());
        }
        let path = self.write_into(&std::env::temp_dir().join(TEMP_SUBDIR))?;
        Ok(self.path.get_or_init(|| path).clone())
    }

    /// Write the file into `dir`, skipping the write when an identical file
    /// is already there.
    pub fn write_into(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(self.file_name());
        if fs::read_to_string(&path).is_ok_and(|existing| existing == self.content) {
            return Ok(path);
        }
        fs::create_dir_all(dir)?;
        fs::write(&path, self.content)?;
        Ok(path)
    }
}

/// Pandoc template that renders only the table of contents.
pub static TOC_TEMPLATE: EmbeddedFile = EmbeddedFile::new(
    "toc-template",
    "html",
    include_str!("templates/toc-template.html"),
);
