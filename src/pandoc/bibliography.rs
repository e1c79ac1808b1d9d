//! Bibliography discovery for citation processing.
//!
//! A document `posts/essay.md` picks up every `essay.json`, `essay.yaml`,
//! `essay.bibtex` and `essay.bib` found under `posts/`, at any depth.

use super::BIBLIOGRAPHY_EXTENSIONS;
use jwalk::WalkDir;
use std::path::{Path, PathBuf};

/// Find bibliography files named after `source` below its directory.
///
/// Directories are visited in sorted order; within one directory the
/// extensions are tried in [`BIBLIOGRAPHY_EXTENSIONS`] order.
pub fn find_bibliographies(source: &Path) -> Vec<PathBuf> {
    let Some(stem) = source.file_stem() else {
        return Vec::new();
    };
    let source = std::path::absolute(source).unwrap_or_else(|_| source.to_path_buf());
    let Some(dir) = source.parent() else {
        return Vec::new();
    };

    let dirs: Vec<PathBuf> = WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.path())
        .collect();

    dirs.iter()
        .flat_map(|dir| {
            BIBLIOGRAPHY_EXTENSIONS.iter().filter_map(move |ext| {
                let mut name = stem.to_os_string();
                name.push(".");
                name.push(ext);
                let candidate = dir.join(name);
                candidate.is_file().then_some(candidate)
            })
        })
        .collect()
}

/// `--bibliography=<path>` arguments for `source`.
pub fn bibliography_args(source: &Path) -> Vec<String> {
    find_bibliographies(source)
        .into_iter()
        .map(|path| format!("--bibliography={}", path.display()))
        .collect()
}
