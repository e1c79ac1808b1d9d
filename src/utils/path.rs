//! Path helpers.

use std::path::{Path, PathBuf};

/// Normalize a path to absolute form.
///
/// Canonicalizes when the path exists, otherwise joins it onto cwd.
///
/// # Example
/// ```ignore
/// let abs = normalize_path(Path::new("./content/post.md"));
/// ```
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Resolve a configured path against `root`, with `~` expansion.
///
/// Absolute paths (after expansion) are kept as they are.
pub fn resolve_config_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        root.join(&path)
    } else {
        path
    };
    normalize_path(&full_path)
}
