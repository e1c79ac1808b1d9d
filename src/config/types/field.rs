//! Dotted config field paths such as `pandoc.default_files`.

use std::fmt;

/// Location of one setting in `pandoc-reader.toml`.
///
/// Built by `#[derive(Config)]` as `Section::FIELDS.<field>`, so a renamed
/// field cannot leave a stale path behind in a diagnostic. `Display` wraps
/// the path in backticks for use inside messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// The `[table]` this field lives in, empty for top-level keys.
    pub fn section(&self) -> &'static str {
        self.0.rsplit_once('.').map_or("", |(section, _)| section)
    }

    /// Key as written inside its table.
    pub fn key(&self) -> &'static str {
        self.0.rsplit_once('.').map_or(self.0, |(_, key)| key)
    }

    /// A `key = value` line placed under its table header.
    pub fn example(&self, value: &str) -> String {
        match self.section() {
            "" => format!("{} = {value}", self.key()),
            section => format!("[{section}] {} = {value}", self.key()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`", self.0)
    }
}
