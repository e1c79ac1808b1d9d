//! Per-field data for the Config derive.
//!
//! Recognised field options:
//!
//! ```ignore
//! #[config(default = "200", inline_doc = "words per minute")]
//! pub words_per_minute: WordsPerMinute,
//! ```
//!
//! Any other key inside `#[config(...)]` is a compile error.

use syn::{Attribute, Field, Ident, LitStr, Type};

use crate::config::attr::extract_doc_comment;

/// A named field of a config section.
pub struct FieldInfo {
    pub name: Ident,
    pub ty: Type,
    /// Leading doc comment, emitted as `#` lines above the key.
    pub doc: Option<String>,
    /// Trailing `# ...` comment on the key's line.
    pub inline_doc: Option<String>,
    /// TOML literal used instead of the runtime default.
    pub default: Option<String>,
}

impl FieldInfo {
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let name = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "Config fields must be named"))?;
        let options = FieldOptions::parse(&field.attrs)?;

        Ok(Self {
            name,
            ty: field.ty.clone(),
            doc: extract_doc_comment(&field.attrs),
            inline_doc: options.inline_doc,
            default: options.default,
        })
    }

    /// Key as it appears in the TOML file.
    pub fn key(&self) -> String {
        self.name.to_string()
    }

    /// Dotted path below `section`, e.g. `pandoc.bin`.
    pub fn path(&self, section: &str) -> String {
        if section.is_empty() {
            self.key()
        } else {
            format!("{section}.{}", self.key())
        }
    }
}

#[derive(Default)]
struct FieldOptions {
    default: Option<String>,
    inline_doc: Option<String>,
}

impl FieldOptions {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut options = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("config")) {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("default") {
                    &mut options.default
                } else if meta.path.is_ident("inline_doc") {
                    &mut options.inline_doc
                } else {
                    return Err(meta.error("expected `default` or `inline_doc`"));
                };
                let value: LitStr = meta.value()?.parse()?;
                *slot = Some(value.value());
                Ok(())
            })?;
        }
        Ok(options)
    }
}
