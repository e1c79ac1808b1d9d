//! The Markdown reader and its registration.
//!
//! ```ignore
//! let config = Arc::new(ReaderConfig::load(None)?);
//! let mut registry = ReaderRegistry::new();
//! register(&mut registry, config);
//!
//! let reader = registry.reader_for(Path::new("posts/hello.md")).unwrap();
//! let Document { html, metadata } = reader.read(Path::new("posts/hello.md"))?;
//! ```

use crate::config::ReaderConfig;
use crate::embed::TOC_TEMPLATE;
use crate::error::{ReaderError, Result};
use crate::meta::{self, MetaValue, Metadata, MetadataHook};
use crate::pandoc::{Pandoc, PandocCommand};
use crate::postprocess::rewrite_links;
use crate::reading_time;
use crate::debug;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Extensions the Pandoc reader handles.
pub const FILE_EXTENSIONS: &[&str] = &["md", "markdown", "mkd", "mdown"];

/// A converted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub html: String,
    pub metadata: Metadata,
}

/// Something that turns a source file into a [`Document`].
pub trait Reader: Send + Sync {
    /// Extensions (without dot) this reader is registered for.
    fn file_extensions(&self) -> &'static [&'static str];

    fn read(&self, path: &Path) -> Result<Document>;
}

/// Metadata hook shared by every document a reader converts.
pub type SharedHook = Box<dyn MetadataHook<Error = ReaderError> + Send + Sync>;

fn text_value(_key: &str, value: String) -> Result<MetaValue> {
    Ok(MetaValue::Text(value))
}

// ============================================================================
// PandocReader
// ============================================================================

/// Converts Pandoc Markdown to an HTML fragment plus metadata.
pub struct PandocReader {
    config: Arc<ReaderConfig>,
    hook: SharedHook,
}

impl PandocReader {
    pub fn new(config: Arc<ReaderConfig>) -> Self {
        Self {
            config,
            hook: Box::new(text_value),
        }
    }

    /// Replace the metadata hook. Every front matter value, and the
    /// generated `toc`, passes through it.
    pub fn with_hook<H>(mut self, hook: H) -> Self
    where
        H: MetadataHook<Error = ReaderError> + Send + Sync + 'static,
    {
        self.hook = Box::new(hook);
        self
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    fn toc_template(&self) -> Result<PathBuf> {
        match &self.config.pandoc.toc_template {
            Some(path) => Ok(path.clone()),
            None => TOC_TEMPLATE
                .materialize()
                .map_err(|err| ReaderError::Io(PathBuf::from(TOC_TEMPLATE.file_name()), err)),
        }
    }

    fn reading_time(&self, body: &str) -> Result<Option<u64>> {
        let settings = &self.config.reading_time;
        if !settings.enable {
            return Ok(None);
        }
        let rate = settings.rate()?;
        Ok(Some(reading_time::estimate(reading_time::count_words(body), rate)))
    }
}

impl Reader for PandocReader {
    fn file_extensions(&self) -> &'static [&'static str] {
        FILE_EXTENSIONS
    }

    fn read(&self, path: &Path) -> Result<Document> {
        let settings = &self.config.pandoc;
        let pandoc = Pandoc::locate(&settings.bin)?;

        let source =
            fs::read_to_string(path).map_err(|err| ReaderError::Io(path.to_path_buf(), err))?;
        let command = PandocCommand::build(settings, path)?;

        let fields = FormattedFields {
            pandoc: &pandoc,
            command: &command,
            fields: &settings.formatted_fields,
            hook: self.hook.as_ref(),
        };
        let (mut metadata, body) = meta::split(&source, &fields)?;

        let html = rewrite_links(&pandoc.run(command.argv(), body)?);

        if command.toc() {
            let template = self.toc_template()?;
            let toc = pandoc.run(&command.toc_argv(&template), body)?;
            metadata.insert("toc", self.hook.process("toc", toc)?);
        }

        if let Some(minutes) = self.reading_time(body)? {
            metadata.insert("reading_time", MetaValue::Integer(minutes));
        }

        debug!("read"; "{} ({} metadata fields)", path.display(), metadata.len());
        Ok(Document { html, metadata })
    }
}

impl fmt::Debug for PandocReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PandocReader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Renders configured fields to HTML before the host hook sees them.
struct FormattedFields<'a> {
    pandoc: &'a Pandoc,
    command: &'a PandocCommand,
    fields: &'a [String],
    hook: &'a (dyn MetadataHook<Error = ReaderError> + Send + Sync),
}

impl MetadataHook for FormattedFields<'_> {
    type Error = ReaderError;

    fn process(&self, key: &str, value: String) -> Result<MetaValue> {
        let value = if self.fields.iter().any(|field| field.eq_ignore_ascii_case(key)) {
            rewrite_links(&self.pandoc.run(self.command.argv(), &value)?)
        } else {
            value
        };
        self.hook.process(key, value)
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Extension → reader table owned by the host.
#[derive(Default, Clone)]
pub struct ReaderRegistry {
    readers: FxHashMap<String, Arc<dyn Reader>>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `reader` for `extension`, returning the reader it replaced.
    pub fn insert(
        &mut self,
        extension: impl Into<String>,
        reader: Arc<dyn Reader>,
    ) -> Option<Arc<dyn Reader>> {
        let extension = extension.into().trim_start_matches('.').to_lowercase();
        self.readers.insert(extension, reader)
    }

    pub fn get(&self, extension: &str) -> Option<Arc<dyn Reader>> {
        let extension = extension.trim_start_matches('.').to_lowercase();
        self.readers.get(&extension).cloned()
    }

    /// Reader registered for the extension of `path`.
    pub fn reader_for(&self, path: &Path) -> Option<Arc<dyn Reader>> {
        self.get(path.extension()?.to_str()?)
    }

    /// Registered extensions, sorted.
    pub fn extensions(&self) -> Vec<&str> {
        let mut extensions: Vec<_> = self.readers.keys().map(String::as_str).collect();
        extensions.sort_unstable();
        extensions
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderRegistry")
            .field("extensions", &self.extensions())
            .finish()
    }
}

/// Register a [`PandocReader`] for every Markdown extension.
pub fn register(registry: &mut ReaderRegistry, config: Arc<ReaderConfig>) -> Arc<PandocReader> {
    let reader = Arc::new(PandocReader::new(config));
    for extension in reader.file_extensions() {
        registry.insert(*extension, reader.clone());
    }
    reader
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Reader for Fixed {
        fn file_extensions(&self) -> &'static [&'static str] {
            &["txt"]
        }

        fn read(&self, _path: &Path) -> Result<Document> {
            Ok(Document {
                html: "<p>fixed</p>".into(),
                metadata: Metadata::new(),
            })
        }
    }

    #[test]
    fn test_register_markdown_extensions() {
        let mut registry = ReaderRegistry::new();
        registry.insert("txt", Arc::new(Fixed));
        register(&mut registry, Arc::new(ReaderConfig::default()));

        assert_eq!(
            registry.extensions(),
            vec!["markdown", "md", "mdown", "mkd", "txt"]
        );
        for ext in FILE_EXTENSIONS {
            let reader = registry.get(ext).unwrap();
            assert_eq!(reader.file_extensions(), FILE_EXTENSIONS);
        }
    }

    #[test]
    fn test_reader_for_path() {
        let mut registry = ReaderRegistry::new();
        registry.insert(".TXT", Arc::new(Fixed));

        let reader = registry.reader_for(Path::new("notes/a.txt")).unwrap();
        assert_eq!(reader.read(Path::new("a.txt")).unwrap().html, "<p>fixed</p>");
        assert!(registry.reader_for(Path::new("notes/a.rst")).is_none());
        assert!(registry.reader_for(Path::new("README")).is_none());
    }

    #[test]
    fn test_insert_replaces() {
        let mut registry = ReaderRegistry::new();
        assert!(registry.insert("md", Arc::new(Fixed)).is_none());
        assert!(registry.insert("md", Arc::new(Fixed)).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_missing_converter_checked_first() {
        let mut config = ReaderConfig::default();
        config.pandoc.bin = "definitely-not-pandoc-4242".into();
        let reader = PandocReader::new(Arc::new(config));

        // The file does not exist either; the converter check wins.
        let err = reader.read(Path::new("/nowhere/post.md")).unwrap_err();
        assert_eq!(err.to_string(), "Could not find Pandoc. Please install.");
    }

    #[test]
    fn test_document_json() {
        let mut metadata = Metadata::new();
        metadata.insert("title", "Hi");
        let doc = Document {
            html: "<p>x</p>".into(),
            metadata,
        };
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"html":"<p>x</p>","metadata":{"title":"Hi"}}"#
        );
    }
}
