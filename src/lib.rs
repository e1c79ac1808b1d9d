//! Pandoc Markdown reader.
//!
//! Converts Markdown files that start with a `---` header block into an
//! HTML5 fragment (rendered by an external `pandoc`) plus an ordered
//! metadata map.
//!
//! ```ignore
//! use pandoc_reader::{PandocReader, Reader, ReaderConfig};
//!
//! let reader = PandocReader::new(Arc::new(ReaderConfig::load(None)?));
//! let doc = reader.read(Path::new("posts/hello.md"))?;
//! println!("{}", doc.metadata.text("title").unwrap_or_default());
//! ```
//!
//! # Modules
//!
//! | Module         | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `meta`         | Metadata model, front matter parsing, hooks      |
//! | `pandoc`       | Command building, defaults files, invocation     |
//! | `reader`       | `Reader` trait, `PandocReader`, registry         |
//! | `config`       | `pandoc-reader.toml` loading and validation      |
//! | `reading_time` | Word counting and reading time                   |
//! | `postprocess`  | Placeholder link restoration                     |

pub mod config;
pub mod embed;
pub mod error;
pub mod logger;
pub mod meta;
pub mod pandoc;
pub mod postprocess;
pub mod reader;
pub mod reading_time;
pub mod utils;

pub use config::ReaderConfig;
pub use error::{ReaderError, Result};
pub use meta::{FrontMatterError, MetaValue, Metadata, MetadataHook, TextValues};
pub use reader::{Document, FILE_EXTENSIONS, PandocReader, Reader, ReaderRegistry, register};
