//! Read command implementation.
//!
//! Converts each file and prints one JSON object per line:
//!
//! ```text
//! {"path":"posts/a.md","html":"<p>…</p>","metadata":{"title":"A"}}
//! ```

use super::ReadArgs;
use anyhow::{Context, Result};
use pandoc_reader::{Document, ReaderConfig, ReaderRegistry, log, register};
use serde::Serialize;
use std::{
    io::{self, Write},
    path::Path,
    sync::Arc,
};

/// One converted file as printed on stdout.
#[derive(Debug, Serialize)]
struct ReadOutput<'a> {
    path: String,
    #[serde(flatten)]
    document: &'a Document,
}

/// Execute read command
pub fn run_read(args: &ReadArgs, config_path: Option<&Path>) -> Result<()> {
    let config = Arc::new(ReaderConfig::load(config_path)?);

    let mut registry = ReaderRegistry::new();
    register(&mut registry, config);

    let mut stdout = io::stdout().lock();
    for path in &args.paths {
        let reader = registry.reader_for(path).with_context(|| {
            format!(
                "no reader for `{}` (known extensions: {})",
                path.display(),
                registry.extensions().join(", ")
            )
        })?;

        let document = reader
            .read(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;

        let output = ReadOutput {
            path: path.display().to_string(),
            document: &document,
        };
        let json = if args.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        writeln!(stdout, "{json}")?;
    }
    stdout.flush()?;

    let count = args.paths.len();
    log!("read"; "converted {} file{}", count, if count == 1 { "" } else { "s" });
    Ok(())
}
