//! Init command implementation.

use anyhow::{Context, Result, bail};
use pandoc_reader::{ReaderConfig, config::CONFIG_FILE, log};
use std::{fs, path::Path};

/// Write the commented config template to `pandoc-reader.toml`.
///
/// With `dry` the template is printed instead.
pub fn run_init(dry: bool, force: bool) -> Result<()> {
    let template = ReaderConfig::template();
    if dry {
        print!("{template}");
        return Ok(());
    }

    let path = Path::new(CONFIG_FILE);
    if path.exists() && !force {
        bail!("`{CONFIG_FILE}` already exists (use --force to overwrite)");
    }

    fs::write(path, template).with_context(|| format!("failed to write `{CONFIG_FILE}`"))?;
    log!("init"; "wrote {}", CONFIG_FILE);
    Ok(())
}
