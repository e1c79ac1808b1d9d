//! Check command implementation.

use anyhow::Result;
use pandoc_reader::{ReaderConfig, debug, log, pandoc::Pandoc};
use std::path::Path;

/// Load and validate the configuration.
///
/// Covers the `[pandoc]` arguments, every defaults file, the reading rate
/// and the converter binary itself.
pub fn run_check(config_path: Option<&Path>) -> Result<()> {
    let config = ReaderConfig::load(config_path)?;
    config.validate()?;

    if let Ok(pandoc) = Pandoc::locate(&config.pandoc.bin) {
        debug!("check"; "converter: {}", pandoc.path().display());
    }

    if config.config_path.as_os_str().is_empty() {
        log!("check"; "no config file found, defaults are valid");
    } else {
        log!("check"; "{} is valid", config.config_path.display());
    }
    Ok(())
}
