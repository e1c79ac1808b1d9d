//! Errors returned by the reader.

use crate::config::ConfigError;
use crate::meta::FrontMatterError;
use crate::pandoc::DefaultsError;
use crate::utils::exec::ExecError;
use std::{io, path::PathBuf, process::ExitStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("IO error when reading `{}`", .0.display())]
    Io(PathBuf, #[source] io::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error("Argument {0} is not supported.")]
    UnsupportedArgument(String),

    #[error("{}: {error}", path.display())]
    Defaults { path: PathBuf, error: DefaultsError },

    #[error("Could not find Pandoc. Please install.")]
    ConverterNotFound(String),

    #[error("`{command}` failed with {status}\n{stderr}")]
    ConverterExecution {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error(transparent)]
    Exec(ExecError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("metadata field `{key}`: {message}")]
    Hook { key: String, message: String },
}

impl ReaderError {
    /// Error for a host hook that rejected a metadata value.
    pub fn hook(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Hook {
            key: key.into(),
            message: message.into(),
        }
    }
}

pub type Result<T, E = ReaderError> = std::result::Result<T, E>;
