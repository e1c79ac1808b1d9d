//! Command-line interface module.

mod args;
pub mod check;
pub mod init;
pub mod read;

pub use args::{Cli, Commands, ReadArgs};
