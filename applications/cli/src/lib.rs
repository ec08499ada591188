//! `userdir` command-line front end
//!
//! Renders the user directory in the terminal: argument parsing, configuration
//! loading and the per-command glue over [`userdir_store::Directory`].

pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use cli::{Cli, Commands};
pub use config::CliConfig;
pub use error::{CliError, Result};
pub use session::Session;
