//! Library side of the `tresso` binary: argument parsing, dispatch and output

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod placement;

pub use cli::{Cli, Commands, OutputFormat};
pub use commands::App;
pub use error::{CliError, Result};
