//! Command-line interface for the box51 binary.

mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{CommandOutput, execute, load_config, read_recipes};
