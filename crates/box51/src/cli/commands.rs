//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Box51 - store assets under collision-free keys and derive image variations
#[derive(Parser, Debug)]
#[command(name = "box51")]
#[command(about = "Store assets under collision-free keys and derive image variations")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ~/.config/box51/box51.toml and ./box51.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Asset root, overriding any configuration file
    #[arg(long, global = true)]
    pub asset_root: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Store a local file and print its descriptor
    Store {
        /// File to upload
        path: PathBuf,

        /// Name to store under instead of the file stem
        #[arg(long)]
        name: Option<String>,

        /// Keep the asset in temporary storage until promoted
        #[arg(long)]
        temporary: bool,
    },

    /// Copy a stored asset to a local file
    Retrieve {
        /// Store key of the asset
        key: String,

        /// Destination path
        out: PathBuf,
    },

    /// Move a temporary asset and its variations to permanent storage
    Promote {
        /// Store key of the asset
        key: String,
    },

    /// Delete an asset and all of its variations
    Remove {
        /// Store key of the asset
        key: String,
    },

    /// Generate variations from a JSON recipe file
    Vary {
        /// Store key of the source image
        key: String,

        /// JSON object mapping variation names to operation lists
        recipe: PathBuf,
    },
}
