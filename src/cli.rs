use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pasteup",
    about = "Upload files and snippets to a paste host and copy the link"
)]
pub struct Cli {
    /// Config file (defaults to config.toml in the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preferences file holding the selected backend
    #[arg(long, global = true)]
    pub preferences: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload one or more files, one after another
    Upload {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print one JSON line per path, including paths that could not be read
        #[arg(long)]
        json: bool,
    },

    /// Upload a text snippet, read from stdin when not given
    Paste {
        text: Option<String>,

        /// Print the result as a JSON line
        #[arg(long)]
        json: bool,
    },

    /// Inspect or change the selected backend
    Backend {
        #[command(subcommand)]
        action: BackendAction,
    },
}

#[derive(Subcommand)]
pub enum BackendAction {
    /// List registered backends, marking the selected one
    List,
    /// Print the selected backend
    Show,
    /// Select the backend used for subsequent uploads
    Select { name: String },
}
