use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fernotes")]
#[command(about = "Outline-driven note hierarchy editor", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace database file (defaults to the platform data directory)
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an outline file into the workspace and print the tree
    #[command(alias = "p")]
    Parse {
        /// Outline text file ("-" reads stdin)
        file: PathBuf,
    },

    /// Print the parsed note tree
    #[command(alias = "ls")]
    Show,

    /// Print the stored outline text
    Text,

    /// Attach content and/or aliases to a note path
    Set {
        /// Note path, e.g. "Project/Tasks"
        path: String,

        /// Content string (an empty string clears it)
        #[arg(long)]
        content: Option<String>,

        /// Read the content from a file instead
        #[arg(long, conflicts_with = "content")]
        content_file: Option<PathBuf>,

        /// Comma-separated aliases (an empty string clears them)
        #[arg(long)]
        aliases: Option<String>,
    },

    /// Export the workspace as JSON
    Export {
        /// Output file ("-" writes stdout)
        out: PathBuf,
    },

    /// Import a JSON export, replacing the workspace
    Import {
        /// Input file
        file: PathBuf,
    },
}
