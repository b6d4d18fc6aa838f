pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quarry")]
#[command(about = "Peer identity, repo bootstrap and dataset reference resolution")]
pub struct Args {
    /// Path to the quarry repo directory (defaults to ~/.quarry)
    #[arg(long, global = true)]
    pub repo_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
