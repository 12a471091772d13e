use clap::Subcommand;
use std::path::PathBuf;

use crate::extract::{DEFAULT_INPUT, DEFAULT_OUTPUT};

pub mod execute;
pub mod extract;
pub mod list;

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every script of a container into a folder tree
    Extract {
        /// Source script container
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        source: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        destination: PathBuf,

        /// Write the list of created files (one path per line)
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Write a JSON report with the outcome of every record
        #[arg(long)]
        report: Option<PathBuf>,

        /// Keep script bodies as stored (skip zlib inflation)
        #[arg(long)]
        raw: bool,

        /// Do not prepend the encoding/name header
        #[arg(long)]
        no_header: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the records of a script container
    List {
        /// Source script container
        #[arg(default_value = DEFAULT_INPUT)]
        source: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
