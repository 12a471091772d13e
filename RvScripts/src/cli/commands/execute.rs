//! Command execution implementations

use super::Commands;
use super::{extract, list};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Extract {
                source,
                destination,
                manifest,
                report,
                raw,
                no_header,
                quiet,
            } => extract::execute(
                source,
                destination,
                manifest.as_deref(),
                report.as_deref(),
                *raw,
                *no_header,
                *quiet,
            ),
            Commands::List { source, json } => list::execute(source, *json),
        }
    }
}
