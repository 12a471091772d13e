//! # RvScripts
//!
//! A pure-Rust library for pulling the Ruby scripts out of RPG Maker VX Ace
//! script containers (`Scripts.rvdata2`).
//!
//! ## Supported Formats
//!
//! - **Marshal 4.8** - Ruby's binary serialization used by RPG Maker data files, decoded with `marshal-rs`
//! - **Script containers** - `[id, name, code]` entries with zlib-compressed bodies
//!
//! ## Quick Start
//!
//! ### Extracting a Container
//!
//! ```no_run
//! use rvscripts::extract::extract_scripts;
//!
//! let report = extract_scripts("Scripts.rvdata2", "Scripts")?;
//! for path in report.manifest() {
//!     println!("{path}");
//! }
//! # Ok::<(), rvscripts::Error>(())
//! ```
//!
//! Records whose name contains `▼` start a flat folder, `■` a nested
//! `/`-delimited folder; every other named record is written as
//! `{index}_{name}.rb` into the most recent folder.
//!
//! ### Reading Records Only
//!
//! ```no_run
//! use rvscripts::formats::load_scripts;
//!
//! let records = load_scripts("Scripts.rvdata2")?;
//! println!("Found {} records", records.len());
//! # Ok::<(), rvscripts::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `rvscripts` command-line binary

pub mod error;
pub mod formats;
pub mod compression;
pub mod extract;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::{
        MarshalDecoder, ScriptContent, ScriptDecoder, ScriptRecord, load_scripts,
    };
    pub use crate::extract::{
        ExtractionObserver, ExtractionOptions, ExtractionReport, RecordOutcome,
        ScriptExtractor, TracingObserver, extract_scripts,
    };
    pub use crate::utils::{create_directory_structure, normalize_content, sanitize_filename};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
