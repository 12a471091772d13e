//! Script extraction module
//!
//! Turns a script container into a folder tree of script files. The
//! container is decoded by a [`ScriptDecoder`](crate::formats::ScriptDecoder),
//! records are handled one by one in container order, and every event is
//! reported to an [`ExtractionObserver`].

mod extraction_options;
mod extractor;
mod observer;
mod report;

// Primary public API
pub use extractor::{
    ENCODING_HEADER, ExtractionState, FLAT_MARKER, FolderMarker, NESTED_MARKER, RecordKind,
    ScriptExtractor, extract_scripts,
};
pub use extraction_options::{DEFAULT_INPUT, DEFAULT_OUTPUT, ExtractionOptions};
pub use observer::{ExtractionObserver, NullObserver, Tee, TracingObserver};
pub use report::{ExtractionReport, RecordOutcome};
