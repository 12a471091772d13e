//! Extraction event reporting
//!
//! The driver never logs directly; it reports to an [`ExtractionObserver`]
//! that lives for one run. [`TracingObserver`] forwards to `tracing`.

use std::path::Path;

/// Receives progress events from one extraction pass.
pub trait ExtractionObserver {
    /// The container is about to be read.
    fn on_start(&mut self, _input: &Path) {}

    /// The container was decoded into `total` records.
    fn on_decoded(&mut self, _total: usize) {}

    /// A folder marker switched the current directory.
    fn on_folder(&mut self, _index: usize, _name: &str, _dir: &Path) {}

    /// A leaf script was written.
    fn on_saved(&mut self, _index: usize, _name: &str, _path: &Path) {}

    /// A leaf script could not be written; the pass continues.
    fn on_failed(&mut self, _index: usize, _name: &str, _reason: &str) {}

    /// The pass is over.
    fn on_finished(&mut self, _total: usize) {}
}

/// Observer that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ExtractionObserver for TracingObserver {
    fn on_start(&mut self, input: &Path) {
        tracing::info!("Processing file: {}", input.display());
    }

    fn on_decoded(&mut self, total: usize) {
        tracing::debug!("Decoded {total} records");
    }

    fn on_folder(&mut self, index: usize, name: &str, dir: &Path) {
        tracing::debug!("[{index}] Folder '{name}' -> {}", dir.display());
    }

    fn on_saved(&mut self, _index: usize, _name: &str, path: &Path) {
        tracing::info!("Saved script: {}", path.display());
    }

    fn on_failed(&mut self, _index: usize, name: &str, reason: &str) {
        tracing::error!("Failed to process script {name}: {reason}");
    }

    fn on_finished(&mut self, total: usize) {
        tracing::info!("Total scripts processed: {total}");
    }
}

/// Observer that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ExtractionObserver for NullObserver {}

/// Forward every event to two observers, e.g. logging plus a progress bar.
pub struct Tee<'a> {
    first: &'a mut dyn ExtractionObserver,
    second: &'a mut dyn ExtractionObserver,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a mut dyn ExtractionObserver, second: &'a mut dyn ExtractionObserver) -> Self {
        Self { first, second }
    }
}

impl ExtractionObserver for Tee<'_> {
    fn on_start(&mut self, input: &Path) {
        self.first.on_start(input);
        self.second.on_start(input);
    }

    fn on_decoded(&mut self, total: usize) {
        self.first.on_decoded(total);
        self.second.on_decoded(total);
    }

    fn on_folder(&mut self, index: usize, name: &str, dir: &Path) {
        self.first.on_folder(index, name, dir);
        self.second.on_folder(index, name, dir);
    }

    fn on_saved(&mut self, index: usize, name: &str, path: &Path) {
        self.first.on_saved(index, name, path);
        self.second.on_saved(index, name, path);
    }

    fn on_failed(&mut self, index: usize, name: &str, reason: &str) {
        self.first.on_failed(index, name, reason);
        self.second.on_failed(index, name, reason);
    }

    fn on_finished(&mut self, total: usize) {
        self.first.on_finished(total);
        self.second.on_finished(total);
    }
}
