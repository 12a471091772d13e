//! CLI command for script extraction

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use indicatif::ProgressBar;

use crate::cli::progress::{DISK, LOOKING_GLASS, print_done, print_step, simple_bar};
use crate::extract::{
    ExtractionObserver, ExtractionOptions, ScriptExtractor, Tee, TracingObserver,
};

/// Drives a progress bar from extraction events
#[derive(Default)]
struct ProgressObserver {
    bar: Option<ProgressBar>,
}

impl ProgressObserver {
    fn advance(&self, index: usize, name: &str) {
        if let Some(pb) = &self.bar {
            pb.set_position(index as u64);
            pb.set_message(name.to_string());
        }
    }
}

impl ExtractionObserver for ProgressObserver {
    fn on_decoded(&mut self, total: usize) {
        print_step(2, 2, DISK, &format!("Writing {total} records..."));
        self.bar = Some(simple_bar(total as u64, "Writing"));
    }

    fn on_folder(&mut self, index: usize, name: &str, _dir: &Path) {
        self.advance(index, name);
    }

    fn on_saved(&mut self, index: usize, name: &str, _path: &Path) {
        self.advance(index, name);
    }

    fn on_failed(&mut self, index: usize, name: &str, _reason: &str) {
        self.advance(index, name);
    }

    fn on_finished(&mut self, _total: usize) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }
}

/// Extract a script container
pub fn execute(
    source: &Path,
    destination: &Path,
    manifest: Option<&Path>,
    report_path: Option<&Path>,
    raw: bool,
    no_header: bool,
    quiet: bool,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let options = ExtractionOptions::new()
        .with_inflate_bodies(!raw)
        .with_header(!no_header);
    let extractor = ScriptExtractor::new(options);

    let mut logger = TracingObserver;
    let result = if quiet {
        extractor.extract(source, destination, &mut logger)
    } else {
        print_step(1, 2, LOOKING_GLASS, &format!("Reading {}...", source.display()));
        let mut progress = ProgressObserver::default();
        let mut observer = Tee::new(&mut logger, &mut progress);
        extractor.extract(source, destination, &mut observer)
    };
    let report = result.with_context(|| format!("failed to extract {}", source.display()))?;

    if let Some(path) = manifest {
        report
            .write_manifest(path)
            .with_context(|| format!("failed to write manifest {}", path.display()))?;
    }
    if let Some(path) = report_path {
        std::fs::write(path, report.to_json()?)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    if !quiet {
        println!();
        println!("Extraction complete: {}", destination.display());
        println!("  Records: {}", report.total_records);
        println!("  Folders: {}", report.folder_count());
        println!("  Scripts: {}", report.written_count());
        println!("  Failed: {}", report.failed_count());

        if report.failed_count() > 0 {
            println!();
            println!("Failures:");
            for (name, reason) in report.failures() {
                println!("  {name}: {reason}");
            }
        }
        print_done(start.elapsed());
    }

    Ok(())
}
