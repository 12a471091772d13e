//! Script extraction
//!
//! The pass is a fold over the records in container order. The state is the
//! current output directory and the folder counter; folder markers replace
//! the state, leaf scripts are written into whatever directory the last
//! marker selected.
//!
//! # Output Structure
//!
//! ```text
//! Scripts/
//!   1_Modules/              # "▼ Modules": flat, sanitized as one segment
//!     2_Vocab.rb
//!     3_Sound.rb
//!   2_Battle/               # "■ Battle/Core": nested, split on '/'
//!     Core/
//!       5_Scene_Battle.rb
//! ```

use std::borrow::Cow;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::extraction_options::ExtractionOptions;
use super::observer::{ExtractionObserver, TracingObserver};
use super::report::{ExtractionReport, RecordOutcome};
use crate::compression::inflate_script_body;
use crate::error::{Error, Result};
use crate::formats::{MarshalDecoder, ScriptContent, ScriptDecoder, ScriptRecord};
use crate::utils::{
    create_directory_structure, ensure_dir, normalize_content, sanitize_or_fallback, split_lines,
};

/// Glyph marking a flat folder
pub const FLAT_MARKER: char = '▼';

/// Glyph marking a nested folder
pub const NESTED_MARKER: char = '■';

/// First line of every written script
pub const ENCODING_HEADER: &str = "# encoding: utf-8";

/// Folder marker kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FolderMarker {
    /// `▼`: one directory directly under the output root
    Flat,
    /// `■`: a `/`-delimited directory path under the output root
    Nested,
}

impl FolderMarker {
    /// Detect a marker in a record name. `▼` takes precedence over `■`.
    pub fn detect(name: &str) -> Option<Self> {
        if name.contains(FLAT_MARKER) {
            Some(FolderMarker::Flat)
        } else if name.contains(NESTED_MARKER) {
            Some(FolderMarker::Nested)
        } else {
            None
        }
    }

    pub fn glyph(self) -> char {
        match self {
            FolderMarker::Flat => FLAT_MARKER,
            FolderMarker::Nested => NESTED_MARKER,
        }
    }

    /// The folder label: the name without this marker's glyph, trimmed.
    pub fn label(self, name: &str) -> String {
        name.replace(self.glyph(), "").trim().to_string()
    }
}

/// How a record is treated by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// No name; skipped
    Empty,
    /// Folder marker
    Folder(FolderMarker),
    /// Leaf script
    Script,
}

impl RecordKind {
    pub fn of(record: &ScriptRecord) -> Self {
        match record.display_name() {
            None => RecordKind::Empty,
            Some(name) => FolderMarker::detect(name).map_or(RecordKind::Script, RecordKind::Folder),
        }
    }
}

/// Fold state threaded through the record stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionState {
    /// Directory leaf scripts are currently written to
    pub current_dir: PathBuf,
    /// Number of folder markers seen so far
    pub folder_counter: usize,
}

impl ExtractionState {
    pub fn new(root: &Path) -> Self {
        Self {
            current_dir: root.to_path_buf(),
            folder_counter: 0,
        }
    }
}

/// Extracts script containers into a directory tree.
///
/// # Example
///
/// ```no_run
/// use rvscripts::extract::{ExtractionOptions, ScriptExtractor, TracingObserver};
///
/// let extractor = ScriptExtractor::new(ExtractionOptions::new());
/// let report = extractor.extract("Scripts.rvdata2", "Scripts", &mut TracingObserver)?;
/// println!("{} scripts written", report.written_count());
/// # Ok::<(), rvscripts::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ScriptExtractor<D = MarshalDecoder> {
    options: ExtractionOptions,
    decoder: D,
}

impl ScriptExtractor<MarshalDecoder> {
    /// Create an extractor using the Marshal decoder.
    pub fn new(options: ExtractionOptions) -> Self {
        Self {
            options,
            decoder: MarshalDecoder,
        }
    }
}

impl Default for ScriptExtractor<MarshalDecoder> {
    fn default() -> Self {
        Self::new(ExtractionOptions::default())
    }
}

impl<D: ScriptDecoder> ScriptExtractor<D> {
    /// Swap the container decoder.
    pub fn with_decoder<E: ScriptDecoder>(self, decoder: E) -> ScriptExtractor<E> {
        ScriptExtractor {
            options: self.options,
            decoder,
        }
    }

    /// Decode `input` and extract every record under `output`.
    ///
    /// # Errors
    ///
    /// Fails if the input cannot be opened or decoded, or if the output root
    /// or a folder directory cannot be created. Failures writing individual
    /// scripts are recorded in the report instead.
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<ExtractionReport> {
        let input = input.as_ref();
        let output = output.as_ref();
        observer.on_start(input);

        let file = File::open(input).map_err(|source| Error::InputUnreadable {
            path: input.to_path_buf(),
            source,
        })?;
        let records = {
            let mut reader = BufReader::new(file);
            self.decoder.decode(&mut reader)?
        };
        observer.on_decoded(records.len());

        self.extract_records(&records, output, observer)
    }

    /// Extract already decoded records under `output`.
    ///
    /// # Errors
    ///
    /// Fails if the output root or a folder directory cannot be created.
    pub fn extract_records(
        &self,
        records: &[ScriptRecord],
        output: &Path,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<ExtractionReport> {
        ensure_dir(output)?;

        let mut outcomes = Vec::with_capacity(records.len());
        records.iter().enumerate().try_fold(
            ExtractionState::new(output),
            |state, (i, record)| -> Result<ExtractionState> {
                let (next, outcome) = self.step(state, output, i + 1, record, observer)?;
                outcomes.push(outcome);
                Ok(next)
            },
        )?;

        observer.on_finished(records.len());
        Ok(ExtractionReport {
            total_records: records.len(),
            outcomes,
        })
    }

    /// Handle one record (1-based `index`) and return the next state.
    ///
    /// # Errors
    ///
    /// Only folder directory creation is fatal; see [`ScriptExtractor::extract`].
    pub fn step(
        &self,
        state: ExtractionState,
        root: &Path,
        index: usize,
        record: &ScriptRecord,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<(ExtractionState, RecordOutcome)> {
        let Some(name) = record.display_name() else {
            return Ok((state, RecordOutcome::Skipped { index }));
        };

        if let Some(marker) = FolderMarker::detect(name) {
            let folder_counter = state.folder_counter + 1;
            let group = format!("{folder_counter}_{}", marker.label(name));
            let dir = match marker {
                FolderMarker::Flat => {
                    let dir = root.join(sanitize_or_fallback(&group));
                    ensure_dir(&dir)?;
                    dir
                }
                FolderMarker::Nested => create_directory_structure(root, &group)?,
            };
            observer.on_folder(index, name, &dir);
            let outcome = RecordOutcome::Folder {
                index,
                name: name.to_string(),
                dir: dir.clone(),
            };
            let next = ExtractionState {
                current_dir: dir,
                folder_counter,
            };
            return Ok((next, outcome));
        }

        let outcome = match self.write_script(&state.current_dir, index, name, &record.content) {
            Ok(path) => {
                observer.on_saved(index, name, &path);
                RecordOutcome::Written {
                    index,
                    name: name.to_string(),
                    path,
                }
            }
            Err(e) => {
                let reason = e.to_string();
                observer.on_failed(index, name, &reason);
                RecordOutcome::Failed {
                    index,
                    name: name.to_string(),
                    reason,
                }
            }
        };
        Ok((state, outcome))
    }

    /// File name for a leaf script: `{index}_{sanitized name}.{extension}`.
    pub fn script_file_name(&self, index: usize, name: &str) -> String {
        format!("{index}_{}.{}", sanitize_or_fallback(name), self.options.extension)
    }

    /// Inflate a compressed byte body when the options ask for it.
    fn inflate<'a>(&self, content: &'a ScriptContent) -> Cow<'a, ScriptContent> {
        match content {
            ScriptContent::Bytes(bytes) if self.options.inflate_bodies => match inflate_script_body(bytes) {
                Cow::Owned(inflated) => Cow::Owned(ScriptContent::Bytes(inflated)),
                Cow::Borrowed(_) => Cow::Borrowed(content),
            },
            _ => Cow::Borrowed(content),
        }
    }

    /// Render the file contents for a leaf script.
    ///
    /// The body is split on every line break (CR, VT, FF and the Unicode
    /// separators included) and rejoined with LF under the header.
    pub fn render_script(&self, name: &str, content: &ScriptContent) -> String {
        let body = normalize_content(&self.inflate(content));

        let name_line = format!("# Name: {name}");
        let mut lines: Vec<&str> = Vec::new();
        if self.options.write_header {
            lines.push(ENCODING_HEADER);
            lines.push(&name_line);
        }
        lines.extend(split_lines(&body));
        lines.join("\n").trim().to_string()
    }

    fn write_script(
        &self,
        dir: &Path,
        index: usize,
        name: &str,
        content: &ScriptContent,
    ) -> Result<PathBuf> {
        let path = dir.join(self.script_file_name(index, name));
        let contents = self.render_script(name, content);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

/// Extract `input` into `output` with default options, logging through `tracing`.
///
/// # Errors
///
/// See [`ScriptExtractor::extract`].
pub fn extract_scripts<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<ExtractionReport> {
    ScriptExtractor::new(ExtractionOptions::new()).extract(input, output, &mut TracingObserver)
}
