//! Per-record outcomes and the run report

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::utils::normalize_path;

/// What happened to a single record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Unnamed record, ignored
    Skipped { index: usize },
    /// Folder marker; `dir` became the current directory
    Folder { index: usize, name: String, dir: PathBuf },
    /// Leaf script written to `path`
    Written { index: usize, name: String, path: PathBuf },
    /// Leaf script that could not be written
    Failed { index: usize, name: String, reason: String },
}

impl RecordOutcome {
    /// 1-based position of the record in the container.
    pub fn index(&self) -> usize {
        match self {
            RecordOutcome::Skipped { index }
            | RecordOutcome::Folder { index, .. }
            | RecordOutcome::Written { index, .. }
            | RecordOutcome::Failed { index, .. } => *index,
        }
    }
}

/// Result of an extraction pass
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Number of records decoded from the container
    pub total_records: usize,
    /// One outcome per record, in container order
    pub outcomes: Vec<RecordOutcome>,
}

impl ExtractionReport {
    /// Paths of the written files, in order, with `/` separators.
    pub fn manifest(&self) -> Vec<String> {
        self.written_paths().map(normalize_path).collect()
    }

    /// Paths of the written files, in order.
    pub fn written_paths(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match o {
            RecordOutcome::Written { path, .. } => Some(path.as_path()),
            _ => None,
        })
    }

    /// `(name, reason)` for every record that failed.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            RecordOutcome::Failed { name, reason, .. } => Some((name.as_str(), reason.as_str())),
            _ => None,
        })
    }

    pub fn written_count(&self) -> usize {
        self.written_paths().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn folder_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Folder { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Skipped { .. }))
            .count()
    }

    /// Write the manifest, one path per line.
    pub fn write_manifest<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut contents = String::new();
        for line in self.manifest() {
            contents.push_str(&line);
            contents.push('\n');
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Serialize the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExtractionReport {
        ExtractionReport {
            total_records: 4,
            outcomes: vec![
                RecordOutcome::Folder {
                    index: 1,
                    name: "▼ Base".to_string(),
                    dir: PathBuf::from("out/1_Base"),
                },
                RecordOutcome::Written {
                    index: 2,
                    name: "Vocab".to_string(),
                    path: PathBuf::from("out\\1_Base\\2_Vocab.rb"),
                },
                RecordOutcome::Skipped { index: 3 },
                RecordOutcome::Failed {
                    index: 4,
                    name: "Bad".to_string(),
                    reason: "denied".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_counts_and_manifest() {
        let report = sample();
        assert_eq!(report.written_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.folder_count(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.manifest(), vec!["out/1_Base/2_Vocab.rb".to_string()]);
        assert_eq!(report.failures().collect::<Vec<_>>(), vec![("Bad", "denied")]);
        assert_eq!(report.outcomes[3].index(), 4);
    }

    #[test]
    fn test_json_tags_outcomes() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"outcome\": \"written\""));
        assert!(json.contains("\"total_records\": 4"));
    }
}
