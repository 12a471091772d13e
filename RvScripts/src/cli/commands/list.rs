//! CLI command for listing container records

use std::path::Path;

use serde::Serialize;

use crate::extract::{FolderMarker, RecordKind};
use crate::formats::load_scripts;

#[derive(Serialize)]
struct ListedRecord<'a> {
    index: usize,
    id: i64,
    kind: RecordKind,
    name: Option<&'a str>,
    size: usize,
}

fn kind_label(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Empty => "empty",
        RecordKind::Folder(FolderMarker::Flat) => "folder",
        RecordKind::Folder(FolderMarker::Nested) => "nested",
        RecordKind::Script => "script",
    }
}

pub fn execute(source: &Path, json: bool) -> anyhow::Result<()> {
    let records = load_scripts(source)?;

    let listed: Vec<ListedRecord> = records
        .iter()
        .enumerate()
        .map(|(i, record)| ListedRecord {
            index: i + 1,
            id: record.id,
            kind: RecordKind::of(record),
            name: record.name.as_deref(),
            size: record.content.len(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    println!("{} records in {}", listed.len(), source.display());
    for entry in &listed {
        println!(
            "{:>5}  {:>10}  {:8}  {:>8}  {}",
            entry.index,
            entry.id,
            kind_label(entry.kind),
            entry.size,
            entry.name.unwrap_or("")
        );
    }

    Ok(())
}
