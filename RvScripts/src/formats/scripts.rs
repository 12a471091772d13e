//! Script container (`Scripts.rvdata2`) decoding
//!
//! The container is a Marshal array of `[id, name, code]` triples kept in
//! the order the editor lists them. Folder markers are ordinary entries whose
//! name carries a marker glyph; see [`crate::extract`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::marshal::{kind, parse_marshal_bytes, string_bytes};
use crate::error::{Error, Result};

/// Raw script body as handed over by a decoder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum ScriptContent {
    Bytes(Vec<u8>),
    Text(String),
}

impl ScriptContent {
    pub fn len(&self) -> usize {
        match self {
            ScriptContent::Bytes(bytes) => bytes.len(),
            ScriptContent::Text(text) => text.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One decoded entry of a script container
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptRecord {
    pub id: i64,
    pub name: Option<String>,
    #[serde(skip)]
    pub content: ScriptContent,
}

impl ScriptRecord {
    pub fn new(id: i64, name: Option<&str>, content: ScriptContent) -> Self {
        Self {
            id,
            name: name.map(str::to_string),
            content,
        }
    }

    /// The record's name if it is present and non-empty.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Turns a container byte stream into records, in storage order.
pub trait ScriptDecoder {
    /// Decode every record in the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if the stream cannot be read or is not a script container.
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<ScriptRecord>>;
}

/// Decoder for Marshal 4.8 script containers (`.rvdata2`, `.rvdata`, `.rxdata`)
#[derive(Debug, Clone, Copy, Default)]
pub struct MarshalDecoder;

impl ScriptDecoder for MarshalDecoder {
    fn decode(&self, reader: &mut dyn Read) -> Result<Vec<ScriptRecord>> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        let root = parse_marshal_bytes(&data)?;
        records_from_value(&root)
    }
}

/// Load every record of a container file with [`MarshalDecoder`]
///
/// # Errors
///
/// Returns [`Error::InputUnreadable`] if the file cannot be opened, or a
/// decode error if it is not a script container.
pub fn load_scripts<P: AsRef<Path>>(path: P) -> Result<Vec<ScriptRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::InputUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    MarshalDecoder.decode(&mut reader)
}

/// Map a decoded Marshal tree to script records
///
/// # Errors
///
/// Returns [`Error::InvalidScriptContainer`] if the tree is not an array of
/// `[Integer, String|nil, String|nil]` entries.
pub fn records_from_value(root: &Value) -> Result<Vec<ScriptRecord>> {
    let entries = root.as_array().ok_or_else(|| Error::InvalidScriptContainer {
        message: format!("expected an array at the root, found {}", kind(root)),
    })?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| record_from_entry(index, entry))
        .collect()
}

fn record_from_entry(index: usize, entry: &Value) -> Result<ScriptRecord> {
    let invalid = |message: String| Error::InvalidScriptContainer {
        message: format!("entry {index}: {message}"),
    };

    let fields = entry
        .as_array()
        .ok_or_else(|| invalid(format!("expected an array, found {}", kind(entry))))?;
    let [id, name, code, ..] = fields.as_slice() else {
        return Err(invalid(format!("expected 3 fields, found {}", fields.len())));
    };

    let id = id
        .as_i64()
        .ok_or_else(|| invalid(format!("id is {}, not an integer", kind(id))))?;

    let name = match name {
        Value::Null => None,
        other => match string_bytes(other) {
            Some(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            None => return Err(invalid(format!("name is {}, not a string", kind(other)))),
        },
    };

    let content = match code {
        Value::Null => ScriptContent::Bytes(Vec::new()),
        other => match string_bytes(other) {
            Some(bytes) => ScriptContent::Bytes(bytes.into_owned()),
            None => return Err(invalid(format!("code is {}, not a string", kind(other)))),
        },
    };

    Ok(ScriptRecord { id, name, content })
}
