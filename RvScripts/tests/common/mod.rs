//! Helpers for building script containers in tests

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::ZlibEncoder;
use rvscripts::extract::ExtractionObserver;

/// One container entry: id, name, body bytes as stored
pub struct Entry {
    pub id: i64,
    pub name: Option<String>,
    pub body: Vec<u8>,
}

/// Named entry with a zlib-compressed body, the way the editor stores scripts
pub fn script(id: i64, name: &str, source: &str) -> Entry {
    Entry {
        id,
        name: Some(name.to_string()),
        body: deflate(source.as_bytes()),
    }
}

/// Named entry with an uncompressed body
pub fn raw_script(id: i64, name: &str, body: &[u8]) -> Entry {
    Entry {
        id,
        name: Some(name.to_string()),
        body: body.to_vec(),
    }
}

/// Folder marker entry (empty body)
pub fn folder(id: i64, name: &str) -> Entry {
    script(id, name, "")
}

/// Entry with a nil name
pub fn unnamed(id: i64) -> Entry {
    Entry {
        id,
        name: None,
        body: Vec::new(),
    }
}

pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn write_fixnum(out: &mut Vec<u8>, n: i64) {
    if n == 0 {
        out.push(0);
    } else if (1..123).contains(&n) {
        out.push((n + 5) as u8);
    } else if (-123..0).contains(&n) {
        out.push((n - 5) as i8 as u8);
    } else {
        let mut bytes = Vec::new();
        let mut x = n;
        for _ in 0..4 {
            bytes.push((x & 0xff) as u8);
            x >>= 8;
            if (n > 0 && x == 0) || (n < 0 && x == -1) {
                break;
            }
        }
        let len = bytes.len() as i8;
        out.push(if n > 0 { len as u8 } else { (-len) as u8 });
        out.extend(bytes);
    }
}

/// Marshal-encode a script container
pub fn container(entries: &[Entry]) -> Vec<u8> {
    let mut out = vec![4, 8, b'['];
    write_fixnum(&mut out, entries.len() as i64);
    let mut wrote_e = false;
    for entry in entries {
        out.push(b'[');
        write_fixnum(&mut out, 3);
        out.push(b'i');
        write_fixnum(&mut out, entry.id);
        match &entry.name {
            None => out.push(b'0'),
            Some(name) => {
                // UTF-8 string: I"<bytes> with one ivar, E => true
                out.extend_from_slice(b"I\"");
                write_fixnum(&mut out, name.len() as i64);
                out.extend_from_slice(name.as_bytes());
                write_fixnum(&mut out, 1);
                if wrote_e {
                    out.extend_from_slice(&[b';', 0]);
                } else {
                    out.extend_from_slice(&[b':', 6, b'E']);
                    wrote_e = true;
                }
                out.push(b'T');
            }
        }
        out.push(b'"');
        write_fixnum(&mut out, entry.body.len() as i64);
        out.extend_from_slice(&entry.body);
    }
    out
}

/// Write a container to `dir/Scripts.rvdata2`
pub fn write_container(dir: &Path, entries: &[Entry]) -> PathBuf {
    let path = dir.join("Scripts.rvdata2");
    std::fs::write(&path, container(entries)).unwrap();
    path
}

/// Every file under `root`, relative and `/`-separated, with its contents
pub fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, Vec<u8>)>) {
        for entry in std::fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            let rel = path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/");
            if path.is_dir() {
                out.push((format!("{rel}/"), Vec::new()));
                walk(root, &path, out);
            } else {
                out.push((rel, std::fs::read(&path).unwrap()));
            }
        }
    }
    let mut out = Vec::new();
    walk(root, root, &mut out);
    out.sort();
    out
}

/// Observer that records events as strings
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Vec<String>,
}

impl RecordingObserver {
    pub fn failures(&self) -> Vec<&String> {
        self.events.iter().filter(|e| e.starts_with("failed")).collect()
    }
}

impl ExtractionObserver for RecordingObserver {
    fn on_start(&mut self, _input: &Path) {
        self.events.push("start".to_string());
    }

    fn on_folder(&mut self, index: usize, name: &str, _dir: &Path) {
        self.events.push(format!("folder {index} {name}"));
    }

    fn on_saved(&mut self, index: usize, name: &str, _path: &Path) {
        self.events.push(format!("saved {index} {name}"));
    }

    fn on_failed(&mut self, index: usize, name: &str, _reason: &str) {
        self.events.push(format!("failed {index} {name}"));
    }

    fn on_finished(&mut self, total: usize) {
        self.events.push(format!("finished {total}"));
    }
}
