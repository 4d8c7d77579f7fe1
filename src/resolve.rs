//! Core resolution pipeline: order decoded files and fold them into one value.
//!
//! Operates on already-decoded data with no I/O, so ordering and precedence
//! are testable with synthetic inputs. Steps:
//!
//! 1. Sort by priority ascending, then path ascending
//! 2. Deep-merge left to right, starting from an empty object (later wins)

use serde_json::{Map, Value};

use crate::merge::deep_merge;
use crate::types::ParsedFile;

/// The order files are merged in: `(priority, path)` ascending.
///
/// Returns a new vector; the sort is stable, so entries equal on both keys
/// keep their relative order (their contents are identical anyway, being the
/// same file matched at the same priority).
pub fn merge_order(mut files: Vec<ParsedFile>) -> Vec<ParsedFile> {
    files.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.path.cmp(&b.path))
    });
    files
}

/// Merge decoded files into a single value. No files yields `{}`.
pub fn resolve(files: Vec<ParsedFile>) -> Value {
    merge_order(files)
        .into_iter()
        .fold(Value::Object(Map::new()), |merged, file| {
            deep_merge(merged, file.value)
        })
}
