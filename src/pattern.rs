//! Pattern handling: local-prefix normalization, start-directory resolution,
//! and glob compilation.
//!
//! Patterns are matched against paths rendered with `/` separators and no
//! leading `./`, so `"./*.json"` and `"*.json"` select the same files. Empty
//! and `.` segments are dropped before compiling, so `config/./a.json` and
//! `config//a.json` mean `config/a.json`.
//!
//! The start directory is the glob parent: the part of the pattern before
//! the first segment holding a glob metacharacter. Walking only that subtree
//! keeps a narrow pattern like `config/local.d/*.json` from touching the rest
//! of the tree.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};

use crate::error::GlobfigError;

const LOCAL_PREFIX: &str = "./";

/// Strip one leading `./`. Only used for matching; the caller's pattern list
/// is kept as given.
pub fn normalize(pattern: &str) -> &str {
    pattern.strip_prefix(LOCAL_PREFIX).unwrap_or(pattern)
}

/// Render a discovered path the way patterns are normalized.
///
/// Only the platform separator is rewritten; on Unix a `\` is an ordinary
/// file-name character. Non-UTF-8 bytes render as U+FFFD, which only
/// wildcards can match.
pub fn normalize_path(path: &Path) -> String {
    let mut rendered = path.to_string_lossy().into_owned();
    if MAIN_SEPARATOR != '/' {
        rendered = rendered.replace(MAIN_SEPARATOR, "/");
    }
    match rendered.strip_prefix(LOCAL_PREFIX) {
        Some(rest) => rest.to_string(),
        None => rendered,
    }
}

fn is_glob_segment(segment: &str) -> bool {
    segment
        .chars()
        .any(|c| matches!(c, '*' | '?' | '[' | ']' | '{' | '}' | '!'))
}

/// The directory a walk for `pattern` starts from.
///
/// The last segment is a file name unless the pattern ends in `/`.
///
/// ```text
/// *.json                      -> .
/// config/default.d/*.json     -> config/default.d
/// config/**/app.json          -> config
/// ../shared/*.json            -> ..
/// /etc/app/*.json             -> /etc/app
/// one.json                    -> .
/// ```
pub fn start_directory(pattern: &str) -> PathBuf {
    let pattern = normalize(pattern);
    let absolute = pattern.starts_with('/');

    let mut segments: Vec<&str> = pattern.split('/').collect();
    // Drop the file-name segment (empty when the pattern ends in `/`).
    segments.pop();

    let literal: Vec<&str> = segments
        .into_iter()
        .take_while(|segment| !is_glob_segment(segment))
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    match (absolute, literal.is_empty()) {
        (true, _) => PathBuf::from(format!("/{}", literal.join("/"))),
        (false, true) => PathBuf::from("."),
        (false, false) => PathBuf::from(literal.join("/")),
    }
}

/// `pattern` without its local prefix, empty segments or `.` segments.
/// A leading `/` is kept.
pub fn clean(pattern: &str) -> String {
    let pattern = normalize(pattern);
    let segments: Vec<&str> = pattern
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    let joined = segments.join("/");
    if pattern.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Compile the [`clean`] form of `pattern`.
///
/// `*` and `?` never cross a `/`; `**` does.
pub fn compile(pattern: &str) -> Result<GlobMatcher, GlobfigError> {
    GlobBuilder::new(&clean(pattern))
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| GlobfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}
