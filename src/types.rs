//! Plain data types shared across the discovery and merge pipeline.
//!
//! A fetch flows through three shapes:
//!
//! - [`FileMatch`]: a discovered path tagged with the priority (list index) of
//!   the pattern that matched it. A path matched by two patterns produces two
//!   entries.
//! - [`ParsedFile`]: the same entry after its contents were read and decoded.
//! - the merged `serde_json::Value`, handed to the caller.
//!
//! Both intermediate shapes are rebuilt on every fetch; nothing is cached.

use std::path::PathBuf;

use serde_json::Value;

/// A discovered file tagged with the priority of the pattern that matched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    /// Normalized path (no leading `./`, `/`-separated). Matched against
    /// patterns and used for ordering.
    pub path: String,
    /// The path as the filesystem reported it. All reads go through this.
    pub location: PathBuf,
    /// Index of the matching pattern. Higher wins.
    pub priority: usize,
}

/// A [`FileMatch`] whose contents have been decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    pub path: String,
    pub priority: usize,
    pub value: Value,
}

/// How file contents are decoded into a structured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Every file is JSON.
    Json,
    /// Every file is TOML.
    Toml,
    /// Pick by extension: `.toml` is TOML, anything else is JSON.
    #[default]
    Auto,
}

/// What discovery does when a pattern's start directory does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingDirectory {
    /// Fail the whole fetch with a discovery error.
    #[default]
    Fail,
    /// Treat the missing directory as empty; only that pattern yields nothing.
    Skip,
}

/// A read-only config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    List,
    Get { key: String },
}
