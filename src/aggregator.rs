use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinSet;
use tracing::debug;

use crate::discover;
use crate::error::GlobfigError;
use crate::fs::{FileSystem, FsFactory, local_fs};
use crate::ops::{self, ConfigResult};
use crate::resolve;
use crate::types::{ConfigAction, FileMatch, Format, MissingDirectory, ParsedFile};

/// Discovers config files by glob pattern and deep-merges them.
///
/// Patterns are listed in **priority-ascending** order: files matched by the
/// last pattern are merged last and win. Files matched by the same pattern
/// are merged in path order.
///
/// ```ignore
/// let config = Globfig::new(["config/default.d/*.json", "config/local.d/*.json"])
///     .fetch_sync()?;
/// ```
pub struct Globfig {
    patterns: Option<Vec<String>>,
    fs: Option<Arc<dyn FileSystem>>,
    default_fs: FsFactory,
    format: Format,
    missing: MissingDirectory,
}

impl Default for Globfig {
    fn default() -> Self {
        Self {
            patterns: None,
            fs: None,
            default_fs: local_fs,
            format: Format::default(),
            missing: MissingDirectory::default(),
        }
    }
}

impl Globfig {
    /// Create an aggregator over `patterns`, reading the real filesystem.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut globfig = Self::default();
        globfig.set_patterns(patterns);
        globfig
    }

    /// Use `fs` instead of the default filesystem.
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = Some(fs);
        self
    }

    /// Replace the factory consulted when no filesystem is set (default: [`local_fs`]).
    pub fn with_default_fs(mut self, factory: FsFactory) -> Self {
        self.default_fs = factory;
        self
    }

    /// Set how file contents are decoded (default: [`Format::Auto`]).
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set what happens when a pattern's start directory is missing
    /// (default: [`MissingDirectory::Fail`]).
    pub fn missing_directory(mut self, policy: MissingDirectory) -> Self {
        self.missing = policy;
        self
    }

    /// The patterns exactly as given, `./` prefixes included.
    pub fn patterns(&self) -> Option<&[String]> {
        self.patterns.as_deref()
    }

    pub fn set_patterns<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = Some(patterns.into_iter().map(Into::into).collect());
    }

    pub fn clear_patterns(&mut self) {
        self.patterns = None;
    }

    /// The filesystem a fetch would use right now: the one set explicitly, or
    /// a fresh one from the default factory.
    pub fn fs(&self) -> Arc<dyn FileSystem> {
        match &self.fs {
            Some(fs) => Arc::clone(fs),
            None => (self.default_fs)(),
        }
    }

    pub fn set_fs(&mut self, fs: Arc<dyn FileSystem>) {
        self.fs = Some(fs);
    }

    /// Go back to the default factory on the next fetch.
    pub fn clear_fs(&mut self) {
        self.fs = None;
    }

    fn effective_patterns(&self) -> Result<&[String], GlobfigError> {
        self.patterns().ok_or(GlobfigError::PatternsRequired)
    }

    fn discover(&self, fs: &dyn FileSystem) -> Result<Vec<FileMatch>, GlobfigError> {
        let patterns = self.effective_patterns()?;
        discover::discover(fs, patterns, self.missing)
    }

    /// Discover, read and merge concurrently.
    ///
    /// The walk runs first; then every matched file is read and decoded on its
    /// own task. All tasks are awaited before any result is used. If any read
    /// or decode failed, the error of the earliest file in merge order is
    /// returned and nothing is merged.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn fetch(&self) -> Result<Value, GlobfigError> {
        let fs = self.fs();
        let matches = self.discover(fs.as_ref())?;
        let count = matches.len();

        let mut tasks = JoinSet::new();
        for (index, file) in matches.into_iter().enumerate() {
            let fs = Arc::clone(&fs);
            let format = self.format;
            tasks.spawn(async move {
                let path = file.location.clone();
                let read = fs.read_file_async(&path).await;
                let result = match read {
                    Ok(bytes) => parse(format, file, &bytes),
                    Err(source) => Err(GlobfigError::ReadError { path, source }),
                };
                (index, result)
            });
        }

        let mut slots: Vec<Option<Result<ParsedFile, GlobfigError>>> =
            (0..count).map(|_| None).collect();
        let mut task_failure = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => {
                    task_failure.get_or_insert(e);
                }
            }
        }
        if let Some(e) = task_failure {
            return Err(e.into());
        }

        let parsed = slots
            .into_iter()
            .flatten()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(finish(parsed))
    }

    /// Discover, read and merge on the calling thread, one file at a time.
    ///
    /// Gives the same result as [`fetch`](Self::fetch) for the same files.
    /// The first read or decode failure aborts.
    pub fn fetch_sync(&self) -> Result<Value, GlobfigError> {
        let fs = self.fs();
        let matches = self.discover(fs.as_ref())?;

        // Discovery already emits merge order.
        let mut parsed = Vec::with_capacity(matches.len());
        for file in matches {
            let path = file.location.clone();
            let bytes = fs
                .read_file(&path)
                .map_err(|source| GlobfigError::ReadError { path, source })?;
            parsed.push(parse(self.format, file, &bytes)?);
        }
        Ok(finish(parsed))
    }

    /// [`fetch`](Self::fetch), then deserialize into `T`.
    pub async fn fetch_as<T: DeserializeOwned>(&self) -> Result<T, GlobfigError> {
        into_typed(self.fetch().await?)
    }

    /// [`fetch_sync`](Self::fetch_sync), then deserialize into `T`.
    pub fn fetch_sync_as<T: DeserializeOwned>(&self) -> Result<T, GlobfigError> {
        into_typed(self.fetch_sync()?)
    }

    /// Handle a `ConfigAction` (list / get) against a fresh synchronous fetch.
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult, GlobfigError> {
        let config = self.fetch_sync()?;
        match action {
            ConfigAction::List => Ok(ops::list_values(&config)),
            ConfigAction::Get { key } => ops::get_value(&config, key),
        }
    }
}

fn parse(format: Format, file: FileMatch, bytes: &[u8]) -> Result<ParsedFile, GlobfigError> {
    let value = format
        .decode(&file.location, bytes)
        .map_err(|source| GlobfigError::ParseError {
            path: file.location,
            source,
        })?;
    Ok(ParsedFile {
        path: file.path,
        priority: file.priority,
        value,
    })
}

fn finish(parsed: Vec<ParsedFile>) -> Value {
    debug!(files = parsed.len(), "merging config files");
    resolve::resolve(parsed)
}

fn into_typed<T: DeserializeOwned>(value: Value) -> Result<T, GlobfigError> {
    serde_json::from_value(value).map_err(|e| GlobfigError::InvalidValue {
        key: "<merged>".into(),
        reason: e.to_string(),
    })
}
