//! Glob-driven, layered configuration. List your patterns, get one merged
//! value.
//!
//! Globfig discovers config files by glob pattern, decodes each one, and
//! deep-merges them in a fixed precedence order. The same pipeline runs
//! synchronously or with concurrent reads on tokio, and both produce the same
//! result.
//!
//! ```ignore
//! let config = Globfig::new(["config/default.d/*.json", "config/local.d/*.json"])
//!     .fetch_sync()?;
//! ```
//!
//! That call walks `config/default.d` and `config/local.d`, decodes every
//! `.json` file it finds, and merges them so that `local.d` overrides
//! `default.d`, and within each directory `99-local.json` overrides
//! `00-default.json`.
//!
//! # Precedence
//!
//! Patterns are listed in **priority-ascending** order: a pattern's index is
//! its priority, and higher priorities are merged later.
//!
//! ```text
//! pattern 0 matches   a.json, b.json    merged first, in path order
//!        ↑ overridden by
//! pattern 1 matches   c.json            merged last, wins
//! ```
//!
//! Files matched by the same pattern are merged in lexicographic path order,
//! which makes numbered drop-in directories (`00-base.json`,
//! `10-feature.json`, `99-local.json`) behave the way their names suggest.
//! A file matched by two patterns is merged twice, once at each priority.
//!
//! Merge order depends only on `(priority, path)`. Directory listing order
//! and the order in which concurrent reads complete never affect the result.
//!
//! # Deep merge
//!
//! Every file is a **sparse** overlay. Objects are merged key by key,
//! recursively; scalars and arrays from the later file replace the earlier
//! value outright. Merging starts from an empty object, so no files means
//! `{}`.
//!
//! # Patterns
//!
//! Patterns use [globset](https://docs.rs/globset) syntax. `*` and `?` never
//! cross a `/`; `**` does. A leading `./` is ignored for matching, so
//! `./*.json` and `*.json` select the same files, but
//! [`patterns()`](Globfig::patterns) always reports them exactly as given.
//!
//! Each pattern is walked from its **start directory**, the literal prefix
//! before the first glob segment: `config/default.d/*.json` walks only
//! `config/default.d`. Patterns may point at `../` or absolute directories.
//!
//! A start directory that does not exist is an error by default, since a
//! missing config directory usually means a misconfigured path. Set
//! [`MissingDirectory::Skip`] to let such a pattern match nothing instead.
//!
//! # Formats
//!
//! [`Format::Auto`] (the default) decodes `.toml` files as TOML and
//! everything else as JSON, so the two can be layered freely. Use
//! [`Format::Json`] or [`Format::Toml`] to force one.
//!
//! # Sync and async
//!
//! - [`fetch_sync()`](Globfig::fetch_sync) reads files one at a time on the
//!   calling thread.
//! - [`fetch()`](Globfig::fetch) walks the tree, then reads and decodes every
//!   matched file on its own tokio task and waits for all of them.
//!
//! Both stop at the first failure with no partial result. When several
//! concurrent reads fail, the error reported is the one belonging to the
//! earliest file in merge order, so both modes report the same error.
//! [`fetch_as()`](Globfig::fetch_as) and
//! [`fetch_sync_as()`](Globfig::fetch_sync_as) deserialize the merged value
//! into your own type.
//!
//! # Filesystem
//!
//! All I/O goes through the [`FileSystem`] trait. When none is set, the
//! aggregator asks its default factory ([`local_fs`] unless replaced with
//! [`with_default_fs()`](Globfig::with_default_fs)) at the moment of each
//! fetch. [`MemoryFs`] is an in-memory implementation for tests.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the opt-in `clap` feature) provides
//! [`PatternArgs`] for `--config <PATTERN>` flags and [`ConfigArgs`] for
//! `config list|get` subcommands. The core library does not depend on clap;
//! enable the adapter with:
//!
//! ```toml
//! globfig = { version = "...", features = ["clap"] }
//! ```
//!
//! # Error handling
//!
//! All fallible operations return [`GlobfigError`]. Walk failures, read
//! failures and decode failures all carry the offending path. See the
//! [`error`] module for the full set.

pub mod error;
pub mod fs;
pub mod types;

mod aggregator;
#[cfg(feature = "clap")]
mod cli;
mod decode;
mod discover;
mod flatten;
pub(crate) mod merge;
mod ops;
mod pattern;
mod resolve;

#[cfg(test)]
mod fixtures;

pub use aggregator::Globfig;
#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand, PatternArgs};
pub use error::{DecodeError, GlobfigError};
pub use fs::{FileSystem, FsFactory, LocalFs, MemoryFs, local_fs};
pub use merge::deep_merge;
pub use ops::ConfigResult;
pub use types::{ConfigAction, FileMatch, Format, MissingDirectory, ParsedFile};
