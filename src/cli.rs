//! Clap adapter for globfig.
//!
//! This module is the **optional integration layer** between globfig's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! - [`PatternArgs`] lets users add or replace config patterns from the
//!   command line (`-c 'config/*.json' -c 'local/*.json'`).
//! - [`ConfigArgs`] / [`ConfigSubcommand`] give an app `config list|get`
//!   subcommands; [`ConfigArgs::into_action()`] bridges them to
//!   [`ConfigAction`](crate::ConfigAction), and from there everything flows
//!   through the clap-free [`Globfig::handle()`](crate::Globfig::handle).

use clap::{Args, Subcommand};

use crate::aggregator::Globfig;
use crate::types::{ConfigAction, MissingDirectory};

/// Clap-derived args selecting which files are merged.
///
/// Flatten into your app's parser:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     patterns: PatternArgs,
/// }
/// ```
#[derive(Debug, Args)]
pub struct PatternArgs {
    /// Glob pattern of config files to merge. Repeatable; later patterns win.
    #[arg(short = 'c', long = "config", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Treat a pattern whose base directory does not exist as matching nothing.
    #[arg(long)]
    pub skip_missing: bool,
}

impl PatternArgs {
    /// Build an aggregator, using `defaults` when no `--config` was given.
    pub fn into_globfig(self, defaults: &[&str]) -> Globfig {
        let policy = if self.skip_missing {
            MissingDirectory::Skip
        } else {
            MissingDirectory::Fail
        };
        let globfig = if self.patterns.is_empty() {
            Globfig::new(defaults.iter().copied())
        } else {
            Globfig::new(self.patterns)
        };
        globfig.missing_directory(policy)
    }
}

/// Clap-derived args for the `config` subcommand group.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigSubcommand>,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show all merged configuration key-value pairs.
    List,
    /// Show the merged value of a config key.
    Get {
        /// Dotted key path (e.g. "database.url").
        key: String,
    },
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    ///
    /// Bare `config` (no subcommand) and explicit `config list` both map to
    /// `ConfigAction::List`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            None | Some(ConfigSubcommand::List) => ConfigAction::List,
            Some(ConfigSubcommand::Get { key }) => ConfigAction::Get { key },
        }
    }
}
