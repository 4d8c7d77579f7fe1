//! # globfig demo application
//!
//! A small CLI that merges config files by glob pattern and prints the
//! result. It exists to demonstrate and manually verify globfig's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example globfig_demo -- dump
//! cargo run --example globfig_demo -- -c 'config/default.d/*.json' -c 'config/local.d/*.json' dump
//! cargo run --example globfig_demo -- --concurrent dump
//! cargo run --example globfig_demo -- config list
//! cargo run --example globfig_demo -- config get database.url
//! RUST_LOG=globfig=trace cargo run --example globfig_demo -- dump
//! ```
//!
//! Without `-c`, the demo merges `./*.json`, then `./*.toml`.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use globfig::{ConfigArgs, GlobfigError, PatternArgs};

const DEFAULT_PATTERNS: &[&str] = &["./*.json", "./*.toml"];

/// globfig demo: merge config files selected by glob patterns.
#[derive(Parser, Debug)]
#[command(name = "globfig-demo")]
struct Cli {
    #[command(flatten)]
    patterns: PatternArgs,

    /// Read files concurrently instead of one at a time.
    #[arg(long, global = true)]
    concurrent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the merged configuration as pretty JSON.
    Dump,
    /// Inspect merged values (list, get).
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), GlobfigError> {
    let globfig = cli.patterns.into_globfig(DEFAULT_PATTERNS);

    match cli.command {
        Commands::Dump => {
            let merged = if cli.concurrent {
                globfig.fetch().await?
            } else {
                globfig.fetch_sync()?
            };
            let pretty =
                serde_json::to_string_pretty(&merged).map_err(|e| GlobfigError::InvalidValue {
                    key: "<merged>".into(),
                    reason: e.to_string(),
                })?;
            println!("{pretty}");
        }
        Commands::Config(args) => {
            let result = globfig.handle(&args.into_action())?;
            println!("{result}");
        }
    }
    Ok(())
}
