pub mod cli;
pub mod columns;
pub mod compare;
pub mod duplicates;
pub mod error;
pub mod export;
pub mod inputs;
pub mod io_utils;
pub mod loader;
pub mod normalize;
pub mod render;
pub mod search;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::cli::{AnalyzeArgs, Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("crosscheck", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Columns(args) => columns::execute(&args),
        Commands::Search(args) => search::execute(&args),
        Commands::Duplicates(args) => duplicates::execute(&args),
        Commands::Analyze(args) => handle_analyze(&args),
    }
}

/// A non-blank `--value` selects the search, anything else the duplicate
/// analysis.
fn handle_analyze(args: &AnalyzeArgs) -> Result<()> {
    match args.value.as_deref() {
        Some(value) if !value.trim().is_empty() => {
            debug!("Analyze: searching for '{value}'");
            search::run(&args.inputs, value, &args.output)
        }
        _ => {
            debug!("Analyze: no search value, running duplicate analysis");
            duplicates::run(&args.inputs, &args.output)
        }
    }
}

pub(crate) fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}
