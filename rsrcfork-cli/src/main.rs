mod app;
mod commands;
mod output;

use clap::Parser;
use log::LevelFilter;

use crate::app::{Cli, Command, GlobalOptions};

/// Route library logs to stderr. JSON output stays clean, so `--json` installs no logger.
fn init_logging(global: &GlobalOptions) {
    if global.json {
        return;
    }

    let level = if global.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // RUST_LOG is parsed last and wins over --verbose
    env_logger::Builder::new()
        .filter_module("rsrcfork", level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nInterrupted.");
        std::process::exit(130);
    })?;

    let cli = Cli::parse();
    init_logging(&cli.global);

    match &cli.command {
        Command::List { fork } => commands::list::run(fork, &cli.global),
        Command::Extract {
            fork,
            id,
            output_dir,
        } => commands::extract::run(fork, *id, output_dir.as_deref(), &cli.global),
    }
}
