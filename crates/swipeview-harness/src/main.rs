#![forbid(unsafe_code)]

//! swipeview harness CLI.
//!
//! # Running
//!
//! ```sh
//! cargo run -p swipeview-harness -- replay crates/swipeview-harness/scenarios/commit_left.json
//! RUST_LOG=swipeview=debug cargo run -p swipeview-harness -- replay scenario.json --frame-ms 8
//! cargo run -p swipeview-harness -- defaults
//! ```
//!
//! Trace lines go to stdout as JSON; logs go to stderr.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use swipeview_harness::{Scenario, replay};
use swipeview_runtime::SwipeConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "swipeview-harness", about = "Replay swipe row scenarios")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a scenario file and print one JSON line per frame.
    Replay {
        scenario: PathBuf,
        /// Virtual frame size in milliseconds.
        #[arg(long, default_value_t = 16)]
        frame_ms: u64,
    },
    /// Print the default configuration as JSON.
    Defaults,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Replay { scenario, frame_ms } => {
            let scenario = Scenario::from_json_file(&scenario)?;
            for record in replay(&scenario, frame_ms)? {
                serde_json::to_writer(&mut out, &record)?;
                out.write_all(b"\n")?;
            }
        }
        Command::Defaults => {
            serde_json::to_writer_pretty(&mut out, &SwipeConfig::default())?;
            out.write_all(b"\n")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "harness failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
