mod cli;

use clap::Parser;
use std::process;

use crate::cli::Cli;

/// Maps `-v` counts to a filter for this crate. `RUST_LOG` wins when set.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let default_filter = format!("seasonal_weather={level}");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = cli::run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
