//! taskrouter - entry point

use clap::Parser;
use taskrouter::{cli, logging, Cli};

fn main() {
    logging::init_tracing();

    let args = Cli::parse();
    if let Err(e) = cli::run(args) {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
