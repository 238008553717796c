//! Entry point for the cleanscan CLI.

use clap::Parser;
use cleanscan::cli::Cli;
use cleanscan::logging::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(err) = cleanscan::run_app(cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
