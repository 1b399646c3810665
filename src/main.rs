mod cli;
mod logging;
mod report;

use std::process;

use clap::Parser;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = report::run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
