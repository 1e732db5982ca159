mod cli;
mod config;
mod locate;
mod logging;
mod model;
mod notify;
mod report;
mod trigger;

use std::process;

use clap::Parser;

use config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    let cli = cli::Cli::parse();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, &config).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
