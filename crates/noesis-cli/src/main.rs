//! Entry point for the `noesis` binary.

mod app;
mod cli;
mod config;
mod seed;

use clap::Parser;

use crate::app::NoesisApp;
use crate::cli::CliArgs;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let app = match NoesisApp::from_args(&args) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = app.run(args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
