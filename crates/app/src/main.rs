mod bridge;
mod cli;
mod config;
mod data;
mod feed;
mod html;
mod server;
mod telemetry;
mod waypoints;

use clap::Parser;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    cli::handle_commands(cli)
}
