use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::{
    config::{ServeArgs, ServerConfig},
    server, telemetry,
};

#[derive(Debug, Parser)]
#[command(
    name = "ground-station",
    about = "Sailboat ground station: live map overlay, waypoint store and notification bridge"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default when no subcommand is given).
    Serve(ServeArgs),
}

pub fn handle_commands(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => {
            let config = ServerConfig::try_from(args)?;
            telemetry::init_logging(config.verbose)?;
            server::run(config)
        }
    }
}
