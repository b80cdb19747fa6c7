//! Configuration parsing for the ground-station server.
//!
//! CLI arguments are validated once here and turned into a `ServerConfig`,
//! which the server and telemetry feed consume without re-reading flags.

use std::time::Duration;

use anyhow::{Result, bail};
use clap::Args;
use overlay::ValidationMode;

pub(crate) const DEFAULT_HOST: &str = "0.0.0.0";
pub(crate) const DEFAULT_PORT: u16 = 3001;
pub(crate) const DEFAULT_FEED_INTERVAL_SECS: u64 = 5;
pub(crate) const FEED_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
/// Settings for polling the boat's telemetry server.
pub struct FeedConfig {
    /// Base URL; `boat_status/get` is appended.
    pub base_url: String,
    pub interval: Duration,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Actix worker count; `None` uses one per physical core.
    pub workers: Option<usize>,
    pub validation: ValidationMode,
    pub verbose: bool,
    pub feed: Option<FeedConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            workers: None,
            validation: ValidationMode::Permissive,
            verbose: false,
            feed: None,
        }
    }
}

/// CLI arguments accepted by the `serve` subcommand.
#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to bind.
    #[arg(long = "host", value_name = "ADDR")]
    pub host: Option<String>,
    /// Port for the waypoint store and map page.
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,
    /// Number of HTTP workers.
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,
    /// Reject out-of-range coordinates, headings and wind readings.
    #[arg(long = "strict", action = clap::ArgAction::SetTrue)]
    pub strict: bool,
    /// Enable debug logging.
    #[arg(long = "verbose", action = clap::ArgAction::SetTrue)]
    pub verbose: bool,
    /// Telemetry server to poll for boat status.
    #[arg(long = "telemetry-url", value_name = "URL")]
    pub telemetry_url: Option<String>,
    /// Seconds between telemetry polls.
    #[arg(long = "telemetry-interval-secs", value_name = "SECS")]
    pub telemetry_interval_secs: Option<u64>,
}

impl TryFrom<ServeArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: ServeArgs) -> Result<Self> {
        let host = args.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
        if host.trim().is_empty() {
            bail!("--host must not be empty");
        }

        let port = args.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            bail!("--port must be between 1 and 65535");
        }

        if args.workers == Some(0) {
            bail!("--workers must be at least 1");
        }

        let feed = match (args.telemetry_url, args.telemetry_interval_secs) {
            (Some(url), interval) => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    bail!("--telemetry-url must be an http:// or https:// URL");
                }
                let secs = interval.unwrap_or(DEFAULT_FEED_INTERVAL_SECS);
                if secs == 0 {
                    bail!("--telemetry-interval-secs must be at least 1");
                }
                Some(FeedConfig {
                    base_url: url,
                    interval: Duration::from_secs(secs),
                    timeout: FEED_REQUEST_TIMEOUT,
                })
            }
            (None, Some(_)) => bail!("--telemetry-interval-secs requires --telemetry-url"),
            (None, None) => None,
        };

        let validation = if args.strict {
            ValidationMode::Strict
        } else {
            ValidationMode::Permissive
        };

        Ok(Self {
            host,
            port,
            workers: args.workers,
            validation,
            verbose: args.verbose,
            feed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_3001_without_feed() {
        let config = ServerConfig::try_from(ServeArgs::default()).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.validation, ValidationMode::Permissive);
        assert!(config.feed.is_none());
        assert!(config.workers.is_none());
    }

    #[test]
    fn strict_flag_selects_strict_validation() {
        let config = ServerConfig::try_from(ServeArgs {
            strict: true,
            ..ServeArgs::default()
        })
        .unwrap();
        assert_eq!(config.validation, ValidationMode::Strict);
    }

    #[test]
    fn feed_uses_default_interval() {
        let config = ServerConfig::try_from(ServeArgs {
            telemetry_url: Some("http://18.191.164.84:8080/".into()),
            ..ServeArgs::default()
        })
        .unwrap();
        let feed = config.feed.unwrap();
        assert_eq!(feed.interval, Duration::from_secs(5));
        assert_eq!(feed.timeout, FEED_REQUEST_TIMEOUT);
    }

    #[test]
    fn rejects_invalid_values() {
        let cases = [
            ServeArgs {
                port: Some(0),
                ..ServeArgs::default()
            },
            ServeArgs {
                host: Some(" ".into()),
                ..ServeArgs::default()
            },
            ServeArgs {
                workers: Some(0),
                ..ServeArgs::default()
            },
            ServeArgs {
                telemetry_url: Some("ftp://boat".into()),
                ..ServeArgs::default()
            },
            ServeArgs {
                telemetry_url: Some("http://boat".into()),
                telemetry_interval_secs: Some(0),
                ..ServeArgs::default()
            },
            ServeArgs {
                telemetry_interval_secs: Some(3),
                ..ServeArgs::default()
            },
        ];
        for args in cases {
            let debug = format!("{args:?}");
            assert!(ServerConfig::try_from(args).is_err(), "{debug} should fail");
        }
    }
}
