//! Periodic boat-status poll against the on-board telemetry server.
//!
//! Each successful poll moves the boat and replaces the wind arrow with one at
//! the boat's new position. Failed polls are logged and leave the map as is.

use std::time::Duration;

use anyhow::{Context, Result};
use overlay::{MarkerId, OverlayController, OverlayError};
use serde::Deserialize;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tracing::{debug, error, info, warn};

use crate::{config::FeedConfig, data::SharedOverlay};

#[derive(Debug, Deserialize, PartialEq)]
/// Subset of the telemetry server's `boat_status/get` document the map uses.
pub(crate) struct BoatStatus {
    pub(crate) position: [f64; 2],
    #[serde(default)]
    pub(crate) heading: f64,
    #[serde(default)]
    pub(crate) true_wind_speed: f64,
    #[serde(default)]
    pub(crate) true_wind_angle: f64,
}

pub(crate) fn status_url(base_url: &str) -> String {
    format!("{}/boat_status/get", base_url.trim_end_matches('/'))
}

pub(crate) fn apply_status(
    overlay: &mut OverlayController,
    status: &BoatStatus,
) -> Result<Option<MarkerId>, OverlayError> {
    let [lat, lon] = status.position;
    overlay.update_boat(lat, lon, status.heading)?;
    overlay.clear_wind_arrows();
    overlay.add_wind_arrow(lat, lon, status.true_wind_angle, status.true_wind_speed)
}

/// Ticks every `period`; a slow poll pushes the next tick back instead of bursting.
fn poll_interval(period: Duration) -> Interval {
    let mut ticks = interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks
}

async fn fetch_status(client: &reqwest::Client, url: &str) -> Result<BoatStatus> {
    client
        .get(url)
        .send()
        .await
        .with_context(|| format!("failed to reach {url}"))?
        .error_for_status()
        .context("telemetry server returned an error status")?
        .json::<BoatStatus>()
        .await
        .context("failed to decode boat status")
}

/// Poll forever on the current actix runtime.
pub(crate) async fn run(config: FeedConfig, overlay: SharedOverlay) {
    let client = match reqwest::Client::builder().timeout(config.timeout).build() {
        Ok(client) => client,
        Err(err) => {
            error!("Telemetry feed disabled: {err}");
            return;
        }
    };
    let url = status_url(&config.base_url);
    info!("Polling {url} every {:?}", config.interval);

    let mut ticks = poll_interval(config.interval);
    loop {
        ticks.tick().await;
        let status = match fetch_status(&client, &url).await {
            Ok(status) => status,
            Err(err) => {
                warn!("Failed to fetch boat data: {err:#}");
                continue;
            }
        };

        let mut guard = match overlay.lock() {
            Ok(guard) => guard,
            Err(err) => {
                error!("Overlay state poisoned, stopping telemetry feed: {err}");
                return;
            }
        };
        match apply_status(&mut guard, &status) {
            Ok(_) => debug!("Applied boat status {:?}", status.position),
            Err(err) => warn!("Ignoring boat status: {err}"),
        }
    }
}
