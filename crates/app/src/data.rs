use std::sync::{Arc, Mutex};

use overlay::{BoatState, MarkerId, OverlayController, SurfaceSnapshot};
use serde::{Deserialize, Serialize};

use crate::waypoints::WaypointStore;

pub(crate) type SharedOverlay = Arc<Mutex<OverlayController>>;
pub(crate) type SharedWaypoints = Arc<Mutex<WaypointStore>>;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub(crate) struct MessageResponse {
    pub(crate) message: String,
}

impl MessageResponse {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoatUpdate {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
    pub(crate) heading: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindObservation {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
    pub(crate) direction: f64,
    pub(crate) speed: f64,
}

#[derive(Serialize)]
pub(crate) struct BoatResponse {
    pub(crate) boat: BoatState,
}

#[derive(Serialize)]
pub(crate) struct WindResponse {
    pub(crate) id: Option<MarkerId>,
}

#[derive(Serialize)]
pub(crate) struct ClearResponse {
    pub(crate) removed: usize,
}

#[derive(Serialize)]
pub(crate) struct OverlaySnapshot<'a> {
    pub(crate) boat: BoatState,
    #[serde(flatten)]
    pub(crate) surface: SurfaceSnapshot<'a>,
}
