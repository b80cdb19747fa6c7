use thiserror::Error;

use crate::marker::MarkerId;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum OverlayError {
    #[error("latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
    #[error("heading {0} is outside [0, 360)")]
    InvalidHeading(f64),
    #[error("wind direction {0} is not a finite angle")]
    InvalidWindDirection(f64),
    #[error("wind speed {0} must be finite and non-negative")]
    InvalidWindSpeed(f64),
    #[error("marker {0} is not on the map surface")]
    UnknownMarker(MarkerId),
}
