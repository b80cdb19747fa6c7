//! Overlay objects placed on a [`MapSurface`](crate::surface::MapSurface).

use std::fmt;

use serde::Serialize;

use crate::geo::LatLon;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
/// Surface-assigned handle for a placed marker.
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// What a marker represents. Cleanup passes filter on this, never on popup text.
pub enum MarkerKind {
    Boat,
    WindArrow,
    Waypoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
/// Image drawn for a marker, with pixel size and anchor point.
pub struct Icon {
    pub url: &'static str,
    pub size: [u32; 2],
    pub anchor: [u32; 2],
}

impl Icon {
    pub const BOAT: Icon = Icon {
        url: "/assets/boat.svg",
        size: [30, 30],
        anchor: [15, 15],
    };
    pub const WIND: Icon = Icon {
        url: "/assets/arrow.svg",
        size: [30, 30],
        anchor: [15, 15],
    };
    pub const WAYPOINT: Icon = Icon {
        url: "/assets/waypoint.svg",
        size: [20, 20],
        anchor: [10, 10],
    };
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub location: LatLon,
    /// Clockwise rotation of the icon in degrees, around its centre.
    pub rotation: f64,
    pub icon: Icon,
    pub popup: Option<String>,
}

impl Marker {
    pub fn new(kind: MarkerKind, location: LatLon, rotation: f64, icon: Icon) -> Self {
        Self {
            kind,
            location,
            rotation,
            icon,
            popup: None,
        }
    }

    pub fn with_popup(mut self, text: impl Into<String>) -> Self {
        self.popup = Some(text.into());
        self
    }
}

pub fn boat_label(location: LatLon) -> String {
    format!("Sailboat Location: {}", location.display5())
}

/// Wind arrows keep the `Wind:` prefix so the popup reads the same to users.
pub fn wind_label(direction: f64, speed: f64) -> String {
    format!("Wind: {direction}°, {speed} m/s")
}

pub fn waypoint_label(index: usize, location: LatLon) -> String {
    format!("Waypoint {}: {}", index + 1, location.display5())
}
