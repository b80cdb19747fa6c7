//! Map overlay state for the ground station: one boat marker plus transient
//! wind arrows and waypoint markers on a [`MapSurface`].
//!
//! The crate never renders anything. It tracks what should be on the map and
//! hands that to a surface implementation; [`MemorySurface`] keeps it in
//! memory for the browser page served by the `ground-station` binary.

pub mod controller;
pub mod error;
pub mod geo;
pub mod marker;
pub mod surface;

pub use controller::{
    BoatState, DEFAULT_BOAT_LOCATION, OverlayController, OverlayOptions, ValidationMode,
};
pub use error::OverlayError;
pub use geo::{AREA_OF_INTEREST_DEG, LatLon};
pub use marker::{Icon, Marker, MarkerId, MarkerKind};
pub use surface::{MapSurface, MapView, MemorySurface, SurfaceSnapshot, TileLayer};
