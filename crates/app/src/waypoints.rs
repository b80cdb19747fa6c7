//! In-memory waypoint list shared by the HTTP handlers.

use overlay::LatLon;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum StoreError {
    #[error("Invalid waypoints data")]
    InvalidWaypoints,
}

#[derive(Debug, Default)]
/// Ordered list of opaque waypoint records, replaced wholesale on each write.
pub(crate) struct WaypointStore {
    waypoints: Vec<Value>,
}

impl WaypointStore {
    /// Replace the list with `payload.waypoints` when it is an array.
    ///
    /// Any other payload leaves the stored list untouched.
    pub(crate) fn replace(&mut self, payload: Value) -> Result<usize, StoreError> {
        let Value::Object(mut fields) = payload else {
            return Err(StoreError::InvalidWaypoints);
        };
        match fields.remove("waypoints") {
            Some(Value::Array(items)) => {
                self.waypoints = items;
                Ok(self.waypoints.len())
            }
            _ => Err(StoreError::InvalidWaypoints),
        }
    }

    pub(crate) fn list(&self) -> &[Value] {
        &self.waypoints
    }

    /// Entries shaped `[lat, lon]`; anything else is skipped.
    pub(crate) fn coordinates(&self) -> Vec<LatLon> {
        self.waypoints
            .iter()
            .filter_map(|entry| match entry.as_array()?.as_slice() {
                [lat, lon] => Some(LatLon::new(lat.as_f64()?, lon.as_f64()?)),
                _ => None,
            })
            .collect()
    }
}
