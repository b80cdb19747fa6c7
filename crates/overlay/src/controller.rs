//! Boat and wind-arrow state layered over a [`MapSurface`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    error::OverlayError,
    geo::{LatLon, validate_heading, within_area_of_interest},
    marker::{Icon, Marker, MarkerId, MarkerKind, boat_label, waypoint_label, wind_label},
    surface::{MapSurface, MapView, MemorySurface, TileLayer},
};

/// Where the boat is drawn until the first position update arrives.
pub const DEFAULT_BOAT_LOCATION: LatLon = LatLon::new(36.983731367697374, -76.29555376681454);
pub const DEFAULT_ZOOM: u8 = 13;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// How the controller treats out-of-range numeric input.
pub enum ValidationMode {
    /// Accept everything and log a warning for values that cannot be on a map.
    #[default]
    Permissive,
    /// Reject invalid coordinates, headings and wind readings with [`OverlayError`].
    Strict,
}

#[derive(Clone, Debug)]
pub struct OverlayOptions {
    /// Name of the page element the map is bound to.
    pub container: String,
    pub zoom: u8,
    pub tiles: TileLayer,
    pub validation: ValidationMode,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            container: "map".into(),
            zoom: DEFAULT_ZOOM,
            tiles: TileLayer::default(),
            validation: ValidationMode::Permissive,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoatState {
    pub location: LatLon,
    /// Compass heading in degrees.
    pub heading: f64,
}

impl Default for BoatState {
    fn default() -> Self {
        Self {
            location: DEFAULT_BOAT_LOCATION,
            heading: 0.0,
        }
    }
}

/// Owns the single boat marker and any number of wind arrows on one surface.
///
/// The boat marker is placed on construction and is never removed: the
/// surface is only reachable mutably through the controller, and every
/// cleanup pass filters on [`MarkerKind`].
pub struct OverlayController<S: MapSurface = MemorySurface> {
    boat: BoatState,
    boat_marker: MarkerId,
    surface: S,
    validation: ValidationMode,
}

impl<S: MapSurface> OverlayController<S> {
    pub fn new(options: OverlayOptions) -> Self {
        let boat = BoatState::default();
        let mut surface = S::open(MapView {
            container: options.container,
            center: boat.location,
            zoom: options.zoom,
        });
        surface.add_tile_layer(options.tiles);
        let boat_marker = surface.add_marker(
            Marker::new(MarkerKind::Boat, boat.location, boat.heading, Icon::BOAT)
                .with_popup(boat_label(boat.location)),
        );

        Self {
            boat,
            boat_marker,
            surface,
            validation: options.validation,
        }
    }

    pub fn boat(&self) -> BoatState {
        self.boat
    }

    pub fn boat_marker(&self) -> MarkerId {
        self.boat_marker
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of markers of `kind` currently on the surface.
    pub fn count(&self, kind: MarkerKind) -> usize {
        self.surface
            .markers()
            .into_iter()
            .filter(|(_, marker)| marker.kind == kind)
            .count()
    }

    pub fn wind_arrow_count(&self) -> usize {
        self.count(MarkerKind::WindArrow)
    }

    /// Move and rotate the boat marker and refresh its location popup.
    pub fn update_boat(&mut self, lat: f64, lon: f64, heading: f64) -> Result<(), OverlayError> {
        let location = LatLon::new(lat, lon);
        let checked = location.validate().and_then(|_| validate_heading(heading));
        match (self.validation, checked) {
            (ValidationMode::Strict, Err(err)) => return Err(err),
            (ValidationMode::Permissive, Err(err)) => {
                warn!("accepting boat update outside map range: {err}");
            }
            (_, Ok(_)) => {}
        }

        self.surface.set_position(self.boat_marker, location, heading)?;
        self.surface.bind_popup(self.boat_marker, boat_label(location))?;
        self.boat = BoatState { location, heading };
        debug!("boat at {} heading {heading}", location.display5());
        Ok(())
    }

    /// Place a wind arrow if it falls inside the boat's area of interest.
    ///
    /// Returns `Ok(None)` without touching the surface when the observation
    /// is more than half a degree away from the boat on either axis.
    pub fn add_wind_arrow(
        &mut self,
        lat: f64,
        lon: f64,
        wind_dir: f64,
        wind_speed: f64,
    ) -> Result<Option<MarkerId>, OverlayError> {
        let location = LatLon::new(lat, lon);
        if self.validation == ValidationMode::Strict {
            location.validate()?;
            if !wind_dir.is_finite() {
                return Err(OverlayError::InvalidWindDirection(wind_dir));
            }
            if !wind_speed.is_finite() || wind_speed < 0.0 {
                return Err(OverlayError::InvalidWindSpeed(wind_speed));
            }
        }

        if !within_area_of_interest(self.boat.location, location) {
            debug!(
                "skipping wind arrow at {}: outside area of interest",
                location.display5()
            );
            return Ok(None);
        }

        let id = self.surface.add_marker(
            Marker::new(MarkerKind::WindArrow, location, wind_dir, Icon::WIND)
                .with_popup(wind_label(wind_dir, wind_speed)),
        );
        Ok(Some(id))
    }

    /// Remove every wind arrow, returning how many were removed.
    pub fn clear_wind_arrows(&mut self) -> usize {
        self.remove_kind(MarkerKind::WindArrow)
    }

    /// Replace all waypoint markers with one per point, in order.
    ///
    /// In strict mode every point is checked before any marker changes.
    pub fn sync_waypoints(&mut self, points: &[LatLon]) -> Result<usize, OverlayError> {
        if self.validation == ValidationMode::Strict {
            for point in points {
                point.validate()?;
            }
        }

        self.remove_kind(MarkerKind::Waypoint);
        for (index, point) in points.iter().enumerate() {
            self.surface.add_marker(
                Marker::new(MarkerKind::Waypoint, *point, 0.0, Icon::WAYPOINT)
                    .with_popup(waypoint_label(index, *point)),
            );
        }
        Ok(points.len())
    }

    fn remove_kind(&mut self, kind: MarkerKind) -> usize {
        debug_assert_ne!(kind, MarkerKind::Boat);
        let doomed: Vec<MarkerId> = self
            .surface
            .markers()
            .into_iter()
            .filter(|(_, marker)| marker.kind == kind)
            .map(|(id, _)| id)
            .collect();
        for id in &doomed {
            self.surface.remove_marker(*id);
        }
        doomed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAT: f64 = DEFAULT_BOAT_LOCATION.lat;
    const LON: f64 = DEFAULT_BOAT_LOCATION.lon;

    fn controller() -> OverlayController {
        OverlayController::new(OverlayOptions::default())
    }

    fn strict() -> OverlayController {
        OverlayController::new(OverlayOptions {
            validation: ValidationMode::Strict,
            ..OverlayOptions::default()
        })
    }

    #[test]
    fn construction_places_boat_on_bound_surface() {
        let overlay = controller();
        assert_eq!(overlay.boat(), BoatState::default());

        let surface = overlay.surface();
        assert_eq!(surface.view().container, "map");
        assert_eq!(surface.view().center, DEFAULT_BOAT_LOCATION);
        assert_eq!(surface.view().zoom, 13);
        assert_eq!(surface.tile_layers(), &[TileLayer::default()]);
        assert_eq!(surface.len(), 1);

        let boat = surface.marker(overlay.boat_marker()).unwrap();
        assert_eq!(boat.kind, MarkerKind::Boat);
        assert_eq!(boat.icon, Icon::BOAT);
        assert_eq!(
            boat.popup.as_deref(),
            Some("Sailboat Location: 36.98373, -76.29555")
        );
    }

    #[test]
    fn update_boat_moves_rotates_and_relabels() {
        let mut overlay = controller();
        overlay.update_boat(37.123456789, -76.5, 135.0).unwrap();

        assert_eq!(
            overlay.boat(),
            BoatState {
                location: LatLon::new(37.123456789, -76.5),
                heading: 135.0,
            }
        );
        let boat = overlay.surface().marker(overlay.boat_marker()).unwrap();
        assert_eq!(boat.location, LatLon::new(37.123456789, -76.5));
        assert_eq!(boat.rotation, 135.0);
        assert_eq!(
            boat.popup.as_deref(),
            Some("Sailboat Location: 37.12346, -76.50000")
        );
        assert_eq!(overlay.surface().len(), 1);
    }

    #[test]
    fn update_boat_round_trips_valid_values() {
        let mut overlay = controller();
        for (lat, lon, heading) in [
            (-90.0, -180.0, 0.0),
            (90.0, 180.0, 359.99),
            (0.0, 0.0, 180.0),
        ] {
            overlay.update_boat(lat, lon, heading).unwrap();
            let boat = overlay.boat();
            assert_eq!(
                (boat.location.lat, boat.location.lon, boat.heading),
                (lat, lon, heading)
            );
        }
    }

    #[test]
    fn permissive_mode_accepts_out_of_range_boat() {
        let mut overlay = controller();
        overlay.update_boat(120.0, 500.0, 720.0).unwrap();
        assert_eq!(overlay.boat().location, LatLon::new(120.0, 500.0));
        assert_eq!(overlay.boat().heading, 720.0);
    }

    #[test]
    fn strict_mode_rejects_and_keeps_state() {
        let mut overlay = strict();
        assert_eq!(
            overlay.update_boat(91.0, 0.0, 0.0),
            Err(OverlayError::InvalidLatitude(91.0))
        );
        assert_eq!(
            overlay.update_boat(0.0, 0.0, 360.0),
            Err(OverlayError::InvalidHeading(360.0))
        );
        assert_eq!(overlay.boat(), BoatState::default());
        let boat = overlay.surface().marker(overlay.boat_marker()).unwrap();
        assert_eq!(boat.location, DEFAULT_BOAT_LOCATION);
    }

    #[test]
    fn wind_arrow_inside_area_is_created() {
        let mut overlay = controller();
        let id = overlay
            .add_wind_arrow(LAT + 0.5, LON - 0.5, 45.0, 5.0)
            .unwrap()
            .expect("arrow on the boundary is inside");
        let arrow = overlay.surface().marker(id).unwrap();
        assert_eq!(arrow.kind, MarkerKind::WindArrow);
        assert_eq!(arrow.rotation, 45.0);
        assert_eq!(arrow.icon, Icon::WIND);
        assert_eq!(arrow.popup.as_deref(), Some("Wind: 45°, 5 m/s"));
        assert_eq!(overlay.wind_arrow_count(), 1);
    }

    #[test]
    fn wind_arrow_outside_area_is_skipped() {
        let mut overlay = controller();
        assert_eq!(overlay.add_wind_arrow(LAT + 0.6, LON, 0.0, 1.0), Ok(None));
        assert_eq!(overlay.add_wind_arrow(LAT, LON - 0.51, 0.0, 1.0), Ok(None));
        assert_eq!(overlay.surface().len(), 1);
    }

    #[test]
    fn strict_mode_rejects_bad_wind() {
        let mut overlay = strict();
        assert!(matches!(
            overlay.add_wind_arrow(LAT, LON, f64::NAN, 1.0),
            Err(OverlayError::InvalidWindDirection(_))
        ));
        assert_eq!(
            overlay.add_wind_arrow(LAT, LON, 10.0, -1.0),
            Err(OverlayError::InvalidWindSpeed(-1.0))
        );
        assert_eq!(
            overlay.add_wind_arrow(LAT, 200.0, 10.0, 1.0),
            Err(OverlayError::InvalidLongitude(200.0))
        );
        assert_eq!(overlay.wind_arrow_count(), 0);
    }

    #[test]
    fn clear_removes_only_wind_arrows() {
        let mut overlay = controller();
        for step in 0..5_i32 {
            let offset = f64::from(step) * 0.05;
            overlay
                .add_wind_arrow(LAT + offset, LON - offset, 90.0, 3.0)
                .unwrap();
        }
        overlay
            .sync_waypoints(&[LatLon::new(LAT, LON), LatLon::new(LAT + 1.0, LON)])
            .unwrap();
        assert_eq!(overlay.surface().len(), 8);

        assert_eq!(overlay.clear_wind_arrows(), 5);
        assert_eq!(overlay.wind_arrow_count(), 0);
        assert_eq!(overlay.count(MarkerKind::Waypoint), 2);
        assert!(overlay.surface().marker(overlay.boat_marker()).is_some());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut overlay = controller();
        overlay.add_wind_arrow(LAT, LON, 0.0, 0.0).unwrap();
        assert_eq!(overlay.clear_wind_arrows(), 1);
        let after_first = overlay.surface().len();
        assert_eq!(overlay.clear_wind_arrows(), 0);
        assert_eq!(overlay.surface().len(), after_first);
    }

    #[test]
    fn cleared_arrows_carry_wind_labels() {
        let mut overlay = controller();
        let id = overlay.add_wind_arrow(LAT, LON, 200.0, 7.5).unwrap().unwrap();
        let label = overlay.surface().marker(id).unwrap().popup.clone().unwrap();
        assert!(label.contains("Wind:"));
        let boat_label = overlay
            .surface()
            .marker(overlay.boat_marker())
            .unwrap()
            .popup
            .clone()
            .unwrap();
        assert!(!boat_label.contains("Wind:"));
    }

    #[test]
    fn sync_waypoints_replaces_previous_set() {
        let mut overlay = controller();
        overlay.add_wind_arrow(LAT, LON, 0.0, 1.0).unwrap();
        overlay
            .sync_waypoints(&[LatLon::new(1.0, 2.0), LatLon::new(3.0, 4.0)])
            .unwrap();
        assert_eq!(overlay.sync_waypoints(&[LatLon::new(5.0, 6.0)]), Ok(1));

        let waypoints: Vec<_> = overlay
            .surface()
            .markers()
            .into_iter()
            .filter(|(_, marker)| marker.kind == MarkerKind::Waypoint)
            .map(|(_, marker)| marker.popup.clone().unwrap())
            .collect();
        assert_eq!(waypoints, vec!["Waypoint 1: 5.00000, 6.00000".to_string()]);
        assert_eq!(overlay.wind_arrow_count(), 1);
    }

    #[test]
    fn strict_sync_rejects_whole_batch() {
        let mut overlay = strict();
        overlay.sync_waypoints(&[LatLon::new(1.0, 1.0)]).unwrap();
        assert_eq!(
            overlay.sync_waypoints(&[LatLon::new(2.0, 2.0), LatLon::new(95.0, 0.0)]),
            Err(OverlayError::InvalidLatitude(95.0))
        );
        assert_eq!(overlay.count(MarkerKind::Waypoint), 1);
    }

    #[test]
    fn moving_boat_keeps_old_arrows_but_moves_the_window() {
        let mut overlay = controller();
        assert!(overlay.add_wind_arrow(LAT + 0.1, LON + 0.1, 45.0, 5.0).unwrap().is_some());

        overlay.update_boat(LAT + 10.0, LON + 10.0, 90.0).unwrap();
        assert_eq!(overlay.wind_arrow_count(), 1);

        assert_eq!(overlay.add_wind_arrow(LAT + 0.2, LON + 0.2, 45.0, 5.0), Ok(None));
        assert_eq!(overlay.wind_arrow_count(), 1);
        assert!(
            overlay
                .add_wind_arrow(LAT + 10.2, LON + 9.8, 45.0, 5.0)
                .unwrap()
                .is_some()
        );
    }
}
