//! Coordinate primitives and the range checks applied in strict mode.

use serde::{Deserialize, Serialize};

use crate::error::OverlayError;

/// Half-width, in degrees, of the box around the boat inside which wind
/// observations are displayed.
pub const AREA_OF_INTEREST_DEG: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
/// Geographic coordinate in decimal degrees.
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Check that both components are finite and inside their geographic range.
    pub fn validate(self) -> Result<Self, OverlayError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(OverlayError::InvalidLatitude(self.lat));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(OverlayError::InvalidLongitude(self.lon));
        }
        Ok(self)
    }

    /// Format as `lat, lon` with five decimal places.
    pub fn display5(self) -> String {
        format!("{:.5}, {:.5}", self.lat, self.lon)
    }
}

impl From<(f64, f64)> for LatLon {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// Headings are compass degrees in `[0, 360)`.
pub fn validate_heading(heading: f64) -> Result<f64, OverlayError> {
    if heading.is_finite() && (0.0..360.0).contains(&heading) {
        Ok(heading)
    } else {
        Err(OverlayError::InvalidHeading(heading))
    }
}

/// Whether `point` lies within [`AREA_OF_INTEREST_DEG`] of `center` on both axes.
///
/// Compares raw degree differences, so the box narrows in ground distance
/// towards the poles and does not wrap across the antimeridian. A NaN
/// component never exceeds the threshold and is therefore accepted.
pub fn within_area_of_interest(center: LatLon, point: LatLon) -> bool {
    let outside = (point.lat - center.lat).abs() > AREA_OF_INTEREST_DEG
        || (point.lon - center.lon).abs() > AREA_OF_INTEREST_DEG;
    !outside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_range_bounds() {
        assert!(LatLon::new(90.0, 180.0).validate().is_ok());
        assert!(LatLon::new(-90.0, -180.0).validate().is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert_eq!(
            LatLon::new(90.5, 0.0).validate(),
            Err(OverlayError::InvalidLatitude(90.5))
        );
        assert_eq!(
            LatLon::new(0.0, -181.0).validate(),
            Err(OverlayError::InvalidLongitude(-181.0))
        );
        assert!(matches!(
            LatLon::new(f64::NAN, 0.0).validate(),
            Err(OverlayError::InvalidLatitude(_))
        ));
    }

    #[test]
    fn heading_is_half_open() {
        assert_eq!(validate_heading(0.0), Ok(0.0));
        assert_eq!(validate_heading(359.9), Ok(359.9));
        assert_eq!(validate_heading(360.0), Err(OverlayError::InvalidHeading(360.0)));
        assert!(validate_heading(-0.1).is_err());
        assert!(validate_heading(f64::INFINITY).is_err());
    }

    #[test]
    fn area_of_interest_is_inclusive_box() {
        let center = LatLon::new(10.0, 20.0);
        assert!(within_area_of_interest(center, LatLon::new(10.5, 19.5)));
        assert!(within_area_of_interest(center, LatLon::new(9.75, 20.25)));
        assert!(!within_area_of_interest(center, LatLon::new(10.51, 20.0)));
        assert!(!within_area_of_interest(center, LatLon::new(10.0, 19.49)));
    }

    #[test]
    fn area_of_interest_lets_nan_through() {
        let center = LatLon::new(0.0, 0.0);
        assert!(within_area_of_interest(center, LatLon::new(f64::NAN, 0.0)));
    }

    #[test]
    fn display_uses_five_decimals() {
        assert_eq!(
            LatLon::new(36.983731367697374, -76.29555376681454).display5(),
            "36.98373, -76.29555"
        );
    }
}
