//! Geolocation resolver — device position and nearest-building selection.

use async_trait::async_trait;

use crate::error::LocationError;
use crate::store::models::CampusBuilding;

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Device collaborator exposing the current position.
///
/// Denial or lack of support is a recoverable error; the wizard falls back to
/// manual building selection.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<GeoPoint, LocationError>;
}

/// Great-circle distance between two points, in kilometers (haversine).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Pick the building closest to `point`, or `None` if the list is empty.
pub fn nearest_building(point: GeoPoint, buildings: &[CampusBuilding]) -> Option<&CampusBuilding> {
    buildings.iter().min_by(|a, b| {
        let da = haversine_km(point, GeoPoint::new(a.latitude, a.longitude));
        let db = haversine_km(point, GeoPoint::new(b.latitude, b.longitude));
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    })
}
