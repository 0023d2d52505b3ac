//! Travel-time estimate between POIs.
//!
//! Great-circle (haversine) distance converted to minutes with a fixed
//! linear factor, rounded up to a whole minute.

use crate::model::{Coord, Poi};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Minutes of travel per kilometre of great-circle distance.
pub const MINUTES_PER_KM: f64 = 6.0;

/// Haversine distance in kilometres.
pub fn haversine_km(from: Coord, to: Coord) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lon - from.lon).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Estimated travel time in whole minutes from `from` to `to`.
///
/// Symmetric, and zero for POIs at the same coordinates.
pub fn travel_minutes(from: &Poi, to: &Poi) -> i32 {
    (haversine_km(from.coord, to.coord) * MINUTES_PER_KM).ceil() as i32
}
