//! Implementation of the Haversine formula for calculating the distance
//! between two points on a sphere.
//!
//! See [Wikipedia](https://en.wikipedia.org/wiki/Haversine_formula) for
//! more.
//!
//! **Distance is returned in meters**.

use crate::geofence::geofence_types::location::Coordinate;

/// Mean Earth radius in meters.
const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Calculate the distance between two points on a sphere.
///
/// The formula is symmetric in its arguments, and two identical
/// coordinates have distance 0.0 exactly. The intermediate term is
/// clamped to `[0, 1]` so that floating point overshoot near identical
/// or antipodal points can never produce a NaN.
///
/// Both coordinates are assumed validated (see [`Coordinate::new`]);
/// out of range input yields an unspecified, but finite, distance.
pub fn distance_meters(start: &Coordinate, end: &Coordinate) -> f64 {
    let d_lat = (end.latitude.into_inner() - start.latitude.into_inner()).to_radians();
    let d_lon = (end.longitude.into_inner() - start.longitude.into_inner()).to_radians();
    let lat1 = start.latitude.into_inner().to_radians();
    let lat2 = end.latitude.into_inner().to_radians();

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + (d_lon / 2.0).sin() * (d_lon / 2.0).sin() * lat1.cos() * lat2.cos();
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}
