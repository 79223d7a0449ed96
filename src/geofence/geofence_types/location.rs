//! Struct definitions and implementations for [`Coordinate`].

use crate::geofence::GeofenceError;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A [`Coordinate`] is the geographic position of the tracked person or
/// of a safe zone center. Immutable value type.
///
/// Float values are wrapped in [`OrderedFloat`] so that coordinates can
/// be hashed and compared for equality. Latitude and longitude are
/// decimal degrees; `f64` keeps the error margin of a derived distance
/// well below a meter.
#[derive(Debug, PartialEq, Hash, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct Coordinate {
    /// The latitude of the position, positive north.
    pub latitude: OrderedFloat<f64>,

    /// The longitude of the position, positive east.
    pub longitude: OrderedFloat<f64>,
}

impl Coordinate {
    /// Creates a validated coordinate.
    ///
    /// Latitude must lie in `[-90, 90]` and longitude in `[-180, 180]`,
    /// both finite. Code that builds a `Coordinate` from its public
    /// fields instead owns that contract itself; the distance evaluator
    /// assumes it holds.
    pub fn new(latitude: f64, longitude: f64) -> Result<Coordinate, GeofenceError> {
        if !latitude.is_finite()
            || !longitude.is_finite()
            || !(-90.0..=90.0).contains(&latitude)
            || !(-180.0..=180.0).contains(&longitude)
        {
            return Err(GeofenceError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Coordinate {
            latitude: OrderedFloat(latitude),
            longitude: OrderedFloat(longitude),
        })
    }
}
