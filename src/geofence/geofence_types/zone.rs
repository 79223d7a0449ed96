//! Struct definitions and implementations for [`SafeZone`] and the
//! containing [`SafeZoneModel`].

use crate::geofence::geofence_types::location::Coordinate;
use crate::geofence::GeofenceError;
use serde::{Deserialize, Serialize};

/// A caregiver-defined circular region around a center coordinate.
///
/// Leaving the region is the alert condition for the tracked person.
/// Center and radius are always replaced together inside one model
/// operation; a reader can never observe a half-updated zone.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct SafeZone {
    /// Center of the circular region.
    pub center: Coordinate,

    /// Radius of the region in meters. Always a finite positive number.
    pub radius_meters: f64,
}

/// Holds the current safe zone, if one has been defined.
///
/// No zone means monitoring is disabled. The model accepts any positive
/// radius; the caregiver-facing control range (100-2000 m in steps of
/// 50 m) is enforced at the edit boundary, see
/// [`Config::radius_within_bounds`](crate::Config::radius_within_bounds).
#[derive(Debug, Default, Clone)]
pub struct SafeZoneModel {
    zone: Option<SafeZone>,
}

impl SafeZoneModel {
    /// Creates a model with no zone defined.
    pub fn new() -> Self {
        SafeZoneModel::default()
    }

    /// Creates a model from a zone previously loaded from the external
    /// zone store.
    pub fn from_zone(zone: Option<SafeZone>) -> Self {
        SafeZoneModel { zone }
    }

    /// The current zone, if any.
    pub fn zone(&self) -> Option<&SafeZone> {
        self.zone.as_ref()
    }

    /// Replaces the zone wholesale.
    ///
    /// Used both to define a new zone and to load one from the store.
    /// On failure the previous zone, if any, is left untouched.
    pub fn set_zone(
        &mut self,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<(), GeofenceError> {
        validate_radius(radius_meters)?;

        self.zone = Some(SafeZone {
            center,
            radius_meters,
        });

        Ok(())
    }

    /// Keeps the center, replaces the radius.
    ///
    /// On failure the zone is left untouched.
    pub fn resize(&mut self, radius_meters: f64) -> Result<(), GeofenceError> {
        let Some(zone) = self.zone.as_mut() else {
            return Err(GeofenceError::NoZoneDefined);
        };

        validate_radius(radius_meters)?;
        zone.radius_meters = radius_meters;

        Ok(())
    }

    /// Keeps the radius, moves the center.
    pub fn recenter(&mut self, center: Coordinate) -> Result<(), GeofenceError> {
        let Some(zone) = self.zone.as_mut() else {
            return Err(GeofenceError::NoZoneDefined);
        };

        zone.center = center;

        Ok(())
    }

    /// Removes the zone, disabling monitoring. Returns the zone that
    /// was removed, if any.
    pub fn clear_zone(&mut self) -> Option<SafeZone> {
        self.zone.take()
    }
}

fn validate_radius(radius_meters: f64) -> Result<(), GeofenceError> {
    if !radius_meters.is_finite() || radius_meters <= 0.0 {
        return Err(GeofenceError::InvalidRadius(radius_meters));
    }

    Ok(())
}
