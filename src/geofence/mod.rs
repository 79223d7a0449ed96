//! Safe zone monitoring module

#[macro_use]
pub mod macros;
pub mod geofence_types;
pub mod geofence_utils;
pub mod monitor;

pub use geofence_types::location::Coordinate;
pub use geofence_types::membership::MembershipState;
pub use geofence_types::sample::PositionSample;
pub use geofence_types::zone::{SafeZone, SafeZoneModel};
pub use monitor::{evaluate, MonitorState, ZoneMonitor};

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Validation failures raised by zone edits and coordinate construction.
///
/// All conditions are local, synchronous and recoverable: the failed
/// operation leaves the previous state untouched and the caller surfaces
/// the reason to the caregiver.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum GeofenceError {
    /// The requested radius is not a finite positive number of meters.
    InvalidRadius(f64),

    /// `resize` or `recenter` was called before any zone was defined.
    NoZoneDefined,

    /// Latitude or longitude outside the valid range.
    InvalidCoordinate {
        /// The rejected latitude in decimal degrees.
        latitude: f64,
        /// The rejected longitude in decimal degrees.
        longitude: f64,
    },
}

impl Display for GeofenceError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            GeofenceError::InvalidRadius(radius_meters) => {
                write!(f, "Invalid zone radius: {} m.", radius_meters)
            }
            GeofenceError::NoZoneDefined => write!(f, "No safe zone defined."),
            GeofenceError::InvalidCoordinate {
                latitude,
                longitude,
            } => write!(f, "Invalid coordinate: ({}, {}).", latitude, longitude),
        }
    }
}

impl std::error::Error for GeofenceError {}
