//! Struct definitions for readings delivered by the position feed.

use crate::geofence::geofence_types::location::Coordinate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single reading of the tracked person's position.
///
/// Immutable once received. The monitor keeps only the most recent
/// sample; position history is served by the feed layer, not buffered
/// here.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct PositionSample {
    /// Where the tracked person was when the reading was taken.
    pub coordinate: Coordinate,

    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,

    /// Reported measurement accuracy in meters.
    pub accuracy_meters: f64,
}
