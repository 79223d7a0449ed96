//! Definition of the [`MembershipState`] type.

use serde::{Deserialize, Serialize};

/// The result of evaluating the tracked person's position against the
/// safe zone.
///
/// A derived value: recomputed whenever the zone or the latest position
/// changes, never stored.
#[derive(Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
pub struct MembershipState {
    /// Whether the position lies within the zone radius. The boundary
    /// is inclusive: a position exactly on the radius is inside.
    pub inside_zone: bool,

    /// Great-circle distance from the zone center in meters. 0.0 when
    /// no zone is defined.
    pub distance_meters: f64,
}

impl MembershipState {
    /// The membership reported while monitoring is disabled (no zone
    /// defined) or before the first position sample arrives. No alert
    /// is possible in either case.
    pub fn vacuously_inside() -> MembershipState {
        MembershipState {
            inside_zone: true,
            distance_meters: 0.0,
        }
    }
}
