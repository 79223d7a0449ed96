//! Zone membership monitoring.
//!
//! Combines the distance evaluator and the safe zone model with the
//! latest reading from the position feed to derive the externally
//! visible "outside zone" signal. Membership is recomputed on every new
//! position sample and on every zone edit; a single reading outside the
//! radius flips the signal, there is no smoothing or hysteresis.

use crate::geofence::geofence_types::location::Coordinate;
use crate::geofence::geofence_types::membership::MembershipState;
use crate::geofence::geofence_types::sample::PositionSample;
use crate::geofence::geofence_types::zone::{SafeZone, SafeZoneModel};
use crate::geofence::geofence_utils::haversine;
use crate::geofence::GeofenceError;
use serde::{Deserialize, Serialize};

/// Monitoring state, determined by whether a zone is defined.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    /// No zone defined; membership is vacuously inside.
    Unmonitored,

    /// A zone is defined and every position sample is evaluated
    /// against it.
    Monitored,
}

/// Evaluate a position against a zone.
///
/// The single decision rule of the subsystem. With no zone, membership
/// is vacuously inside and the distance reads 0.0 (monitoring
/// disabled). With a zone, the position is inside when its great-circle
/// distance from the center does not exceed the radius; the boundary is
/// inclusive, so a reading exactly on the radius raises no alert.
pub fn evaluate(position: &PositionSample, zone: Option<&SafeZone>) -> MembershipState {
    let Some(zone) = zone else {
        return MembershipState::vacuously_inside();
    };

    let distance_meters = haversine::distance_meters(&position.coordinate, &zone.center);

    MembershipState {
        inside_zone: distance_meters <= zone.radius_meters,
        distance_meters,
    }
}

/// Tracks the latest position sample against the current safe zone.
///
/// The monitor is an explicit context object owned by the composing
/// host; there is no global instance. It holds only the most recent
/// sample and the zone model, both most-recent-wins. All operations are
/// synchronous and never block or yield. A host with concurrent readers
/// and writers must place the whole monitor behind one mutual exclusion
/// boundary so the zone and position slots can not be observed torn
/// (see [`feed::poll_loop`](crate::feed::poll_loop)).
#[derive(Debug, Default, Clone)]
pub struct ZoneMonitor {
    zone_model: SafeZoneModel,
    last_position: Option<PositionSample>,
}

impl ZoneMonitor {
    /// Creates a monitor with no zone and no position; reports
    /// [`MonitorState::Unmonitored`] until a zone is defined.
    pub fn new() -> Self {
        ZoneMonitor::default()
    }

    /// Restores a monitor from a zone previously loaded from the
    /// external zone store.
    pub fn from_zone(zone: Option<SafeZone>) -> Self {
        ZoneMonitor {
            zone_model: SafeZoneModel::from_zone(zone),
            last_position: None,
        }
    }

    /// Current monitoring state.
    pub fn state(&self) -> MonitorState {
        match self.zone_model.zone() {
            Some(_) => MonitorState::Monitored,
            None => MonitorState::Unmonitored,
        }
    }

    /// The current zone, if any.
    pub fn zone(&self) -> Option<&SafeZone> {
        self.zone_model.zone()
    }

    /// The most recent position sample, if any has arrived yet.
    pub fn last_position(&self) -> Option<&PositionSample> {
        self.last_position.as_ref()
    }

    /// Membership derived from the latest sample and the current zone.
    ///
    /// Vacuously inside while no zone is defined, and also before the
    /// first sample arrives (no alert until there is a reading to
    /// evaluate).
    pub fn membership(&self) -> MembershipState {
        let (Some(position), Some(zone)) = (self.last_position.as_ref(), self.zone_model.zone())
        else {
            return MembershipState::vacuously_inside();
        };

        evaluate(position, Some(zone))
    }

    /// Records a new sample from the position feed and returns the
    /// fresh membership.
    ///
    /// The transition into the outside state is the alert condition; it
    /// is logged here and returned to the caller, which owns the
    /// caregiver-visible notification.
    pub fn record_position(&mut self, sample: PositionSample) -> MembershipState {
        let before = self.membership();
        self.last_position = Some(sample);

        self.recompute("record_position", before)
    }

    /// Defines a new zone or replaces the current one wholesale,
    /// transitioning to [`MonitorState::Monitored`].
    ///
    /// Membership is recomputed immediately against the last known
    /// position; no new sample is required. On failure the previous
    /// zone, if any, stays in effect.
    pub fn set_zone(
        &mut self,
        center: Coordinate,
        radius_meters: f64,
    ) -> Result<MembershipState, GeofenceError> {
        let before = self.membership();
        self.zone_model.set_zone(center, radius_meters)?;

        Ok(self.recompute("set_zone", before))
    }

    /// Replaces the zone radius, keeping the center.
    ///
    /// Same recomputation rule as [`ZoneMonitor::set_zone`]: growing the
    /// radius past the last known distance flips an outside signal back
    /// to inside without waiting for the next sample.
    pub fn resize(&mut self, radius_meters: f64) -> Result<MembershipState, GeofenceError> {
        let before = self.membership();
        self.zone_model.resize(radius_meters)?;

        Ok(self.recompute("resize", before))
    }

    /// Moves the zone center, keeping the radius.
    pub fn recenter(&mut self, center: Coordinate) -> Result<MembershipState, GeofenceError> {
        let before = self.membership();
        self.zone_model.recenter(center)?;

        Ok(self.recompute("recenter", before))
    }

    /// Clears the zone, returning to [`MonitorState::Unmonitored`].
    ///
    /// Membership becomes vacuously inside; an active alert ends.
    pub fn clear_zone(&mut self) -> MembershipState {
        let before = self.membership();
        self.zone_model.clear_zone();

        self.recompute("clear_zone", before)
    }

    fn recompute(&self, operation: &str, before: MembershipState) -> MembershipState {
        let after = self.membership();

        if before.inside_zone && !after.inside_zone {
            geofence_warn!(
                "({}) tracked person left the safe zone: distance [{:.1}] m.",
                operation,
                after.distance_meters
            );
        } else if !before.inside_zone && after.inside_zone {
            geofence_info!(
                "({}) tracked person returned to the safe zone: distance [{:.1}] m.",
                operation,
                after.distance_meters
            );
        } else {
            geofence_debug!(
                "({}) membership unchanged: inside [{}], distance [{:.1}] m.",
                operation,
                after.inside_zone,
                after.distance_meters
            );
        }

        after
    }
}

#[cfg(test)]
mod monitor_tests {
    use super::*;
    use chrono::Utc;

    /// meters spanned by one degree of latitude
    const METERS_PER_DEGREE_LATITUDE: f64 = 111_194.926;

    fn zone_center() -> Coordinate {
        Coordinate::new(37.5000, 127.0000).unwrap()
    }

    /// A sample roughly `meters` north of the zone center.
    fn sample_north_of_center(meters: f64) -> PositionSample {
        let latitude = 37.5000 + meters / METERS_PER_DEGREE_LATITUDE;

        PositionSample {
            coordinate: Coordinate::new(latitude, 127.0000).unwrap(),
            timestamp: Utc::now(),
            accuracy_meters: 10.0,
        }
    }

    #[test]
    fn test_evaluate_without_zone_is_vacuously_inside() {
        let sample = sample_north_of_center(10_000.0);
        let membership = evaluate(&sample, None);

        assert!(membership.inside_zone);
        assert_eq!(membership.distance_meters, 0.0);
    }

    #[test]
    fn test_evaluate_agrees_with_distance_and_radius() {
        let zone = SafeZone {
            center: zone_center(),
            radius_meters: 500.0,
        };

        for meters in [0.0, 250.0, 499.0, 501.0, 600.0, 5_000.0] {
            let sample = sample_north_of_center(meters);
            let membership = evaluate(&sample, Some(&zone));

            assert_eq!(
                membership.inside_zone,
                membership.distance_meters <= zone.radius_meters
            );
        }
    }

    #[test]
    fn test_boundary_is_inclusive() {
        // Build the radius from the computed distance so the boundary
        // case is exact: a position precisely on the radius is inside.
        let sample = sample_north_of_center(500.0);
        let distance = crate::geofence::geofence_utils::haversine::distance_meters(
            &sample.coordinate,
            &zone_center(),
        );

        let on_boundary = SafeZone {
            center: zone_center(),
            radius_meters: distance,
        };
        assert!(evaluate(&sample, Some(&on_boundary)).inside_zone);

        let hair_smaller = SafeZone {
            center: zone_center(),
            radius_meters: distance - 0.001,
        };
        assert!(!evaluate(&sample, Some(&hair_smaller)).inside_zone);
    }

    #[test]
    fn test_position_past_radius_is_outside() {
        let zone = SafeZone {
            center: zone_center(),
            radius_meters: 500.0,
        };

        let membership = evaluate(&sample_north_of_center(501.0), Some(&zone));
        assert!(!membership.inside_zone);
        assert!((membership.distance_meters - 501.0).abs() < 0.1);

        let membership = evaluate(&sample_north_of_center(499.0), Some(&zone));
        assert!(membership.inside_zone);
    }

    #[test]
    fn test_monitor_starts_unmonitored() {
        let monitor = ZoneMonitor::new();

        assert_eq!(monitor.state(), MonitorState::Unmonitored);
        assert!(monitor.membership().inside_zone);
        assert!(monitor.last_position().is_none());
    }

    #[test]
    fn test_set_zone_transitions_to_monitored() {
        let mut monitor = ZoneMonitor::new();
        monitor.set_zone(zone_center(), 500.0).unwrap();

        assert_eq!(monitor.state(), MonitorState::Monitored);
    }

    #[test]
    fn test_no_alert_before_first_sample() {
        let mut monitor = ZoneMonitor::new();
        monitor.set_zone(zone_center(), 500.0).unwrap();

        // zone defined but no reading yet: no alert possible
        assert!(monitor.membership().inside_zone);
        assert_eq!(monitor.membership().distance_meters, 0.0);
    }

    #[test]
    fn test_record_position_flips_signal_on_single_reading() {
        let mut monitor = ZoneMonitor::new();
        monitor.set_zone(zone_center(), 500.0).unwrap();

        assert!(monitor.record_position(sample_north_of_center(100.0)).inside_zone);
        assert!(!monitor.record_position(sample_north_of_center(600.0)).inside_zone);
        assert!(monitor.record_position(sample_north_of_center(100.0)).inside_zone);
    }

    #[test]
    fn test_resize_reevaluates_last_known_position() {
        let mut monitor = ZoneMonitor::new();
        monitor.set_zone(zone_center(), 500.0).unwrap();

        // 600 m away with a 500 m radius: outside
        assert!(!monitor.record_position(sample_north_of_center(600.0)).inside_zone);

        // growing the radius flips membership with the same sample
        let membership = monitor.resize(1000.0).unwrap();
        assert!(membership.inside_zone);
        assert!((membership.distance_meters - 600.0).abs() < 0.1);

        // and shrinking it flips the signal back
        assert!(!monitor.resize(500.0).unwrap().inside_zone);
    }

    #[test]
    fn test_recenter_reevaluates_last_known_position() {
        let mut monitor = ZoneMonitor::new();
        monitor.set_zone(zone_center(), 500.0).unwrap();
        assert!(!monitor.record_position(sample_north_of_center(600.0)).inside_zone);

        // move the center onto the tracked person
        let membership = monitor
            .recenter(sample_north_of_center(600.0).coordinate)
            .unwrap();
        assert!(membership.inside_zone);
        assert_eq!(membership.distance_meters, 0.0);
    }

    #[test]
    fn test_set_zone_is_idempotent_for_membership() {
        let mut monitor = ZoneMonitor::new();
        monitor.record_position(sample_north_of_center(300.0));

        let first = monitor.set_zone(zone_center(), 500.0).unwrap();
        let second = monitor.set_zone(zone_center(), 500.0).unwrap();

        assert_eq!(first, second);
        assert_eq!(monitor.membership(), first);
    }

    #[test]
    fn test_failed_edit_leaves_membership_unchanged() {
        let mut monitor = ZoneMonitor::new();
        monitor.set_zone(zone_center(), 500.0).unwrap();
        monitor.record_position(sample_north_of_center(600.0));

        let before = monitor.membership();
        assert_eq!(
            monitor.resize(0.0),
            Err(GeofenceError::InvalidRadius(0.0))
        );
        assert_eq!(monitor.membership(), before);
    }

    #[test]
    fn test_clear_zone_ends_monitoring_and_alert() {
        let mut monitor = ZoneMonitor::new();
        monitor.set_zone(zone_center(), 500.0).unwrap();
        assert!(!monitor.record_position(sample_north_of_center(600.0)).inside_zone);

        let membership = monitor.clear_zone();
        assert!(membership.inside_zone);
        assert_eq!(monitor.state(), MonitorState::Unmonitored);

        // the last sample is retained for a future zone definition
        assert!(monitor.last_position().is_some());
        assert_eq!(
            monitor.resize(500.0),
            Err(GeofenceError::NoZoneDefined)
        );
    }

    #[test]
    fn test_sample_recorded_before_zone_is_used_after_set_zone() {
        let mut monitor = ZoneMonitor::new();

        // feed delivers before the caregiver has defined a zone
        assert!(monitor.record_position(sample_north_of_center(600.0)).inside_zone);

        // defining the zone evaluates the retained sample immediately
        let membership = monitor.set_zone(zone_center(), 500.0).unwrap();
        assert!(!membership.inside_zone);
    }
}
