//! Position feed integration.
//!
//! The monitor core never polls; it reacts to readings handed to it.
//! This module owns that hand-off: [`PositionSource`] describes the
//! read-only data source the host platform provides, and [`poll_loop`]
//! drives a shared [`ZoneMonitor`] from it at a fixed cadence.

#[macro_use]
pub mod macros;

#[cfg(feature = "mock")]
#[allow(dead_code)]
pub mod mock;

use crate::geofence::geofence_types::location::Coordinate;
use crate::geofence::geofence_types::sample::PositionSample;
use crate::geofence::geofence_types::zone::SafeZone;
use crate::geofence::{GeofenceError, ZoneMonitor};

use anyhow::Error;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// A position record as served by the platform's location store.
///
/// Raw store shape: coordinates arrive unvalidated and are checked on
/// conversion into a [`PositionSample`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Identifier of the record itself.
    pub record_id: Uuid,

    /// The tracked person this record belongs to.
    pub subject_id: Uuid,

    /// Latitude in decimal degrees.
    pub latitude: f64,

    /// Longitude in decimal degrees.
    pub longitude: f64,

    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,

    /// Reported measurement accuracy in meters.
    pub accuracy_meters: f64,
}

impl TryFrom<&PositionRecord> for PositionSample {
    type Error = GeofenceError;

    fn try_from(record: &PositionRecord) -> Result<Self, GeofenceError> {
        let coordinate = Coordinate::new(record.latitude, record.longitude)?;

        Ok(PositionSample {
            coordinate,
            timestamp: record.timestamp,
            accuracy_meters: record.accuracy_meters,
        })
    }
}

/// Read-only access to the platform's location and zone data.
///
/// Implemented by the host over whatever transport it uses. The library
/// makes no assumption beyond these three reads; in particular it never
/// writes through this trait, and it accepts any delivery cadence.
pub trait PositionSource {
    /// The most recent position of the tracked person, if any reading
    /// exists yet.
    fn current_position(&self) -> BoxFuture<'_, Result<Option<PositionRecord>, Error>>;

    /// Recorded positions between the two instants, oldest first.
    fn position_history(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Result<Vec<PositionRecord>, Error>>;

    /// The persisted safe zone, if the caregiver has defined one.
    fn safe_zone(&self) -> BoxFuture<'_, Result<Option<SafeZone>, Error>>;
}

/// Drives a shared monitor from a position source.
///
/// Loads the persisted zone once at startup, then polls the source at
/// the configured interval and records every reading with the monitor.
/// One lock guards the monitor's zone and position slots together, so
/// concurrent readers never observe a torn update. A failed poll is
/// logged and retried at the next scheduled tick, nothing more. Returns
/// when the shutdown signal fires.
pub async fn poll_loop<S>(
    config: crate::config::Config,
    source: S,
    monitor: Arc<Mutex<ZoneMonitor>>,
    mut shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) where
    S: PositionSource + Send + 'static,
{
    feed_info!("(poll_loop) Start.");

    match source.safe_zone().await {
        Ok(Some(zone)) => {
            let mut monitor = monitor.lock().await;
            if let Err(e) = monitor.set_zone(zone.center, zone.radius_meters) {
                feed_error!("(poll_loop) Stored safe zone rejected: {}", e);
            }
        }
        Ok(None) => {
            feed_info!("(poll_loop) No safe zone defined, monitoring disabled.");
        }
        Err(e) => {
            feed_warn!("(poll_loop) Could not load the safe zone: {}", e);
        }
    }

    let interval_seconds = config.position_poll_interval_seconds as u64;
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_seconds));

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                feed_info!("(poll_loop) Shutdown signal received.");
                break;
            }
            _ = interval.tick() => {}
        }

        let record = match source.current_position().await {
            Ok(Some(record)) => record,
            Ok(None) => {
                feed_debug!("(poll_loop) No position reading yet.");
                continue;
            }
            Err(e) => {
                feed_warn!("(poll_loop) Position fetch failed: {}", e);
                continue;
            }
        };

        let sample = match PositionSample::try_from(&record) {
            Ok(sample) => sample,
            Err(e) => {
                feed_warn!(
                    "(poll_loop) Discarding invalid position record [{}]: {}",
                    record.record_id,
                    e
                );
                continue;
            }
        };

        let membership = monitor.lock().await.record_position(sample);
        feed_debug!(
            "(poll_loop) subject [{}]: distance [{:.1}] m, inside [{}].",
            record.subject_id,
            membership.distance_meters,
            membership.inside_zone
        );
    }

    feed_info!("(poll_loop) End.");
}

#[cfg(test)]
mod feed_tests {
    use super::*;

    #[test]
    fn test_record_converts_to_sample() {
        let record = PositionRecord {
            record_id: Uuid::new_v4(),
            subject_id: Uuid::new_v4(),
            latitude: 37.5665,
            longitude: 126.9780,
            timestamp: Utc::now(),
            accuracy_meters: 12.0,
        };

        let sample = PositionSample::try_from(&record).unwrap();
        assert_eq!(sample.coordinate, Coordinate::new(37.5665, 126.9780).unwrap());
        assert_eq!(sample.timestamp, record.timestamp);
        assert_eq!(sample.accuracy_meters, 12.0);
    }

    #[test]
    fn test_invalid_record_is_rejected() {
        let record = PositionRecord {
            record_id: Uuid::new_v4(),
            subject_id: Uuid::new_v4(),
            latitude: 95.0,
            longitude: 126.9780,
            timestamp: Utc::now(),
            accuracy_meters: 12.0,
        };

        assert_eq!(
            PositionSample::try_from(&record),
            Err(GeofenceError::InvalidCoordinate {
                latitude: 95.0,
                longitude: 126.9780
            })
        );
    }
}
