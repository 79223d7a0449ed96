//! A number of methods to generate random data for testing.

use super::{PositionRecord, PositionSource};
use crate::geofence::geofence_types::location::Coordinate;
use crate::geofence::geofence_types::zone::SafeZone;

use anyhow::Error;
use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use ordered_float::OrderedFloat;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// meters spanned by one degree of latitude
const METERS_PER_DEGREE_LATITUDE: f64 = 111_194.926;

/// Generate a random coordinate anywhere on earth.
pub fn generate_coordinate() -> Coordinate {
    let mut rng = rand::thread_rng();
    let latitude = OrderedFloat(rng.gen_range(-90.0..=90.0));
    let longitude = OrderedFloat(rng.gen_range(-180.0..=180.0));

    Coordinate {
        latitude,
        longitude,
    }
}

/// Generate a random coordinate within `radius_meters` of a center.
///
/// Uses an equirectangular offset, which is accurate at zone scale
/// (hundreds to thousands of meters) away from the poles. Intended for
/// test fixtures, not navigation.
pub fn generate_coordinate_near(center: &Coordinate, radius_meters: f64) -> Coordinate {
    let mut rng = rand::thread_rng();
    let bearing = rng.gen_range(0.0..std::f64::consts::TAU);
    let distance = rng.gen_range(0.0..=radius_meters * 0.99);

    let d_lat = distance * bearing.cos() / METERS_PER_DEGREE_LATITUDE;
    let d_lon = distance * bearing.sin()
        / (METERS_PER_DEGREE_LATITUDE * center.latitude.into_inner().to_radians().cos());

    Coordinate {
        latitude: OrderedFloat((center.latitude.into_inner() + d_lat).clamp(-90.0, 90.0)),
        longitude: OrderedFloat((center.longitude.into_inner() + d_lon).clamp(-180.0, 180.0)),
    }
}

/// Generate a position record for a subject at a coordinate, stamped now.
pub fn generate_record(subject_id: Uuid, coordinate: &Coordinate) -> PositionRecord {
    let mut rng = rand::thread_rng();

    PositionRecord {
        record_id: Uuid::new_v4(),
        subject_id,
        latitude: coordinate.latitude.into_inner(),
        longitude: coordinate.longitude.into_inner(),
        timestamp: Utc::now(),
        accuracy_meters: rng.gen_range(1.0..=25.0),
    }
}

/// A scripted in-memory [`PositionSource`].
///
/// Serves a fixed zone and a queue of position records in order; once
/// the queue is exhausted the last served record is repeated, matching
/// a feed whose subject stopped moving. Every served record is kept for
/// history queries.
pub struct MockPositionSource {
    zone: Option<SafeZone>,
    script: Mutex<VecDeque<PositionRecord>>,
    served: Mutex<Vec<PositionRecord>>,
}

impl MockPositionSource {
    /// Creates a source with a zone and no scripted records yet.
    pub fn new(zone: Option<SafeZone>) -> Self {
        MockPositionSource {
            zone,
            script: Mutex::new(VecDeque::new()),
            served: Mutex::new(vec![]),
        }
    }

    /// Creates a source that will serve the given records in order.
    pub fn with_script(zone: Option<SafeZone>, records: Vec<PositionRecord>) -> Self {
        MockPositionSource {
            zone,
            script: Mutex::new(records.into()),
            served: Mutex::new(vec![]),
        }
    }

    /// Appends a record to the script.
    pub fn push_record(&self, record: PositionRecord) {
        self.script
            .lock()
            .expect("(push_record) mock script lock poisoned")
            .push_back(record);
    }
}

impl PositionSource for MockPositionSource {
    fn current_position(&self) -> BoxFuture<'_, Result<Option<PositionRecord>, Error>> {
        Box::pin(async move {
            let next = self
                .script
                .lock()
                .expect("(current_position) mock script lock poisoned")
                .pop_front();

            let mut served = self
                .served
                .lock()
                .expect("(current_position) mock served lock poisoned");

            match next {
                Some(record) => {
                    served.push(record.clone());
                    Ok(Some(record))
                }
                None => Ok(served.last().cloned()),
            }
        })
    }

    fn position_history(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Result<Vec<PositionRecord>, Error>> {
        Box::pin(async move {
            let served = self
                .served
                .lock()
                .expect("(position_history) mock served lock poisoned");

            Ok(served
                .iter()
                .filter(|record| record.timestamp >= from && record.timestamp <= to)
                .cloned()
                .collect())
        })
    }

    fn safe_zone(&self) -> BoxFuture<'_, Result<Option<SafeZone>, Error>> {
        Box::pin(async move { Ok(self.zone) })
    }
}
