use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::fields::{Fields, FromJson};
use crate::error::MbtaResult;

/// Last reported position of a vehicle serving a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    pub vehicle_id: String,
    pub vehicle_lat: f64,
    pub vehicle_lon: f64,
    /// Degrees clockwise from north.
    pub vehicle_bearing: i64,
    pub vehicle_speed: f64,
    pub vehicle_timestamp: DateTime<Utc>,
}

impl FromJson for Vehicle {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "vehicle")?;
        Ok(Self {
            vehicle_id: f.string("vehicle_id")?,
            vehicle_lat: f.f64("vehicle_lat")?,
            vehicle_lon: f.f64("vehicle_lon")?,
            vehicle_bearing: f.i64("vehicle_bearing")?,
            vehicle_speed: f.f64("vehicle_speed")?,
            vehicle_timestamp: f.datetime("vehicle_timestamp")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MbtaError;
    use serde_json::json;

    #[test]
    fn test_vehicle_all_fields() {
        let value = json!({
            "vehicle_id": "1545",
            "vehicle_lat": "42.3744",
            "vehicle_lon": "-71.1190",
            "vehicle_bearing": "195",
            "vehicle_speed": "8",
            "vehicle_timestamp": "1445470925"
        });
        let vehicle = Vehicle::from_value(&value).unwrap();
        assert_eq!(vehicle.vehicle_id, "1545");
        assert_eq!(vehicle.vehicle_bearing, 195);
        assert_eq!(vehicle.vehicle_speed, 8.0);
        assert_eq!(vehicle.vehicle_timestamp.timestamp(), 1_445_470_925);
    }

    #[test]
    fn test_vehicle_requires_speed() {
        let value = json!({
            "vehicle_id": "1545",
            "vehicle_lat": "42.3744",
            "vehicle_lon": "-71.1190",
            "vehicle_bearing": "195",
            "vehicle_timestamp": "1445470925"
        });
        let err = Vehicle::from_value(&value).unwrap_err();
        assert!(matches!(err, MbtaError::DataShape { ref field, .. } if field == "vehicle_speed"));
    }
}
