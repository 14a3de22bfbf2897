use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::fields::{Fields, FromJson};
use super::{Stop, Vehicle};
use crate::error::MbtaResult;

/// A single run of a vehicle along a route in one direction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub trip_id: String,
    pub trip_name: String,
    pub trip_headsign: Option<String>,
    pub sch_arr_dt: Option<DateTime<Utc>>,
    pub sch_dep_dt: Option<DateTime<Utc>>,
    pub pre_dt: Option<DateTime<Utc>>,
    /// Seconds until the predicted arrival.
    pub pre_away: Option<i64>,
    pub vehicle: Option<Vehicle>,
    pub stop: Vec<Stop>,
}

impl FromJson for Trip {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "trip")?;
        Ok(Self {
            trip_id: f.string("trip_id")?,
            trip_name: f.string("trip_name")?,
            trip_headsign: f.opt_string("trip_headsign")?,
            sch_arr_dt: f.opt_datetime("sch_arr_dt")?,
            sch_dep_dt: f.opt_datetime("sch_dep_dt")?,
            pre_dt: f.opt_datetime("pre_dt")?,
            pre_away: f.opt_i64("pre_away")?,
            vehicle: f.object("vehicle")?,
            stop: f.list("stop")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicted_trip_with_vehicle() {
        let value = json!({
            "trip_id": "28137487",
            "trip_name": "5:12 pm from Alewife to Ashmont",
            "trip_headsign": "Ashmont",
            "sch_arr_dt": "1445472720",
            "sch_dep_dt": "1445472720",
            "pre_dt": "1445472800",
            "pre_away": "453",
            "vehicle": {
                "vehicle_id": "5FB3236A",
                "vehicle_lat": "42.39543",
                "vehicle_lon": "-71.14196",
                "vehicle_bearing": "180",
                "vehicle_speed": "0",
                "vehicle_timestamp": "1445472300"
            }
        });
        let trip = Trip::from_value(&value).unwrap();
        assert_eq!(trip.trip_headsign.as_deref(), Some("Ashmont"));
        assert_eq!(trip.pre_away, Some(453));
        assert_eq!(trip.vehicle.unwrap().vehicle_id, "5FB3236A");
        assert!(trip.stop.is_empty());
    }

    #[test]
    fn test_nested_vehicle_error_propagates() {
        let value = json!({
            "trip_id": "1",
            "trip_name": "x",
            "vehicle": { "vehicle_id": "5" }
        });
        assert!(Trip::from_value(&value).is_err());
    }
}
