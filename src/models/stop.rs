use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::fields::{Fields, FromJson};
use crate::error::MbtaResult;

/// A stop or station, as listed by `stopsbylocation`, `stopsbyroute` and the
/// per-trip endpoints.
///
/// `distance` is only set for proximity searches, `stop_order` for stops of a
/// route, and the time fields for stops of a trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub stop_id: String,
    pub stop_name: String,
    pub parent_station: Option<String>,
    pub parent_station_name: Option<String>,
    pub stop_lat: f64,
    pub stop_lon: f64,
    /// Miles from the searched location.
    pub distance: Option<f64>,
    pub stop_order: Option<i64>,
    pub stop_sequence: Option<i64>,
    pub sch_arr_dt: Option<DateTime<Utc>>,
    pub sch_dep_dt: Option<DateTime<Utc>>,
    pub pre_dt: Option<DateTime<Utc>>,
    /// Seconds until the predicted arrival.
    pub pre_away: Option<i64>,
}

impl FromJson for Stop {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "stop")?;
        Ok(Self {
            stop_id: f.string("stop_id")?,
            stop_name: f.string("stop_name")?,
            parent_station: f.opt_string("parent_station")?,
            parent_station_name: f.opt_string("parent_station_name")?,
            stop_lat: f.f64("stop_lat")?,
            stop_lon: f.f64("stop_lon")?,
            distance: f.opt_f64("distance")?,
            stop_order: f.opt_i64("stop_order")?,
            stop_sequence: f.opt_i64("stop_sequence")?,
            sch_arr_dt: f.opt_datetime("sch_arr_dt")?,
            sch_dep_dt: f.opt_datetime("sch_dep_dt")?,
            pre_dt: f.opt_datetime("pre_dt")?,
            pre_away: f.opt_i64("pre_away")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MbtaError;
    use serde_json::json;

    #[test]
    fn test_stop_from_location_search() {
        let value = json!({
            "stop_order": "",
            "stop_id": "place-alfcl",
            "stop_name": "Alewife",
            "parent_station": "",
            "parent_station_name": "",
            "stop_lat": "42.3954277038574",
            "stop_lon": "-71.1424865722656",
            "distance": "0.187489613890648"
        });
        let stop = Stop::from_value(&value).unwrap();
        assert_eq!(stop.stop_id, "place-alfcl");
        assert_eq!(stop.parent_station, None);
        assert_eq!(stop.stop_order, None);
        assert!((stop.stop_lat - 42.3954).abs() < 1e-3);
        assert!(stop.distance.unwrap() < 0.2);
    }

    #[test]
    fn test_stop_with_schedule_times() {
        let value = json!({
            "stop_sequence": "3",
            "stop_id": "70063",
            "stop_name": "Davis - Inbound",
            "stop_lat": "42.39674",
            "stop_lon": "-71.121815",
            "sch_arr_dt": "1445472000",
            "sch_dep_dt": 1445472060
        });
        let stop = Stop::from_value(&value).unwrap();
        assert_eq!(stop.stop_sequence, Some(3));
        assert_eq!(stop.sch_arr_dt.unwrap().timestamp(), 1_445_472_000);
        assert_eq!(stop.sch_dep_dt.unwrap().timestamp(), 1_445_472_060);
    }

    #[test]
    fn test_stop_missing_lat_is_data_shape_error() {
        let value = json!({
            "stop_id": "place-alfcl",
            "stop_name": "Alewife",
            "stop_lon": "-71.1424865722656"
        });
        match Stop::from_value(&value) {
            Err(MbtaError::DataShape { field, .. }) => assert_eq!(field, "stop_lat"),
            other => panic!("expected DataShape error, got {other:?}"),
        }
    }
}
