use serde::Serialize;
use serde_json::Value;

use super::fields::{Fields, FromJson};
use super::{Alert, Mode, Stop, Vehicle};
use crate::error::MbtaResult;

/// A stop and the modes and routes serving it (`routesbystop`).
///
/// Carries the identity fields of [`Stop`] rather than a full `Stop`:
/// coordinates are optional because stop-centred responses name the stop
/// without always repeating its position, and the per-trip fields
/// (`distance`, `stop_sequence`, `sch_*`) never appear at this level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopWithMode {
    pub stop_id: String,
    pub stop_name: String,
    pub parent_station: Option<String>,
    pub parent_station_name: Option<String>,
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
    pub mode: Vec<Mode>,
}

impl FromJson for StopWithMode {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "response")?;
        Ok(Self {
            stop_id: f.string("stop_id")?,
            stop_name: f.string("stop_name")?,
            parent_station: f.opt_string("parent_station")?,
            parent_station_name: f.opt_string("parent_station_name")?,
            stop_lat: f.opt_f64("stop_lat")?,
            stop_lon: f.opt_f64("stop_lon")?,
            mode: f.list("mode")?,
        })
    }
}

/// Scheduled or predicted departures at one stop, with any alert headers.
///
/// Coordinates are optional for the same reason as on [`StopWithMode`].
/// `alert_headers` is empty when service alerts were not requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    pub stop_id: String,
    pub stop_name: String,
    pub parent_station: Option<String>,
    pub parent_station_name: Option<String>,
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
    pub distance: Option<f64>,
    pub stop_order: Option<i64>,
    pub mode: Vec<Mode>,
    pub alert_headers: Vec<Alert>,
}

impl FromJson for Schedule {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "response")?;
        Ok(Self {
            stop_id: f.string("stop_id")?,
            stop_name: f.string("stop_name")?,
            parent_station: f.opt_string("parent_station")?,
            parent_station_name: f.opt_string("parent_station_name")?,
            stop_lat: f.opt_f64("stop_lat")?,
            stop_lon: f.opt_f64("stop_lon")?,
            distance: f.opt_f64("distance")?,
            stop_order: f.opt_i64("stop_order")?,
            mode: f.list("mode")?,
            alert_headers: f.list("alert_headers")?,
        })
    }
}

/// The stops of a single trip, scheduled or predicted, with its vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripSchedule {
    pub route_id: String,
    pub route_name: String,
    pub trip_id: String,
    pub trip_name: String,
    pub trip_headsign: Option<String>,
    pub direction_id: String,
    pub direction_name: String,
    pub stop: Vec<Stop>,
    pub vehicle: Option<Vehicle>,
}

impl FromJson for TripSchedule {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "response")?;
        Ok(Self {
            route_id: f.string("route_id")?,
            route_name: f.string("route_name")?,
            trip_id: f.string("trip_id")?,
            trip_name: f.string("trip_name")?,
            trip_headsign: f.opt_string("trip_headsign")?,
            direction_id: f.string("direction_id")?,
            direction_name: f.string("direction_name")?,
            stop: f.list("stop")?,
            vehicle: f.object("vehicle")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_routes_by_stop_without_coordinates() {
        let value = json!({
            "stop_id": "place-davis",
            "stop_name": "Davis",
            "mode": [{
                "route_type": "3",
                "mode_name": "Bus",
                "route": [{ "route_id": "87", "route_name": "87" }]
            }]
        });
        let stop = StopWithMode::from_value(&value).unwrap();
        assert_eq!(stop.stop_lat, None);
        assert_eq!(stop.mode[0].route[0].route_id, "87");
    }

    #[test]
    fn test_schedule_with_alerts() {
        let value = json!({
            "stop_id": "place-alfcl",
            "stop_name": "Alewife",
            "mode": [],
            "alert_headers": [{
                "alert_id": 1,
                "header_text": "Shuttle buses replace Red Line service",
                "effect_name": "Shuttle"
            }]
        });
        let schedule = Schedule::from_value(&value).unwrap();
        assert!(schedule.mode.is_empty());
        assert_eq!(schedule.alert_headers[0].effect_name, "Shuttle");
    }

    #[test]
    fn test_trip_schedule_requires_direction() {
        let value = json!({
            "route_id": "Red",
            "route_name": "Red Line",
            "trip_id": "28137487",
            "trip_name": "5:12 pm from Alewife to Ashmont"
        });
        assert!(TripSchedule::from_value(&value).is_err());
    }
}
