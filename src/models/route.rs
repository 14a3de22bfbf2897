use serde::Serialize;
use serde_json::Value;

use super::fields::{Fields, FromJson};
use super::{Stop, Trip};
use crate::error::MbtaResult;

/// One of the two travel directions of a route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Direction {
    pub direction_id: String,
    pub direction_name: String,
    pub trip: Vec<Trip>,
    pub stop: Vec<Stop>,
}

impl FromJson for Direction {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "direction")?;
        Ok(Self {
            direction_id: f.string("direction_id")?,
            direction_name: f.string("direction_name")?,
            trip: f.list("trip")?,
            stop: f.list("stop")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub route_id: String,
    pub route_name: String,
    pub direction: Vec<Direction>,
    /// Set for routes the MBTA does not advertise in trip planners.
    pub route_hide: Option<bool>,
}

impl FromJson for Route {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "route")?;
        Ok(Self {
            route_id: f.string("route_id")?,
            route_name: f.string("route_name")?,
            direction: f.list("direction")?,
            route_hide: f.opt_bool("route_hide")?,
        })
    }
}

/// Routes grouped by GTFS route type (subway, bus, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mode {
    pub route_type: String,
    pub mode_name: String,
    pub route: Vec<Route>,
}

impl FromJson for Mode {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "mode")?;
        Ok(Self {
            route_type: f.string("route_type")?,
            mode_name: f.string("mode_name")?,
            route: f.list("route")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MbtaError;
    use serde_json::json;

    #[test]
    fn test_mode_tree() {
        let value = json!({
            "route_type": "1",
            "mode_name": "Subway",
            "route": [{
                "route_id": "Red",
                "route_name": "Red Line",
                "route_hide": "true",
                "direction": [
                    { "direction_id": "0", "direction_name": "Southbound", "trip": [] },
                    { "direction_id": "1", "direction_name": "Northbound" }
                ]
            }]
        });
        let mode = Mode::from_value(&value).unwrap();
        let route = &mode.route[0];
        assert_eq!(route.route_hide, Some(true));
        assert_eq!(route.direction.len(), 2);
        assert!(route.direction[1].trip.is_empty());
        assert!(route.direction[1].stop.is_empty());
    }

    #[test]
    fn test_direction_missing_name() {
        let value = json!({ "direction_id": "0" });
        match Direction::from_value(&value) {
            Err(MbtaError::DataShape { field, .. }) => assert_eq!(field, "direction_name"),
            other => panic!("expected DataShape error, got {other:?}"),
        }
    }
}
