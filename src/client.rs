//! Blocking client for the MBTA v2 realtime API.
//!
//! Each method builds its query, performs one GET and turns the decoded body
//! into the matching model. Nothing is cached or retried; calling a method
//! twice issues two requests.

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::config::MbtaConfig;
use crate::error::{MbtaError, MbtaResult};
use crate::fetch::auth::UrlParam;
use crate::fetch::{BasicClient, HttpClient, get_json};
use crate::models::{
    Alert, Direction, Fields, FromJson, Mode, Schedule, Stop, StopWithMode, TripSchedule,
};
use crate::params::{AlertFlags, QueryParams, RouteIds, ScheduleQuery};

pub struct MbtaClient<C = BasicClient> {
    config: MbtaConfig,
    http: UrlParam<C>,
}

impl MbtaClient {
    pub fn new(api_key: impl Into<String>) -> MbtaResult<Self> {
        Self::with_config(MbtaConfig::new(api_key))
    }

    pub fn with_config(config: MbtaConfig) -> MbtaResult<Self> {
        Ok(Self::with_http_client(config, BasicClient::new()?))
    }
}

impl<C: HttpClient> MbtaClient<C> {
    /// Uses `inner` for transport. The API key from `config` is still
    /// appended to every request.
    pub fn with_http_client(config: MbtaConfig, inner: C) -> Self {
        let http = UrlParam::api_key(inner, config.api_key.clone());
        Self { config, http }
    }

    pub fn config(&self) -> &MbtaConfig {
        &self.config
    }

    fn request(&self, path: &str, params: &QueryParams) -> MbtaResult<Value> {
        let mut url = Url::parse(&self.config.endpoint(path))?;
        url.query_pairs_mut()
            .extend_pairs(params.iter())
            .append_pair("format", "json");

        debug!(path, "Requesting MBTA endpoint");
        get_json(&self.http, url)
    }

    /// Stops near a point, nearest first.
    #[tracing::instrument(skip(self))]
    pub fn get_stops_by_location(&self, lat: f64, lon: f64) -> MbtaResult<Vec<Stop>> {
        let mut params = QueryParams::new();
        params.push("lat", lat).push("lon", lon);

        let data = self.request("stopsbylocation", &params)?;
        Fields::of(&data, "response")?.required_list("stop")
    }

    /// Both directions of a route, each listing the stops it serves.
    #[tracing::instrument(skip(self))]
    pub fn get_stops_by_route(&self, route_id: &str) -> MbtaResult<Vec<Direction>> {
        let mut params = QueryParams::new();
        params.push("route", route_id);

        let data = self.request("stopsbyroute", &params)?;
        Fields::of(&data, "response")?.required_list("direction")
    }

    #[tracing::instrument(skip(self))]
    pub fn get_routes_by_stop(&self, stop_id: &str) -> MbtaResult<StopWithMode> {
        let mut params = QueryParams::new();
        params.push("stop", stop_id);

        let data = self.request("routesbystop", &params)?;
        StopWithMode::from_value(&data)
    }

    /// Scheduled arrivals and departures at a stop.
    ///
    /// Without a route in `query`, every route serving the stop is returned.
    #[tracing::instrument(skip(self))]
    pub fn get_schedules_by_stop(
        &self,
        stop_id: &str,
        query: &ScheduleQuery,
    ) -> MbtaResult<Schedule> {
        let mut params = QueryParams::new();
        params
            .push("stop", stop_id)
            .push_opt("route", query.route_id.as_deref())
            .push_opt("direction", query.direction_id.as_deref())
            .push_datetime(query.date)
            .push_opt("max_time", query.max_time)
            .push_opt("max_trips", query.max_trips);

        let data = self.request("schedulebystop", &params)?;
        Schedule::from_value(&data)
    }

    /// Scheduled trips for one or more routes, grouped by mode.
    #[tracing::instrument(skip(self, route_ids), fields(routes = tracing::field::Empty))]
    pub fn get_schedules_by_routes(
        &self,
        route_ids: impl Into<RouteIds>,
        date: Option<DateTime<Utc>>,
        max_time: Option<u32>,
        max_trips: Option<u32>,
    ) -> MbtaResult<Vec<Mode>> {
        let route_ids = checked_routes(route_ids.into())?;
        let mut params = QueryParams::new();
        params
            .push_routes(&route_ids)
            .push_datetime(date)
            .push_opt("max_time", max_time)
            .push_opt("max_trips", max_trips);

        let data = self.request("schedulebyroutes", &params)?;
        Fields::of(&data, "response")?.required_list("mode")
    }

    #[tracing::instrument(skip(self))]
    pub fn get_schedules_by_trip(
        &self,
        trip_id: &str,
        date: Option<DateTime<Utc>>,
    ) -> MbtaResult<TripSchedule> {
        let mut params = QueryParams::new();
        params.push("trip", trip_id).push_datetime(date);

        let data = self.request("schedulebytrip", &params)?;
        TripSchedule::from_value(&data)
    }

    /// Predicted arrivals and departures at a stop for the next hour.
    #[tracing::instrument(skip(self))]
    pub fn get_predictions_by_stop(
        &self,
        stop_id: &str,
        flags: AlertFlags,
    ) -> MbtaResult<Schedule> {
        let mut params = QueryParams::new();
        params.push("stop", stop_id).push_alert_flags(flags);

        let data = self.request("predictionsbystop", &params)?;
        Schedule::from_value(&data)
    }

    /// Predictions for upcoming and in-progress trips, plus alert headers.
    #[tracing::instrument(skip(self, route_ids), fields(routes = tracing::field::Empty))]
    pub fn get_predictions_by_routes(
        &self,
        route_ids: impl Into<RouteIds>,
        flags: AlertFlags,
    ) -> MbtaResult<(Vec<Mode>, Vec<Alert>)> {
        let route_ids = checked_routes(route_ids.into())?;
        let mut params = QueryParams::new();
        params.push_routes(&route_ids).push_alert_flags(flags);

        let data = self.request("predictionsbyroutes", &params)?;
        let fields = Fields::of(&data, "response")?;
        Ok((fields.required_list("mode")?, fields.list("alert_headers")?))
    }

    #[tracing::instrument(skip(self, route_ids), fields(routes = tracing::field::Empty))]
    pub fn get_vehicles_by_routes(
        &self,
        route_ids: impl Into<RouteIds>,
        flags: AlertFlags,
    ) -> MbtaResult<Vec<Mode>> {
        let route_ids = checked_routes(route_ids.into())?;
        let mut params = QueryParams::new();
        params.push_routes(&route_ids).push_alert_flags(flags);

        let data = self.request("vehiclesbyroutes", &params)?;
        Fields::of(&data, "response")?.required_list("mode")
    }

    #[tracing::instrument(skip(self))]
    pub fn get_predictions_by_trip(&self, trip_id: &str) -> MbtaResult<TripSchedule> {
        let mut params = QueryParams::new();
        params.push("trip", trip_id);

        let data = self.request("predictionsbytrip", &params)?;
        TripSchedule::from_value(&data)
    }

    #[tracing::instrument(skip(self))]
    pub fn get_vehicles_by_trip(&self, trip_id: &str) -> MbtaResult<TripSchedule> {
        let mut params = QueryParams::new();
        params.push("trip", trip_id);

        let data = self.request("vehiclesbytrip", &params)?;
        TripSchedule::from_value(&data)
    }

    /// Every route the API knows about, grouped by mode.
    #[tracing::instrument(skip(self))]
    pub fn get_routes(&self) -> MbtaResult<Vec<Mode>> {
        let data = self.request("routes", &QueryParams::new())?;
        Fields::of(&data, "response")?.required_list("mode")
    }

    #[tracing::instrument(skip(self))]
    pub fn get_server_time(&self) -> MbtaResult<DateTime<Utc>> {
        let data = self.request("servertime", &QueryParams::new())?;
        Fields::of(&data, "response")?.datetime("server_dt")
    }
}

fn checked_routes(route_ids: RouteIds) -> MbtaResult<RouteIds> {
    if route_ids.is_empty() {
        return Err(MbtaError::NoRoutes);
    }
    tracing::Span::current().record("routes", route_ids.joined().as_str());
    Ok(route_ids)
}
