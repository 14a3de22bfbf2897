//! Query parameter construction for MBTA API requests.
//!
//! The API takes route lists comma-joined, dates as seconds since the UTC
//! epoch, and booleans as `true`/`false`. Optional parameters are left out of
//! the query entirely rather than sent empty.

use chrono::{DateTime, Utc};
use std::fmt::Display;

/// One or more route identifiers, rendered as a comma-joined list.
///
/// Blank ids are dropped on construction. A request with no ids left is
/// rejected by the client before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteIds(Vec<String>);

impl RouteIds {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            ids.into_iter()
                .map(Into::into)
                .filter(|id: &String| !id.trim().is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value sent as the `routes` parameter.
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

impl From<&str> for RouteIds {
    fn from(id: &str) -> Self {
        Self::new([id])
    }
}

impl From<String> for RouteIds {
    fn from(id: String) -> Self {
        Self::new([id])
    }
}

impl<S: Into<String>> From<Vec<S>> for RouteIds {
    fn from(ids: Vec<S>) -> Self {
        Self::new(ids)
    }
}

impl<S: Into<String> + Clone> From<&[S]> for RouteIds {
    fn from(ids: &[S]) -> Self {
        Self::new(ids.iter().cloned())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for RouteIds {
    fn from(ids: [S; N]) -> Self {
        Self::new(ids)
    }
}

/// Seconds since the Unix epoch, as the API expects for `datetime`.
pub fn datetime_to_epoch(dt: DateTime<Utc>) -> i64 {
    dt.timestamp()
}

/// Whether alert headers are attached to prediction and vehicle responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertFlags {
    pub include_access_alerts: bool,
    pub include_service_alerts: bool,
}

impl Default for AlertFlags {
    fn default() -> Self {
        Self {
            include_access_alerts: false,
            include_service_alerts: true,
        }
    }
}

/// Optional filters for `schedulebystop`.
///
/// The API requires `route_id` whenever `direction_id` is given; that rule is
/// enforced upstream and surfaces as an API error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub route_id: Option<String>,
    pub direction_id: Option<String>,
    pub date: Option<DateTime<Utc>>,
    /// Minutes, 1 to 1440. Upstream default is 60.
    pub max_time: Option<u32>,
    /// 1 to 100. Upstream default is 5.
    pub max_trips: Option<u32>,
}

impl ScheduleQuery {
    pub fn route(mut self, route_id: impl Into<String>) -> Self {
        self.route_id = Some(route_id.into());
        self
    }

    pub fn direction(mut self, direction_id: impl Into<String>) -> Self {
        self.direction_id = Some(direction_id.into());
        self
    }

    pub fn date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub fn max_time(mut self, minutes: u32) -> Self {
        self.max_time = Some(minutes);
        self
    }

    pub fn max_trips(mut self, trips: u32) -> Self {
        self.max_trips = Some(trips);
        self
    }
}

/// Ordered list of query pairs for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        self.0.push((key, value.to_string()));
        self
    }

    pub fn push_opt<V: Display>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn push_routes(&mut self, route_ids: &RouteIds) -> &mut Self {
        self.push("routes", route_ids.joined())
    }

    pub fn push_datetime(&mut self, date: Option<DateTime<Utc>>) -> &mut Self {
        self.push_opt("datetime", date.map(datetime_to_epoch))
    }

    pub fn push_alert_flags(&mut self, flags: AlertFlags) -> &mut Self {
        self.push("include_access_alerts", flags.include_access_alerts)
            .push("include_service_alerts", flags.include_service_alerts)
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
