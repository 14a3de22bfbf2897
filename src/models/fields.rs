//! Typed access to the fields of a decoded JSON object.
//!
//! The v2 API sends nearly every scalar as a JSON string, so numeric and
//! boolean accessors accept either the native JSON type or a string holding
//! it. Empty strings count as absent.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::{MbtaError, MbtaResult};

/// A model that can be built from one JSON object of an API response.
pub trait FromJson: Sized {
    fn from_value(value: &Value) -> MbtaResult<Self>;
}

pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    /// `what` names the value in the error when it is not a JSON object.
    pub(crate) fn of(value: &'a Value, what: &str) -> MbtaResult<Self> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or_else(|| MbtaError::mismatch(what, "a JSON object"))
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        match self.map.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(v) => Some(v),
        }
    }

    fn required(&self, name: &str) -> MbtaResult<&'a Value> {
        self.present(name).ok_or_else(|| MbtaError::missing(name))
    }

    pub(crate) fn string(&self, name: &str) -> MbtaResult<String> {
        as_string(name, self.required(name)?)
    }

    pub(crate) fn opt_string(&self, name: &str) -> MbtaResult<Option<String>> {
        self.present(name).map(|v| as_string(name, v)).transpose()
    }

    pub(crate) fn f64(&self, name: &str) -> MbtaResult<f64> {
        as_f64(name, self.required(name)?)
    }

    pub(crate) fn opt_f64(&self, name: &str) -> MbtaResult<Option<f64>> {
        self.present(name).map(|v| as_f64(name, v)).transpose()
    }

    pub(crate) fn i64(&self, name: &str) -> MbtaResult<i64> {
        as_i64(name, self.required(name)?)
    }

    pub(crate) fn opt_i64(&self, name: &str) -> MbtaResult<Option<i64>> {
        self.present(name).map(|v| as_i64(name, v)).transpose()
    }

    pub(crate) fn datetime(&self, name: &str) -> MbtaResult<DateTime<Utc>> {
        as_datetime(name, self.i64(name)?)
    }

    pub(crate) fn opt_datetime(&self, name: &str) -> MbtaResult<Option<DateTime<Utc>>> {
        self.opt_i64(name)?
            .map(|secs| as_datetime(name, secs))
            .transpose()
    }

    pub(crate) fn opt_bool(&self, name: &str) -> MbtaResult<Option<bool>> {
        self.present(name)
            .map(|v| match v {
                Value::Bool(b) => Ok(*b),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
                Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
                _ => Err(MbtaError::mismatch(name, "a boolean")),
            })
            .transpose()
    }

    /// A missing or null list decodes as empty.
    pub(crate) fn list<T: FromJson>(&self, name: &str) -> MbtaResult<Vec<T>> {
        match self.present(name) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items.iter().map(T::from_value).collect(),
            Some(_) => Err(MbtaError::mismatch(name, "a list")),
        }
    }

    /// Like [`Fields::list`], but absence is a `DataShape` error. Used for
    /// the top-level collection an endpoint exists to return.
    pub(crate) fn required_list<T: FromJson>(&self, name: &str) -> MbtaResult<Vec<T>> {
        match self.map.get(name) {
            None | Some(Value::Null) => Err(MbtaError::missing(name)),
            Some(_) => self.list(name),
        }
    }

    pub(crate) fn object<T: FromJson>(&self, name: &str) -> MbtaResult<Option<T>> {
        self.present(name).map(T::from_value).transpose()
    }
}

fn as_string(name: &str, value: &Value) -> MbtaResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(MbtaError::mismatch(name, "a string")),
    }
}

fn as_f64(name: &str, value: &Value) -> MbtaResult<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| MbtaError::mismatch(name, "a number"))
}

fn as_i64(name: &str, value: &Value) -> MbtaResult<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| MbtaError::mismatch(name, "an integer"))
}

fn as_datetime(name: &str, secs: i64) -> MbtaResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| MbtaError::mismatch(name, "a unix timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field_of(err: MbtaError) -> String {
        match err {
            MbtaError::DataShape { field, .. } => field,
            other => panic!("expected DataShape, got {other:?}"),
        }
    }

    #[test]
    fn test_numbers_accept_strings() {
        let value = json!({ "lat": "42.3954", "seq": "7", "n": 3 });
        let fields = Fields::of(&value, "test").unwrap();
        assert_eq!(fields.f64("lat").unwrap(), 42.3954);
        assert_eq!(fields.i64("seq").unwrap(), 7);
        assert_eq!(fields.i64("n").unwrap(), 3);
        assert_eq!(fields.string("n").unwrap(), "3");
    }

    #[test]
    fn test_empty_string_is_absent() {
        let value = json!({ "parent_station": "", "stop_id": "" });
        let fields = Fields::of(&value, "test").unwrap();
        assert_eq!(fields.opt_string("parent_station").unwrap(), None);
        assert_eq!(field_of(fields.string("stop_id").unwrap_err()), "stop_id");
    }

    #[test]
    fn test_type_mismatch_names_field() {
        let value = json!({ "vehicle_bearing": "north", "stop": {} });
        let fields = Fields::of(&value, "test").unwrap();
        assert_eq!(
            field_of(fields.i64("vehicle_bearing").unwrap_err()),
            "vehicle_bearing"
        );
        assert_eq!(
            field_of(fields.list::<crate::models::Stop>("stop").unwrap_err()),
            "stop"
        );
    }

    #[test]
    fn test_bool_accepts_strings() {
        let value = json!({ "a": "true", "b": false, "c": "False" });
        let fields = Fields::of(&value, "test").unwrap();
        assert_eq!(fields.opt_bool("a").unwrap(), Some(true));
        assert_eq!(fields.opt_bool("b").unwrap(), Some(false));
        assert_eq!(fields.opt_bool("c").unwrap(), Some(false));
        assert_eq!(fields.opt_bool("d").unwrap(), None);
    }

    #[test]
    fn test_missing_list_is_empty() {
        let value = json!({ "trip": null });
        let fields = Fields::of(&value, "test").unwrap();
        assert!(fields.list::<crate::models::Trip>("trip").unwrap().is_empty());
        assert!(fields.list::<crate::models::Stop>("stop").unwrap().is_empty());
    }

    #[test]
    fn test_required_list_rejects_absence() {
        let value = json!({ "mode": [], "unexpected": 1 });
        let fields = Fields::of(&value, "response").unwrap();
        assert!(fields.required_list::<crate::models::Mode>("mode").unwrap().is_empty());
        assert_eq!(
            field_of(fields.required_list::<crate::models::Stop>("stop").unwrap_err()),
            "stop"
        );
    }

    #[test]
    fn test_non_object_is_rejected() {
        let value = json!([1, 2]);
        assert!(Fields::of(&value, "stop").is_err());
    }
}
