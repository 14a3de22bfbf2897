mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::Method;
use reqwest::blocking::Request;
use serde_json::Value;
use tracing::{trace, warn};
use url::Url;

use crate::error::{MbtaError, MbtaResult};

/// Issues a GET for `url` and decodes the body as JSON.
///
/// A body carrying `{"error": {"message": ...}}` becomes
/// [`MbtaError::Upstream`] whatever the HTTP status. Other non-2xx responses
/// become [`MbtaError::Transport`].
pub fn get_json<C: HttpClient>(client: &C, url: Url) -> MbtaResult<Value> {
    let resp = client.execute(Request::new(Method::GET, url))?;
    let status_error = resp.error_for_status_ref().err();
    let body = resp.text()?;
    trace!(bytes = body.len(), "Response body received");

    let data: Value = match serde_json::from_str(&body) {
        Ok(data) => data,
        Err(e) => return Err(status_error.map_or_else(|| MbtaError::Decode(e), MbtaError::Transport)),
    };

    if let Some(message) = upstream_error(&data) {
        warn!(%message, "MBTA API returned an error");
        return Err(MbtaError::Upstream(message));
    }

    match status_error {
        Some(e) => Err(MbtaError::Transport(e)),
        None => Ok(data),
    }
}

fn upstream_error(data: &Value) -> Option<String> {
    let error = data.get("error").filter(|e| !e.is_null())?;
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| error.to_string());
    Some(message)
}
