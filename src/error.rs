//! Error type shared by the client and the model constructors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MbtaError {
    /// The API answered with `{"error": {"message": ...}}`.
    #[error("MBTA API error: {0}")]
    Upstream(String),

    /// A required field is missing, or a field has an incompatible type.
    #[error("Invalid field {field:?}: {reason}")]
    DataShape { field: String, reason: String },

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Deserialize error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A multi-route request was given no usable route id.
    #[error("At least one route id is required")]
    NoRoutes,

    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

impl MbtaError {
    pub(crate) fn missing(field: &str) -> Self {
        MbtaError::DataShape {
            field: field.to_string(),
            reason: "required field is missing".to_string(),
        }
    }

    pub(crate) fn mismatch(field: &str, expected: &str) -> Self {
        MbtaError::DataShape {
            field: field.to_string(),
            reason: format!("expected {expected}"),
        }
    }

    /// True for failures below the API layer: network, HTTP status, malformed JSON.
    pub fn is_transport(&self) -> bool {
        matches!(self, MbtaError::Transport(_) | MbtaError::Decode(_))
    }
}

pub type MbtaResult<T> = Result<T, MbtaError>;
