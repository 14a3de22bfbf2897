use serde::Serialize;
use serde_json::Value;

use super::fields::{Fields, FromJson};
use crate::error::MbtaResult;

/// Header of a service or accessibility alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub alert_id: String,
    pub header_text: String,
    /// e.g. `"Delay"`, `"Access Issue"`.
    pub effect_name: String,
}

impl FromJson for Alert {
    fn from_value(value: &Value) -> MbtaResult<Self> {
        let f = Fields::of(value, "alert_headers")?;
        Ok(Self {
            alert_id: f.string("alert_id")?,
            header_text: f.string("header_text")?,
            effect_name: f.string("effect_name")?,
        })
    }
}
