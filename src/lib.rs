pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod output;
pub mod params;

pub use client::MbtaClient;
pub use config::MbtaConfig;
pub use error::{MbtaError, MbtaResult};
pub use params::{AlertFlags, RouteIds, ScheduleQuery};
