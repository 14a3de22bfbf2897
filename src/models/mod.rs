//! Typed records mirroring the nested JSON of MBTA v2 API responses.
//!
//! Every model is built by [`FromJson::from_value`], which checks required
//! fields and scalar types and fails with
//! [`MbtaError::DataShape`](crate::error::MbtaError::DataShape) naming the
//! offending field.

mod alert;
mod fields;
mod route;
mod schedule;
mod stop;
mod trip;
mod vehicle;

pub use alert::Alert;
pub use fields::FromJson;
pub use route::{Direction, Mode, Route};
pub use schedule::{Schedule, StopWithMode, TripSchedule};
pub use stop::Stop;
pub use trip::Trip;
pub use vehicle::Vehicle;

pub(crate) use fields::Fields;
