//! Typed client for the Routific Engine vehicle-routing API.
//!
//! Build a [`VrPlan`] or [`PdPlan`], send it with [`Routific`], and read
//! back a [`Schedule`]. Large problems go through the long-job endpoints,
//! which poll a job-status URL under a [`PollPolicy`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod job;
pub mod polyline;
pub mod traits;
pub mod types;

pub use api::{Routific, long_pdp, long_vrp, pdp, vrp};
pub use config::{ClientConfig, Endpoints};
pub use error::{Error, Result};
pub use http::{HttpConfig, HttpTransport};
pub use job::{JobStatus, PollPolicy};
pub use polyline::{Polyline, PolylineError};
pub use traits::{ThreadSleep, Transport, Wait};
pub use types::{
    Annotation, Destination, Load, Location, Options, PdPlan, PickDropOrder, Schedule, Stop,
    StopKind, TimeWindow, Traffic, Vehicle, Visit, VrPlan,
};
