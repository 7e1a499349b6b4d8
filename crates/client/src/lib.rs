//! HTTP client for the events backend
//!
//! Two calls are offered: list the events (optionally narrowed to one type)
//! and create a new event. Each call is a single attempt with no retry.

pub mod api;
pub mod constants;
pub mod error;

pub use api::{EventApi, EventsClient};
pub use error::ApiError;
