//! Playbill development backend
//!
//! An in-memory stand-in for the json-server events collection the
//! Playbill client talks to. Data lives only for the life of the process.

pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_router, run_server_blocking, start_server, ServerHandle};
pub use state::{AppState, EventBook};
