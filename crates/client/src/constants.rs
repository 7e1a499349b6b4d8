//! Wire constants for the events backend

/// Query parameter used to narrow a listing by event type
pub const TYPE_QUERY_PARAM: &str = "type";

/// User-Agent header sent with every request
pub const USER_AGENT: &str = concat!("playbill/", env!("CARGO_PKG_VERSION"));
