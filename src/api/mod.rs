//! HTTP API module for the rule engine.
//!
//! This module exposes time card upload, rule application and entry lookup
//! over REST.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ClockRequest, TimeCardRequest};
pub use response::{ApiError, ApiErrorResponse, ApplyRulesResponse, EntriesResponse};
pub use state::AppState;
