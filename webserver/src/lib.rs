//! HTTP and WebSocket surface for the Kainan voting engine
//!
//! Thin translation layer: REST endpoints map one-to-one onto engine
//! commands, and `/ws` streams each client's live projection. All
//! decisions stay in the engine; handlers only parse, delegate, and
//! map errors onto status codes.

pub mod error;
pub mod state;
pub mod types;
pub mod web;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
