//! Core voting logic
//!
//! Pure business logic with no I/O dependencies: calendar math,
//! eligibility rules, winner resolution, and view projection.

pub mod projector;
pub mod resolver;
pub mod rules;
pub mod schedule;

pub use projector::{ItemView, LiveView, Projection, TrackView};
pub use resolver::{TrackOutcome, TrackStatus};
