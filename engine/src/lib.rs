//! Voting engine for the Kainan restaurant coordinator
//!
//! Two independent voting tracks: a fixed weekly Sunday round closing
//! at 11:00, and ad-hoc flexible rounds keyed to a date and meal slot.
//! Pure window/eligibility/winner logic lives in `core`; persistence
//! and identity are collaborators behind the traits in `traits`.

pub mod clock;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod voting;

pub use clock::{Clock, FixedClock, SystemClock};
pub use core::{ItemView, LiveView, Projection, TrackOutcome, TrackStatus, TrackView};
pub use error::{
    EligibilityError, EngineError, EngineResult, StoreError, StoreResult, ValidationError,
};
pub use services::{MemoryDirectory, MemoryStore, RetryPolicy};
pub use traits::{ItemStore, UserDirectory};
pub use types::{
    ItemId, MealSlot, NewItem, RestaurantItem, Track, UserProfile, VoteOp, VoterId,
};
pub use voting::VotingService;
