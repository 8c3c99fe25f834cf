//! Error types for the voting engine
//!
//! Three layers, matching how failures reach the user: input validation
//! and eligibility rejections are decided client-side before any store
//! call; store errors are classified transient (retried) or fatal
//! (surfaced).

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::ItemId;

/// Rejected user input; reported inline, never retried
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a restaurant name.")]
    EmptyName,

    #[error("Please select a date.")]
    MissingDate,

    #[error("Please select a meal type.")]
    MissingMealSlot,

    #[error("Invalid meal type '{input}'. Please choose Breakfast, Lunch, or Dinner.")]
    InvalidMealSlot { input: String },
}

/// Rules violation; each variant carries its own user-facing reason
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EligibilityError {
    #[error("You can only add up to {limit} restaurants for the Sunday feature.")]
    SundayCapReached { limit: usize },

    #[error("You automatically vote for restaurants you add. You cannot unvote your own listed restaurant.")]
    OwnItemVoteLocked,

    #[error("You can only vote for one restaurant you did not list for Sunday. Unvote your current choice first.")]
    ExternalVoteHeld,

    #[error("Voting closed at {deadline}.")]
    VotingClosed { deadline: DateTime<Utc> },

    #[error("Only the person who added a restaurant can delete it.")]
    NotOwner,
}

/// Failure reported by the item store or user directory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store resource exhausted: {message}")]
    ResourceExhausted { message: String },

    #[error("Store internal error: {message}")]
    Internal { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("Item not found: {id}")]
    ItemNotFound { id: ItemId },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Store call failed after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: String },
}

impl StoreError {
    /// Only these conditions are worth retrying; everything else is
    /// propagated immediately
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable { .. }
                | StoreError::ResourceExhausted { .. }
                | StoreError::Internal { .. }
        )
    }
}

/// Umbrella error for the engine's command layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type EngineResult<T> = Result<T, EngineError>;
