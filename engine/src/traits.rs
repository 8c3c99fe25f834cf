//! Collaborator trait definitions for dependency injection
//!
//! Persistence and identity live behind these traits so the engine can
//! be exercised against mocks and the reference in-memory services.

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::StoreResult;
use crate::types::{ItemId, NewItem, RestaurantItem, UserProfile, VoteOp, VoterId};

/// Document store holding the restaurant items
#[mockall::automock]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Live subscription: the receiver observes the complete current
    /// item set on every change, never partial deltas
    async fn subscribe(&self) -> watch::Receiver<Vec<RestaurantItem>>;

    /// Atomically create an item; the store assigns id and creation time
    async fn create_item(&self, draft: NewItem) -> StoreResult<ItemId>;

    /// Element-wise vote-set mutation. Must merge commutatively so
    /// concurrent voters never clobber each other's elements.
    async fn mutate_votes(&self, id: &ItemId, op: VoteOp, voter: &VoterId) -> StoreResult<()>;

    /// Unconditional removal
    async fn delete_item(&self, id: &ItemId) -> StoreResult<()>;
}

/// Read-once profile lookup for display nicknames
#[mockall::automock]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn profile(&self, id: &VoterId) -> StoreResult<UserProfile>;
}
