//! In-memory item store
//!
//! Reference implementation of the document-store collaborator: items
//! live behind a watch channel whose value is the complete current set,
//! so every subscriber observes a full snapshot on every change. Vote
//! mutation is element-wise on the set, matching the commutative
//! add/remove merge the engine relies on.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{StoreError, StoreResult};
use crate::traits::ItemStore;
use crate::types::{ItemId, NewItem, RestaurantItem, VoteOp, VoterId};

pub struct MemoryStore {
    items: watch::Sender<Vec<RestaurantItem>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (items, _) = watch::channel(Vec::new());
        Self { items, clock }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn subscribe(&self) -> watch::Receiver<Vec<RestaurantItem>> {
        self.items.subscribe()
    }

    async fn create_item(&self, draft: NewItem) -> StoreResult<ItemId> {
        let id = ItemId::new(Uuid::new_v4().to_string());
        let item = RestaurantItem {
            id: id.clone(),
            name: draft.name,
            track: draft.track,
            votes: draft.votes,
            created_at: self.clock.now(),
            deadline: draft.deadline,
            added_by: draft.added_by,
            added_by_nickname: draft.added_by_nickname,
            week_id: draft.week_id,
        };

        debug!(id = %id, name = %item.name, track = %item.track, "creating item");
        self.items.send_modify(|items| items.push(item));
        Ok(id)
    }

    async fn mutate_votes(&self, id: &ItemId, op: VoteOp, voter: &VoterId) -> StoreResult<()> {
        let mut found = false;
        self.items.send_if_modified(|items| {
            match items.iter_mut().find(|item| item.id == *id) {
                Some(item) => {
                    found = true;
                    match op {
                        VoteOp::Add => item.votes.insert(voter.clone()),
                        VoteOp::Remove => item.votes.remove(voter),
                    }
                }
                None => false,
            }
        });

        if found {
            debug!(id = %id, voter = %voter, ?op, "vote set mutated");
            Ok(())
        } else {
            Err(StoreError::ItemNotFound { id: id.clone() })
        }
    }

    async fn delete_item(&self, id: &ItemId) -> StoreResult<()> {
        // Unconditional removal; deleting an absent item is a no-op.
        self.items.send_if_modified(|items| {
            let before = items.len();
            items.retain(|item| item.id != *id);
            items.len() != before
        });
        debug!(id = %id, "item deleted");
        Ok(())
    }
}
