//! Command layer tying the rules engine to the item store
//!
//! Every command checks eligibility against the latest snapshot before
//! anything is issued to the store, then runs the store call under the
//! retry policy. State is never mutated optimistically; the next live
//! snapshot is always treated as ground truth.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::clock::Clock;
use crate::core::{rules, schedule};
use crate::error::{EngineResult, StoreError, ValidationError};
use crate::services::RetryPolicy;
use crate::traits::{ItemStore, UserDirectory};
use crate::types::{ItemId, MealSlot, NewItem, RestaurantItem, Track, VoteOp, VoterId};

pub struct VotingService {
    store: Arc<dyn ItemStore>,
    directory: Arc<dyn UserDirectory>,
    clock: Arc<dyn Clock>,
    retry: RetryPolicy,
    items: watch::Receiver<Vec<RestaurantItem>>,
}

impl VotingService {
    pub async fn new(
        store: Arc<dyn ItemStore>,
        directory: Arc<dyn UserDirectory>,
        clock: Arc<dyn Clock>,
        retry: RetryPolicy,
    ) -> Self {
        let items = store.subscribe().await;
        Self {
            store,
            directory,
            clock,
            retry,
            items,
        }
    }

    /// Fresh subscription to the live item snapshots
    pub fn watch_items(&self) -> watch::Receiver<Vec<RestaurantItem>> {
        self.items.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    fn snapshot(&self) -> Vec<RestaurantItem> {
        self.items.borrow().clone()
    }

    /// Display nickname for the voter, falling back to the raw id when
    /// the directory has nothing better
    async fn display_name(&self, voter: &VoterId) -> String {
        match self.directory.profile(voter).await {
            Ok(profile) => profile.display_name(voter),
            Err(err) => {
                warn!(voter = %voter, error = %err, "profile lookup failed, using raw id");
                voter.to_string()
            }
        }
    }

    /// Propose a restaurant for the current Sunday round. The creator's
    /// vote is cast atomically with creation.
    pub async fn add_sunday(&self, voter: &VoterId, name: &str) -> EngineResult<ItemId> {
        let name = rules::validate_name(name)?;
        let now = self.clock.now();
        let cohort = rules::current_sunday_cohort(&self.snapshot(), now);
        rules::check_sunday_add(&cohort, voter)?;

        let draft = NewItem {
            name,
            track: Track::Sunday,
            votes: BTreeSet::from([voter.clone()]),
            deadline: schedule::next_sunday_deadline(now),
            added_by: voter.clone(),
            added_by_nickname: self.display_name(voter).await,
            week_id: Some(schedule::current_week_id(now)),
        };

        let id = self.retry.run(|| self.store.create_item(draft.clone())).await?;
        info!(id = %id, voter = %voter, "sunday restaurant added");
        Ok(id)
    }

    /// Propose a restaurant for a specific date and meal slot. No
    /// creation cap and no automatic vote on the flexible track.
    pub async fn add_flexible(
        &self,
        voter: &VoterId,
        name: &str,
        slot: Option<MealSlot>,
        date: Option<NaiveDate>,
    ) -> EngineResult<ItemId> {
        let name = rules::validate_name(name)?;
        let slot = slot.ok_or(ValidationError::MissingMealSlot)?;
        let date = date.ok_or(ValidationError::MissingDate)?;

        let draft = NewItem {
            name,
            track: Track::Flexible,
            votes: BTreeSet::new(),
            deadline: schedule::meal_deadline(slot, date),
            added_by: voter.clone(),
            added_by_nickname: self.display_name(voter).await,
            week_id: None,
        };

        let id = self.retry.run(|| self.store.create_item(draft.clone())).await?;
        info!(id = %id, voter = %voter, slot = %slot, "flexible restaurant added");
        Ok(id)
    }

    /// Cast or withdraw the voter's vote on an item, whichever applies
    pub async fn toggle_vote(&self, voter: &VoterId, id: &ItemId) -> EngineResult<VoteOp> {
        let now = self.clock.now();
        let snapshot = self.snapshot();
        let item = snapshot
            .iter()
            .find(|i| i.id == *id)
            .ok_or_else(|| StoreError::ItemNotFound { id: id.clone() })?;

        let track_items: Vec<RestaurantItem> = match item.track {
            Track::Sunday => rules::current_sunday_cohort(&snapshot, now),
            Track::Flexible => snapshot
                .iter()
                .filter(|i| i.track == Track::Flexible)
                .cloned()
                .collect(),
        };

        let op = rules::toggle_vote(&track_items, item, voter, now)?;
        self.retry
            .run(|| self.store.mutate_votes(id, op, voter))
            .await?;
        info!(id = %id, voter = %voter, ?op, "vote updated");
        Ok(op)
    }

    /// Remove an item; owner only, allowed even after the deadline
    pub async fn delete(&self, voter: &VoterId, id: &ItemId) -> EngineResult<()> {
        let snapshot = self.snapshot();
        let item = snapshot
            .iter()
            .find(|i| i.id == *id)
            .ok_or_else(|| StoreError::ItemNotFound { id: id.clone() })?;

        rules::check_delete(item, voter)?;
        self.retry.run(|| self.store.delete_item(id)).await?;
        info!(id = %id, voter = %voter, "restaurant deleted");
        Ok(())
    }
}
