//! Live view projector
//!
//! Turns a raw item snapshot into everything the presentation layer
//! needs: per-track item lists with vote-button flags, derived counts,
//! and the resolver's winner/status per track. Derivation is a pure
//! function of (snapshot, viewer, view date, now) and is rerun in full
//! on every change; nothing is updated incrementally.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::sync::Arc;
use tokio::sync::watch;

use super::resolver::{self, TrackStatus};
use super::rules;
use super::schedule;
use crate::clock::Clock;
use crate::types::{RestaurantItem, Track, VoterId};

/// One item annotated with the acting viewer's flags
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub item: RestaurantItem,
    pub has_voted: bool,
    pub owned_by_viewer: bool,
    pub vote_button_disabled: bool,
    pub vote_button_label: String,
}

/// Everything the presentation layer shows for one track
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackView {
    pub items: Vec<ItemView>,
    pub status: TrackStatus,
    pub status_message: String,
    pub winner: Option<RestaurantItem>,
    pub next_deadline: Option<DateTime<Utc>>,
    pub add_enabled: bool,
}

/// Full derived state for one viewer at one instant
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub sunday: TrackView,
    pub flexible: TrackView,
    /// Calendar day the flexible list is filtered to
    pub view_date: NaiveDate,
    pub user_sunday_count: usize,
    pub holds_external_vote: bool,
}

/// Project a full snapshot for one viewer.
///
/// The Sunday list is scoped to the week in progress; the flexible list
/// is filtered to `view_date`, while the flexible winner/status/deadline
/// are computed over all flexible items regardless of the viewed day.
pub fn project(
    viewer: &VoterId,
    view_date: NaiveDate,
    items: &[RestaurantItem],
    now: DateTime<Utc>,
) -> Projection {
    let cohort = rules::current_sunday_cohort(items, now);
    let user_sunday_count = rules::sunday_items_added_by(&cohort, viewer);
    let holds_external_vote = rules::holds_external_sunday_vote(&cohort, viewer);

    let sunday_outcome = resolver::resolve(Track::Sunday, &cohort, now);
    let sunday_items = ordered_views(&cohort, viewer, |item| {
        sunday_flags(item, viewer, now, user_sunday_count, holds_external_vote)
    });

    let all_flexible: Vec<RestaurantItem> = items
        .iter()
        .filter(|i| i.track == Track::Flexible)
        .cloned()
        .collect();
    let flexible_outcome = resolver::resolve(Track::Flexible, &all_flexible, now);

    let day_flexible: Vec<RestaurantItem> = all_flexible
        .iter()
        .filter(|i| schedule::same_calendar_day(i.deadline, view_date))
        .cloned()
        .collect();
    let flexible_items = ordered_views(&day_flexible, viewer, |item| flexible_flags(item, viewer, now));

    Projection {
        sunday: TrackView {
            items: sunday_items,
            status: sunday_outcome.status,
            status_message: sunday_outcome.status_message(),
            winner: sunday_outcome.winner.clone(),
            next_deadline: sunday_outcome.next_deadline,
            add_enabled: user_sunday_count < rules::SUNDAY_ITEM_LIMIT,
        },
        flexible: TrackView {
            items: flexible_items,
            status: flexible_outcome.status,
            status_message: flexible_outcome.status_message(),
            winner: flexible_outcome.winner.clone(),
            next_deadline: flexible_outcome.next_deadline,
            add_enabled: true,
        },
        view_date,
        user_sunday_count,
        holds_external_vote,
    }
}

/// Most-voted first, ties to the earliest proposal
fn ordered_views<F>(items: &[RestaurantItem], viewer: &VoterId, flags: F) -> Vec<ItemView>
where
    F: Fn(&RestaurantItem) -> (bool, String),
{
    let mut views: Vec<ItemView> = items
        .iter()
        .map(|item| {
            let (vote_button_disabled, vote_button_label) = flags(item);
            ItemView {
                has_voted: item.has_vote_from(viewer),
                owned_by_viewer: item.is_owned_by(viewer),
                vote_button_disabled,
                vote_button_label,
                item: item.clone(),
            }
        })
        .collect();
    views.sort_by_key(|v| (Reverse(v.item.vote_count()), v.item.created_at));
    views
}

fn sunday_flags(
    item: &RestaurantItem,
    viewer: &VoterId,
    now: DateTime<Utc>,
    user_sunday_count: usize,
    holds_external_vote: bool,
) -> (bool, String) {
    let closed = item.is_closed(now);
    let owned = item.is_owned_by(viewer);
    let has_voted = item.has_vote_from(viewer);

    let disabled = closed
        || owned
        || (!has_voted && holds_external_vote)
        || user_sunday_count == 0;

    let label = if closed {
        "Voting Closed"
    } else if owned {
        "Auto-voted (Your List)"
    } else if has_voted {
        "Unvote"
    } else if holds_external_vote {
        "Only 1 Non-listed Vote"
    } else if user_sunday_count == 0 {
        "Add first to vote"
    } else {
        "Vote"
    };

    (disabled, label.to_string())
}

fn flexible_flags(item: &RestaurantItem, viewer: &VoterId, now: DateTime<Utc>) -> (bool, String) {
    let closed = item.is_closed(now);
    let base = if item.has_vote_from(viewer) { "Unvote" } else { "Vote" };
    let label = if closed {
        format!("{base} (Voting Closed)")
    } else {
        base.to_string()
    };
    (closed, label)
}

/// One viewer's live window onto the item stream.
///
/// Holds the store subscription plus the viewer's identity and selected
/// flexible view date; the projection is recomputed in full on every
/// snapshot or view-date change.
pub struct LiveView {
    viewer: VoterId,
    view_date: NaiveDate,
    items: watch::Receiver<Vec<RestaurantItem>>,
    clock: Arc<dyn Clock>,
}

impl LiveView {
    pub fn new(
        viewer: VoterId,
        view_date: NaiveDate,
        items: watch::Receiver<Vec<RestaurantItem>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            viewer,
            view_date,
            items,
            clock,
        }
    }

    pub fn view_date(&self) -> NaiveDate {
        self.view_date
    }

    pub fn set_view_date(&mut self, date: NaiveDate) {
        self.view_date = date;
    }

    /// Project the latest snapshot
    pub fn snapshot(&self) -> Projection {
        project(
            &self.viewer,
            self.view_date,
            &self.items.borrow(),
            self.clock.now(),
        )
    }

    /// Wait for the next snapshot and project it; `None` once the store
    /// has shut down
    pub async fn changed(&mut self) -> Option<Projection> {
        self.items.changed().await.ok()?;
        Some(self.snapshot())
    }
}
