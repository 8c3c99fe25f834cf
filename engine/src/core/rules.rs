//! Eligibility and voting rules
//!
//! Pure checks with no I/O: every command runs these against the
//! current snapshot before anything is issued to the item store. Each
//! rejection carries its own user-facing reason.

use chrono::{DateTime, Utc};

use super::schedule;
use crate::error::{EligibilityError, ValidationError};
use crate::types::{RestaurantItem, Track, VoteOp, VoterId};

/// Maximum Sunday items one voter may create per voting week
pub const SUNDAY_ITEM_LIMIT: usize = 2;

/// Scope a snapshot down to the Sunday items of the week in progress.
///
/// Both the week id and the minute-exact deadline must match; the
/// double check guards against stale items from a prior week lingering
/// through the Sunday transition.
pub fn current_sunday_cohort(items: &[RestaurantItem], now: DateTime<Utc>) -> Vec<RestaurantItem> {
    let week_id = schedule::current_week_id(now);
    let deadline = schedule::next_sunday_deadline(now);
    items
        .iter()
        .filter(|item| {
            item.track == Track::Sunday
                && item.week_id == Some(week_id)
                && schedule::same_instant_to_minute(item.deadline, deadline)
        })
        .cloned()
        .collect()
}

/// Number of cohort items this voter created, for the creation cap
pub fn sunday_items_added_by(cohort: &[RestaurantItem], voter: &VoterId) -> usize {
    cohort.iter().filter(|item| item.is_owned_by(voter)).count()
}

/// Whether the voter currently holds a vote on a cohort item they did
/// not create (at most one such vote is allowed per week)
pub fn holds_external_sunday_vote(cohort: &[RestaurantItem], voter: &VoterId) -> bool {
    cohort
        .iter()
        .any(|item| !item.is_owned_by(voter) && item.has_vote_from(voter))
}

/// Trim and validate a proposed restaurant name
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Gate creating a new Sunday item for this voter
pub fn check_sunday_add(cohort: &[RestaurantItem], voter: &VoterId) -> Result<(), EligibilityError> {
    if sunday_items_added_by(cohort, voter) >= SUNDAY_ITEM_LIMIT {
        return Err(EligibilityError::SundayCapReached {
            limit: SUNDAY_ITEM_LIMIT,
        });
    }
    Ok(())
}

/// Decide the vote-set mutation a toggle should issue, or reject it.
///
/// `track_items` must already be scoped to the item's track (for
/// Sunday, the current cohort) so the one-external-vote rule sees the
/// right neighbors.
pub fn toggle_vote(
    track_items: &[RestaurantItem],
    item: &RestaurantItem,
    voter: &VoterId,
    now: DateTime<Utc>,
) -> Result<VoteOp, EligibilityError> {
    if item.is_closed(now) {
        return Err(EligibilityError::VotingClosed {
            deadline: item.deadline,
        });
    }

    let has_voted = item.has_vote_from(voter);

    if item.track == Track::Sunday {
        if item.is_owned_by(voter) {
            // The creator's vote is implicit and frozen.
            return Err(EligibilityError::OwnItemVoteLocked);
        }
        if !has_voted && holds_external_sunday_vote(track_items, voter) {
            return Err(EligibilityError::ExternalVoteHeld);
        }
    }

    Ok(if has_voted { VoteOp::Remove } else { VoteOp::Add })
}

/// Deletion is owner-only and not gated by the deadline
pub fn check_delete(item: &RestaurantItem, voter: &VoterId) -> Result<(), EligibilityError> {
    if !item.is_owned_by(voter) {
        return Err(EligibilityError::NotOwner);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemId;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    // Wednesday of the 2024-06-10 voting week.
    fn midweek() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 12, 9, 0, 0).unwrap()
    }

    fn sunday_item(id: &str, owner: &str, votes: &[&str], now: DateTime<Utc>) -> RestaurantItem {
        RestaurantItem {
            id: ItemId::new(id),
            name: format!("resto-{id}"),
            track: Track::Sunday,
            votes: votes.iter().map(|v| VoterId::new(*v)).collect(),
            created_at: now,
            deadline: schedule::next_sunday_deadline(now),
            added_by: VoterId::new(owner),
            added_by_nickname: owner.to_string(),
            week_id: Some(schedule::current_week_id(now)),
        }
    }

    fn flexible_item(id: &str, owner: &str, deadline: DateTime<Utc>) -> RestaurantItem {
        RestaurantItem {
            id: ItemId::new(id),
            name: format!("resto-{id}"),
            track: Track::Flexible,
            votes: BTreeSet::new(),
            created_at: deadline - chrono::Duration::days(1),
            deadline,
            added_by: VoterId::new(owner),
            added_by_nickname: owner.to_string(),
            week_id: None,
        }
    }

    #[test]
    fn cohort_drops_items_from_other_weeks() {
        let now = midweek();
        let current = sunday_item("a", "v1", &["v1"], now);

        let mut stale = sunday_item("b", "v1", &["v1"], now - chrono::Duration::weeks(1));
        // Same track, previous week's id and deadline.
        assert_ne!(stale.week_id, current.week_id);

        let cohort = current_sunday_cohort(&[current.clone(), stale.clone()], now);
        assert_eq!(cohort, vec![current.clone()]);

        // A matching week id alone is not enough; the deadline must match too.
        stale.week_id = current.week_id;
        let cohort = current_sunday_cohort(&[current.clone(), stale], now);
        assert_eq!(cohort, vec![current]);
    }

    #[test]
    fn sunday_creation_is_capped_at_two() {
        let now = midweek();
        let voter = VoterId::new("v1");

        let one = vec![sunday_item("a", "v1", &["v1"], now)];
        assert_eq!(sunday_items_added_by(&one, &voter), 1);
        assert!(check_sunday_add(&one, &voter).is_ok());

        let two = vec![
            sunday_item("a", "v1", &["v1"], now),
            sunday_item("b", "v1", &["v1"], now),
        ];
        assert_eq!(
            check_sunday_add(&two, &voter),
            Err(EligibilityError::SundayCapReached { limit: 2 })
        );

        // Someone else's items never count against the cap.
        assert!(check_sunday_add(&two, &VoterId::new("v2")).is_ok());
    }

    #[test]
    fn creator_cannot_touch_their_own_sunday_vote() {
        let now = midweek();
        let item = sunday_item("a", "v1", &["v1"], now);
        let result = toggle_vote(std::slice::from_ref(&item), &item, &VoterId::new("v1"), now);
        assert_eq!(result, Err(EligibilityError::OwnItemVoteLocked));
    }

    #[test]
    fn only_one_external_sunday_vote_per_week() {
        let now = midweek();
        let voter = VoterId::new("v1");
        let a = sunday_item("a", "v2", &["v2", "v1"], now); // external vote held on A
        let b = sunday_item("b", "v3", &["v3"], now);
        let cohort = vec![a.clone(), b.clone()];

        // Voting on B while holding A is rejected.
        assert_eq!(
            toggle_vote(&cohort, &b, &voter, now),
            Err(EligibilityError::ExternalVoteHeld)
        );

        // Unvoting A is always allowed before the deadline.
        assert_eq!(toggle_vote(&cohort, &a, &voter, now), Ok(VoteOp::Remove));

        // After letting go of A, voting on B succeeds.
        let a_released = sunday_item("a", "v2", &["v2"], now);
        let cohort = vec![a_released, b.clone()];
        assert_eq!(toggle_vote(&cohort, &b, &voter, now), Ok(VoteOp::Add));
    }

    #[test]
    fn votes_are_rejected_after_the_deadline() {
        let now = midweek();
        let closed = flexible_item("f", "v2", now - chrono::Duration::hours(1));
        let result = toggle_vote(std::slice::from_ref(&closed), &closed, &VoterId::new("v1"), now);
        assert_eq!(
            result,
            Err(EligibilityError::VotingClosed {
                deadline: closed.deadline
            })
        );
    }

    #[test]
    fn flexible_votes_toggle_freely_until_the_deadline() {
        let now = midweek();
        let mut item = flexible_item("f", "v2", now + chrono::Duration::hours(3));
        let voter = VoterId::new("v1");

        assert_eq!(
            toggle_vote(std::slice::from_ref(&item), &item, &voter, now),
            Ok(VoteOp::Add)
        );

        item.votes.insert(voter.clone());
        assert_eq!(
            toggle_vote(std::slice::from_ref(&item), &item, &voter, now),
            Ok(VoteOp::Remove)
        );

        // No ownership restriction on the flexible track.
        let own = flexible_item("g", "v1", now + chrono::Duration::hours(3));
        assert_eq!(
            toggle_vote(std::slice::from_ref(&own), &own, &voter, now),
            Ok(VoteOp::Add)
        );
    }

    #[test]
    fn delete_is_owner_only_even_after_the_deadline() {
        let now = midweek();
        let closed = flexible_item("f", "v1", now - chrono::Duration::days(2));
        assert!(check_delete(&closed, &VoterId::new("v1")).is_ok());
        assert_eq!(
            check_delete(&closed, &VoterId::new("v2")),
            Err(EligibilityError::NotOwner)
        );
    }

    #[test]
    fn name_validation_trims_whitespace() {
        assert_eq!(validate_name("  Jollibee  ").unwrap(), "Jollibee");
        assert_eq!(validate_name("   "), Err(ValidationError::EmptyName));
    }
}
