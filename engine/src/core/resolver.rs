//! Winner resolver
//!
//! Pure and stateless: the winner is always recomputed from the item
//! set on every observation, never stored, so there is nothing to go
//! stale beyond the freshness of the live snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use super::schedule;
use crate::types::{RestaurantItem, Track};

/// Where a track's voting round currently stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStatus {
    /// At least one item is still accepting votes
    Open,
    /// Every window closed and a winner was determined
    Decided,
    /// No voting session has ended yet
    Idle,
}

/// Resolver output for one track
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackOutcome {
    pub track: Track,
    pub status: TrackStatus,
    pub winner: Option<RestaurantItem>,
    pub next_deadline: Option<DateTime<Utc>>,
}

impl TrackOutcome {
    /// Human-readable status line shown next to the track
    pub fn status_message(&self) -> String {
        match (self.status, &self.winner) {
            (TrackStatus::Decided, Some(winner)) => format!(
                "🎉 {} wins with {} votes! 🎉",
                winner.name,
                winner.vote_count()
            ),
            (TrackStatus::Open, _) => match self.track {
                Track::Sunday => "Voting is still active for this Sunday!".to_string(),
                Track::Flexible => "Voting is still active for some flexible restaurants!".to_string(),
            },
            _ => match self.track {
                Track::Sunday => "No voting sessions have ended for this Sunday yet.".to_string(),
                Track::Flexible => {
                    "No voting sessions have ended for flexible restaurants yet.".to_string()
                }
            },
        }
    }
}

/// Determine active-vs-closed state and the winning item for one track.
///
/// `items` must already be partitioned to the track (and, for a per-day
/// flexible winner, filtered by the caller). While any item is still
/// active there is no winner; once everything is closed the item with
/// the most votes wins, ties going to the earliest proposal.
pub fn resolve(track: Track, items: &[RestaurantItem], now: DateTime<Utc>) -> TrackOutcome {
    let active: Vec<&RestaurantItem> = items.iter().filter(|i| i.deadline > now).collect();

    if !active.is_empty() {
        let next_deadline = match track {
            Track::Sunday => Some(schedule::next_sunday_deadline(now)),
            Track::Flexible => active.iter().map(|i| i.deadline).min(),
        };
        return TrackOutcome {
            track,
            status: TrackStatus::Open,
            winner: None,
            next_deadline,
        };
    }

    let closed: Vec<&RestaurantItem> = items.iter().filter(|i| i.deadline <= now).collect();
    let winner = closed
        .iter()
        .max_by_key(|i| (i.vote_count(), Reverse(i.created_at)))
        .map(|i| (*i).clone());

    TrackOutcome {
        track,
        status: if winner.is_some() {
            TrackStatus::Decided
        } else {
            TrackStatus::Idle
        },
        winner,
        next_deadline: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ItemId, VoterId};
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap()
    }

    fn item(
        id: &str,
        track: Track,
        votes: usize,
        created_at: DateTime<Utc>,
        deadline: DateTime<Utc>,
    ) -> RestaurantItem {
        let votes: BTreeSet<VoterId> = (0..votes).map(|n| VoterId::new(format!("v{n}"))).collect();
        RestaurantItem {
            id: ItemId::new(id),
            name: id.to_string(),
            track,
            votes,
            created_at,
            deadline,
            added_by: VoterId::new("owner"),
            added_by_nickname: "owner".to_string(),
            week_id: None,
        }
    }

    #[test]
    fn no_winner_while_any_item_is_still_active() {
        let now = at(12, 9);
        let items = vec![
            item("closed", Track::Flexible, 5, at(10, 8), at(11, 11)),
            item("active", Track::Flexible, 1, at(11, 8), at(12, 17)),
        ];
        let outcome = resolve(Track::Flexible, &items, now);
        assert_eq!(outcome.status, TrackStatus::Open);
        assert!(outcome.winner.is_none());
        assert!(outcome.status_message().contains("still active"));
    }

    #[test]
    fn flexible_reports_the_earliest_active_deadline() {
        let now = at(12, 9);
        let items = vec![
            item("late", Track::Flexible, 0, at(11, 8), at(14, 17)),
            item("soon", Track::Flexible, 0, at(11, 9), at(12, 14)),
        ];
        let outcome = resolve(Track::Flexible, &items, now);
        assert_eq!(outcome.next_deadline, Some(at(12, 14)));
    }

    #[test]
    fn sunday_reports_the_canonical_sunday_deadline() {
        let now = at(12, 9); // Wednesday
        let items = vec![item("a", Track::Sunday, 1, at(10, 8), at(16, 11))];
        let outcome = resolve(Track::Sunday, &items, now);
        assert_eq!(outcome.next_deadline, Some(at(16, 11)));
    }

    #[test]
    fn most_votes_wins_once_everything_is_closed() {
        let now = at(17, 9);
        let items = vec![
            item("few", Track::Sunday, 2, at(10, 8), at(16, 11)),
            item("many", Track::Sunday, 4, at(10, 9), at(16, 11)),
        ];
        let outcome = resolve(Track::Sunday, &items, now);
        assert_eq!(outcome.status, TrackStatus::Decided);
        assert_eq!(outcome.winner.unwrap().name, "many");
    }

    #[test]
    fn ties_go_to_the_earliest_proposal() {
        let now = at(17, 9);
        let items = vec![
            item("B", Track::Sunday, 3, at(10, 10), at(16, 11)),
            item("A", Track::Sunday, 3, at(10, 8), at(16, 11)),
        ];
        let outcome = resolve(Track::Sunday, &items, now);
        let winner = outcome.winner.as_ref().unwrap();
        assert_eq!(winner.name, "A");
        assert!(outcome.status_message().contains("A wins with 3 votes"));
    }

    #[test]
    fn empty_track_is_idle() {
        let outcome = resolve(Track::Sunday, &[], at(12, 9));
        assert_eq!(outcome.status, TrackStatus::Idle);
        assert!(outcome.winner.is_none());
        assert!(outcome.next_deadline.is_none());
        assert!(outcome.status_message().contains("No voting sessions have ended"));
    }
}
