//! Core domain types and identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Identifier of a signed-in voter, issued by the identity collaborator
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VoterId(pub String);

impl VoterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque item identifier assigned by the item store on creation
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Voting track an item belongs to; immutable after creation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Sunday,
    Flexible,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Track::Sunday => write!(f, "sunday"),
            Track::Flexible => write!(f, "flexible"),
        }
    }
}

/// Meal slot choosing a flexible item's deadline hour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    /// Hour of day (24h) at which voting for this slot closes
    pub fn deadline_hour(&self) -> u32 {
        match self {
            MealSlot::Breakfast => 11,
            MealSlot::Lunch => 14,
            MealSlot::Dinner => 17,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl FromStr for MealSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(MealSlot::Breakfast),
            "lunch" => Ok(MealSlot::Lunch),
            "dinner" => Ok(MealSlot::Dinner),
            other => Err(ValidationError::InvalidMealSlot {
                input: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A restaurant proposal stored by the item store
///
/// `votes` is a set keyed by voter identifier; the store mutates it only
/// through element-wise add/remove so concurrent voters never clobber
/// each other. Ownership checks compare `added_by` ids; the nickname is
/// display-only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RestaurantItem {
    pub id: ItemId,
    pub name: String,
    pub track: Track,
    pub votes: BTreeSet<VoterId>,
    pub created_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub added_by: VoterId,
    pub added_by_nickname: String,
    /// Sunday only: Monday-00:00 epoch millis of the voting week
    pub week_id: Option<i64>,
}

impl RestaurantItem {
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn has_vote_from(&self, voter: &VoterId) -> bool {
        self.votes.contains(voter)
    }

    pub fn is_owned_by(&self, voter: &VoterId) -> bool {
        self.added_by == *voter
    }

    /// Voting is closed once the deadline has passed
    pub fn is_closed(&self, now: DateTime<Utc>) -> bool {
        now > self.deadline
    }
}

/// Creation draft handed to the item store; the store assigns the id
/// and the creation timestamp
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub track: Track,
    pub votes: BTreeSet<VoterId>,
    pub deadline: DateTime<Utc>,
    pub added_by: VoterId,
    pub added_by_nickname: String,
    pub week_id: Option<i64>,
}

/// Element-wise mutation of an item's vote set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOp {
    Add,
    Remove,
}

/// Profile record kept by the user directory
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub nickname: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    /// Display name fallback chain: nickname, then email, then the raw id
    pub fn display_name(&self, id: &VoterId) -> String {
        self.nickname
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_slot_parses_known_values_case_insensitively() {
        assert_eq!("breakfast".parse::<MealSlot>().unwrap(), MealSlot::Breakfast);
        assert_eq!("LUNCH".parse::<MealSlot>().unwrap(), MealSlot::Lunch);
        assert_eq!("Dinner".parse::<MealSlot>().unwrap(), MealSlot::Dinner);
    }

    #[test]
    fn meal_slot_rejects_unknown_values() {
        let err = "brunch".parse::<MealSlot>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidMealSlot {
                input: "brunch".to_string()
            }
        );
    }

    #[test]
    fn display_name_falls_back_from_nickname_to_email_to_id() {
        let id = VoterId::new("uid-42");

        let full = UserProfile {
            nickname: Some("Lods".to_string()),
            email: Some("lods@example.com".to_string()),
        };
        assert_eq!(full.display_name(&id), "Lods");

        let email_only = UserProfile {
            nickname: None,
            email: Some("lods@example.com".to_string()),
        };
        assert_eq!(email_only.display_name(&id), "lods@example.com");

        assert_eq!(UserProfile::default().display_name(&id), "uid-42");
    }
}
