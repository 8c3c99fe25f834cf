//! Shared harness for engine integration tests

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use std::time::Duration;

use engine::{
    FixedClock, MemoryDirectory, MemoryStore, RetryPolicy, UserProfile, VoterId, VotingService,
};

pub struct Harness {
    pub clock: Arc<FixedClock>,
    pub store: Arc<MemoryStore>,
    pub directory: Arc<MemoryDirectory>,
    pub voting: VotingService,
}

/// Monday morning of the 2024-06-10 voting week
pub fn monday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap()
}

pub async fn harness(now: DateTime<Utc>) -> Harness {
    let clock = Arc::new(FixedClock::new(now));
    let store = Arc::new(MemoryStore::new(clock.clone()));
    let directory = Arc::new(MemoryDirectory::new());

    // Tight retry timings so failure paths stay fast under test.
    let voting = VotingService::new(
        store.clone(),
        directory.clone(),
        clock.clone(),
        RetryPolicy::new(2, Duration::from_millis(1)),
    )
    .await;

    Harness {
        clock,
        store,
        directory,
        voting,
    }
}

pub async fn register(harness: &Harness, id: &str, nickname: &str) -> VoterId {
    let voter = VoterId::new(id);
    harness
        .directory
        .register(
            voter.clone(),
            UserProfile {
                nickname: Some(nickname.to_string()),
                email: Some(format!("{id}@example.com")),
            },
        )
        .await;
    voter
}
