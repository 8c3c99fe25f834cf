//! Shared application state

use std::sync::Arc;

use engine::{
    Clock, MemoryDirectory, MemoryStore, RetryPolicy, SystemClock, VotingService,
};

#[derive(Clone)]
pub struct AppState {
    pub voting: Arc<VotingService>,
    pub directory: Arc<MemoryDirectory>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Wire the in-memory store, directory, and voting service behind
    /// the given clock
    pub async fn new(clock: Arc<dyn Clock>) -> Self {
        let store = Arc::new(MemoryStore::new(clock.clone()));
        let directory = Arc::new(MemoryDirectory::new());
        let voting = Arc::new(
            VotingService::new(
                store,
                directory.clone(),
                clock.clone(),
                RetryPolicy::default(),
            )
            .await,
        );

        Self {
            voting,
            directory,
            clock,
        }
    }

    pub async fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock)).await
    }
}
