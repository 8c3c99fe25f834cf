//! In-memory user directory
//!
//! Reference implementation of the profile-lookup collaborator. Real
//! deployments back this with the identity provider's user documents;
//! the contract is only `profile` plus the display-name fallback chain
//! on the profile itself.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::UserDirectory;
use crate::types::{UserProfile, VoterId};

#[derive(Default)]
pub struct MemoryDirectory {
    users: RwLock<HashMap<VoterId, UserProfile>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a profile
    pub async fn register(&self, id: VoterId, profile: UserProfile) {
        self.users.write().await.insert(id, profile);
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn profile(&self, id: &VoterId) -> StoreResult<UserProfile> {
        self.users
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::UserNotFound { id: id.to_string() })
    }
}
