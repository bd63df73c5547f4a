use async_trait::async_trait;
use std::time::Duration;

use crate::application::errors::StorageError;
use crate::domain::entities::UserProfile;

/// Soft result of a profile read.
///
/// Backend failures and corrupt records are downgraded to `Missing` by the
/// profile store; actual errors travel through the log channel only. Expected
/// absence is not an error, so this is a two-outcome enum rather than a
/// `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(UserProfile),
    Missing,
}

impl Lookup {
    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }
}

/// KvBackend trait - abstraction over a networked key-value store with TTL
#[async_trait]
pub trait KvBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Upsert with expiry; every write resets the TTL.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), StorageError>;

    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Reachability probe.
    async fn ping(&self) -> Result<(), StorageError>;
}
