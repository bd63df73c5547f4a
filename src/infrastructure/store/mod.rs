//! Profile store - TTL'd key-value persistence for user profiles
//!
//! Reads and writes fail soft: any backend error is downgraded to "absent" /
//! "write skipped" with a correlated warn log, so a broken store can never
//! crash or block the conversation. With no backend configured at all, every
//! user simply appears new.

mod memory;
mod redis;

pub use memory::MemoryBackend;
pub use redis::RedisBackend;

use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::domain::entities::UserProfile;
use crate::domain::traits::{KvBackend, Lookup};

const DEFAULT_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Owns phone-number hashing and best-effort profile persistence.
///
/// One explicit handle, injected wherever profiles are needed; lifecycle
/// belongs to process startup.
pub struct ProfileStore {
    backend: Option<Arc<dyn KvBackend>>,
    salt: String,
    ttl: Duration,
}

impl ProfileStore {
    /// A store over the given backend. Refuses an empty salt: hashing must
    /// never run unsalted.
    pub fn new(
        backend: Option<Arc<dyn KvBackend>>,
        salt: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let salt = salt.into();
        if salt.trim().is_empty() {
            return Err(ConfigError::MissingField("hash salt".to_string()));
        }
        Ok(Self {
            backend,
            salt,
            ttl: DEFAULT_TTL,
        })
    }

    /// Fallback mode: no backend, all reads miss, all writes are no-ops.
    pub fn detached(salt: impl Into<String>) -> Result<Self, ConfigError> {
        Self::new(None, salt)
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Salted one-way hash of a raw phone number; the sole storage key.
    ///
    /// Normalizes spaces, dashes and a leading `+` first so the same line
    /// always lands on the same record regardless of formatting.
    pub fn hash_identity(&self, raw_phone: &str) -> String {
        let mut normalized: String = raw_phone
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect();
        if let Some(stripped) = normalized.strip_prefix('+') {
            normalized = stripped.to_string();
        }

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        hasher.update(self.salt.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..16].to_string()
    }

    fn key(identity_hash: &str) -> String {
        format!("user:{}:profile", identity_hash)
    }

    /// Fetch a profile. Backend errors and corrupt records degrade to
    /// `Missing`; this never fails.
    pub async fn get(&self, identity_hash: &str, correlation_id: &str) -> Lookup {
        let Some(backend) = &self.backend else {
            return Lookup::Missing;
        };

        let key = Self::key(identity_hash);
        let raw = match backend.get(&key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Lookup::Missing,
            Err(e) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    error = %e,
                    "profile read failed, treating as absent"
                );
                return Lookup::Missing;
            }
        };

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) if profile.last_seen_at >= profile.created_at => Lookup::Found(profile),
            Ok(_) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    "stored profile violates timestamp invariant, treating as absent"
                );
                Lookup::Missing
            }
            Err(e) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    error = %e,
                    "corrupt profile record, treating as absent"
                );
                Lookup::Missing
            }
        }
    }

    /// Best-effort upsert; resets the TTL on every write. Errors are
    /// swallowed with a correlated warn log.
    pub async fn put(&self, profile: &UserProfile, correlation_id: &str) {
        let Some(backend) = &self.backend else {
            tracing::debug!(correlation_id = %correlation_id, "no store backend, write skipped");
            return;
        };

        let raw = match serde_json::to_string(profile) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    error = %e,
                    "profile serialization failed, write skipped"
                );
                return;
            }
        };

        let key = Self::key(&profile.identity_hash);
        if let Err(e) = backend.set_ex(&key, &raw, self.ttl).await {
            tracing::warn!(
                correlation_id = %correlation_id,
                error = %e,
                "profile write failed, continuing without persistence"
            );
        }
    }

    /// Current backend reachability, for observability only.
    pub async fn is_available(&self) -> bool {
        match &self.backend {
            Some(backend) => backend.ping().await.is_ok(),
            None => false,
        }
    }
}
