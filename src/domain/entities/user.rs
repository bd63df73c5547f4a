use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A minimal user profile, keyed by a salted hash of the phone number.
///
/// The raw phone number is never stored; `identity_hash` is the sole storage
/// key. `last_seen_at` never precedes `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub identity_hash: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    #[serde(default)]
    pub message_count: u64,
}

impl UserProfile {
    pub fn new(identity_hash: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            identity_hash: identity_hash.into(),
            display_name: None,
            created_at: now,
            last_seen_at: now,
            message_count: 0,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Refresh `last_seen_at` and bump the message counter. The timestamp is
    /// clamped so it never moves before `created_at`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen_at = now.max(self.created_at);
        self.message_count = self.message_count.saturating_add(1);
    }
}
