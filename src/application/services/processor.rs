//! Message processor - per-message orchestration

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::application::services::{CommandMatcher, GreetingResolver, ReplyHandlers};
use crate::domain::entities::{GreetingTier, InboundMessage, UserProfile};
use crate::domain::traits::Lookup;
use crate::infrastructure::store::ProfileStore;

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bi['’`]?m\s+([A-Za-z]+)",
        r"(?i)\bmy name is\s+([A-Za-z]+)",
        r"(?i)\bthis is\s+([A-Za-z]+)",
        r"^([A-Z][a-z]+)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid name pattern"))
    .collect()
});

/// Orchestrates one inbound message into one reply.
///
/// Flow: hash identity, fetch profile, resolve greeting; onboarding captures
/// a name, everything else goes through the command matcher and handlers.
/// Store failures are already absorbed below this layer, so a reply is always
/// produced.
pub struct MessageProcessor<H: ReplyHandlers> {
    store: ProfileStore,
    matcher: CommandMatcher,
    handlers: H,
}

impl<H: ReplyHandlers> MessageProcessor<H> {
    pub fn new(store: ProfileStore, matcher: CommandMatcher, handlers: H) -> Self {
        Self {
            store,
            matcher,
            handlers,
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Process an inbound message and produce the reply text.
    pub async fn process(&self, inbound: &InboundMessage) -> String {
        self.process_at(inbound, Utc::now()).await
    }

    /// Deterministic entry point: same as `process` with an explicit clock.
    pub async fn process_at(&self, inbound: &InboundMessage, now: DateTime<Utc>) -> String {
        let cid = inbound.correlation_id.as_str();
        let identity_hash = self.store.hash_identity(&inbound.sender_raw_phone);
        tracing::debug!(correlation_id = %cid, identity_hash = %identity_hash, "processing inbound message");

        let lookup = self.store.get(&identity_hash, cid).await;
        let decision = GreetingResolver::resolve(&lookup, now);
        tracing::info!(correlation_id = %cid, tier = decision.tier.as_str(), "greeting resolved");

        match lookup {
            Lookup::Missing => self.onboard(&inbound.body, &identity_hash, now, cid, decision.rendered_text).await,
            Lookup::Found(profile) => self.converse(inbound, profile, decision, now, cid).await,
        }
    }

    /// Unknown hash: either capture a name and create the profile, or prompt
    /// for one. Nothing is persisted until a name arrives.
    async fn onboard(
        &self,
        body: &str,
        identity_hash: &str,
        now: DateTime<Utc>,
        cid: &str,
        prompt: String,
    ) -> String {
        match self.extract_name(body) {
            Some(name) => {
                let profile = UserProfile::new(identity_hash, now).with_display_name(&name);
                self.store.put(&profile, cid).await;
                tracing::info!(correlation_id = %cid, "onboarding complete, profile created");
                self.handlers.welcome(&name)
            }
            None => {
                tracing::debug!(correlation_id = %cid, "onboarding prompt sent, no profile written");
                prompt
            }
        }
    }

    /// Returning user: resolve intent, dispatch, refresh the profile.
    async fn converse(
        &self,
        inbound: &InboundMessage,
        mut profile: UserProfile,
        decision: crate::domain::entities::GreetingDecision,
        now: DateTime<Utc>,
        cid: &str,
    ) -> String {
        // Name capture still pending on an existing profile (e.g. a record
        // written before the name arrived, or one stored with fields missing).
        if profile.display_name.is_none() {
            if let Some(name) = self.extract_name(&inbound.body) {
                profile.display_name = Some(name.clone());
                profile.touch(now);
                self.store.put(&profile, cid).await;
                tracing::info!(correlation_id = %cid, "captured pending name");
                return self.handlers.welcome(&name);
            }
        }

        let matched = self.matcher.match_input(&inbound.body);
        let reply_body = match matched.command {
            Some(command) => {
                tracing::info!(
                    correlation_id = %cid,
                    command = %command,
                    confidence = matched.confidence,
                    "command matched"
                );
                self.handlers.handle(command, profile.display_name())
            }
            None => {
                tracing::info!(
                    correlation_id = %cid,
                    best_score = matched.confidence,
                    "no command matched, sending fallback"
                );
                self.handlers.fallback(profile.display_name())
            }
        };

        profile.touch(now);
        self.store.put(&profile, cid).await;

        // Same-day users are mid-conversation; greet only after a real gap.
        match decision.tier {
            GreetingTier::Recent | GreetingTier::LongAbsence => {
                format!("{}\n{}", decision.rendered_text, reply_body)
            }
            _ => reply_body,
        }
    }

    /// Pull a first name out of an onboarding reply. Words that are part of
    /// the command vocabulary ("Menu", "Help") are never taken as names.
    fn extract_name(&self, body: &str) -> Option<String> {
        let trimmed = body.trim();
        for pattern in NAME_PATTERNS.iter() {
            if let Some(captures) = pattern.captures(trimmed) {
                if let Some(raw) = captures.get(1) {
                    let candidate = title_case(raw.as_str());
                    if self.matcher.vocabulary().contains(&candidate.to_lowercase()) {
                        continue;
                    }
                    return Some(candidate);
                }
            }
        }
        None
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::DefaultHandlers;
    use crate::infrastructure::store::MemoryBackend;
    use std::sync::Arc;

    fn processor() -> MessageProcessor<DefaultHandlers> {
        let store = ProfileStore::new(Some(Arc::new(MemoryBackend::new())), "test-salt")
            .expect("valid salt");
        MessageProcessor::new(store, CommandMatcher::default(), DefaultHandlers)
    }

    #[test]
    fn extracts_names_from_common_phrasings() {
        let p = processor();
        assert_eq!(p.extract_name("I'm alex"), Some("Alex".to_string()));
        assert_eq!(p.extract_name("my name is Sam"), Some("Sam".to_string()));
        assert_eq!(p.extract_name("this is Priya"), Some("Priya".to_string()));
        assert_eq!(p.extract_name("Alex"), Some("Alex".to_string()));
    }

    #[test]
    fn plain_sentences_are_not_names() {
        let p = processor();
        assert_eq!(p.extract_name("add soccer practice tomorrow"), None);
        assert_eq!(p.extract_name("hello"), None);
    }

    #[test]
    fn vocabulary_words_are_never_taken_as_names() {
        let p = processor();
        assert_eq!(p.extract_name("Menu"), None);
        assert_eq!(p.extract_name("Help"), None);
    }
}
