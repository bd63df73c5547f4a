//! End-to-end tests for the message processing pipeline
//! Run with: cargo test --test processor_test

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;

use memobot::application::errors::StorageError;
use memobot::application::services::{CommandMatcher, DefaultHandlers, MessageProcessor};
use memobot::domain::entities::{InboundMessage, UserProfile};
use memobot::domain::traits::{KvBackend, Lookup};
use memobot::infrastructure::store::{MemoryBackend, ProfileStore};

const PHONE: &str = "+1 555-867-5309";

/// A backend that errors on every call, simulating a dead Redis.
struct DeadBackend;

#[async_trait]
impl KvBackend for DeadBackend {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("connection refused".to_string()))
    }
    async fn set_ex(
        &self,
        _key: &str,
        _value: &str,
        _ttl: std::time::Duration,
    ) -> Result<(), StorageError> {
        Err(StorageError::Timeout("SETEX".to_string()))
    }
    async fn exists(&self, _key: &str) -> Result<bool, StorageError> {
        Err(StorageError::Connection("connection refused".to_string()))
    }
    async fn ping(&self) -> Result<(), StorageError> {
        Err(StorageError::Connection("connection refused".to_string()))
    }
}

fn processor_with(backend: Arc<dyn KvBackend>) -> MessageProcessor<DefaultHandlers> {
    let store = ProfileStore::new(Some(backend), "test-salt").expect("valid salt");
    MessageProcessor::new(store, CommandMatcher::default(), DefaultHandlers)
}

fn processor() -> MessageProcessor<DefaultHandlers> {
    processor_with(Arc::new(MemoryBackend::new()))
}

#[tokio::test]
async fn first_contact_prompts_for_a_name_and_writes_nothing() {
    let p = processor();

    let reply = p.process(&InboundMessage::new(PHONE, "hi there")).await;

    assert!(reply.contains("first name"), "got: {}", reply);
    let hash = p.store().hash_identity(PHONE);
    assert!(p.store().get(&hash, "t").await.is_missing());
}

#[tokio::test]
async fn supplying_a_name_creates_the_profile() {
    let p = processor();
    let now = Utc::now();

    p.process_at(&InboundMessage::new(PHONE, "hi"), now).await;
    let reply = p
        .process_at(&InboundMessage::new(PHONE, "I'm Alex"), now)
        .await;

    assert!(reply.contains("Alex"), "got: {}", reply);
    let hash = p.store().hash_identity(PHONE);
    match p.store().get(&hash, "t").await {
        Lookup::Found(profile) => {
            assert_eq!(profile.display_name(), Some("Alex"));
            assert_eq!(profile.created_at, now);
            assert_eq!(profile.last_seen_at, now);
        }
        Lookup::Missing => panic!("profile should exist after name capture"),
    }
}

#[tokio::test]
async fn a_new_user_texting_a_command_word_is_not_named_after_it() {
    let p = processor();

    let reply = p.process(&InboundMessage::new(PHONE, "Menu")).await;

    assert!(reply.contains("first name"), "got: {}", reply);
    let hash = p.store().hash_identity(PHONE);
    assert!(p.store().get(&hash, "t").await.is_missing());
}

#[tokio::test]
async fn returning_user_gets_a_command_reply_and_a_refreshed_profile() {
    let p = processor();
    let t0 = Utc::now();

    p.process_at(&InboundMessage::new(PHONE, "I'm Alex"), t0)
        .await;
    let t1 = t0 + Duration::hours(2);
    let reply = p.process_at(&InboundMessage::new(PHONE, "memu"), t1).await;

    assert!(reply.contains("Main Menu"), "got: {}", reply);
    // Same-day traffic is mid-conversation; no greeting prefix
    assert!(!reply.contains("Welcome back"), "got: {}", reply);

    let hash = p.store().hash_identity(PHONE);
    match p.store().get(&hash, "t").await {
        Lookup::Found(profile) => {
            assert_eq!(profile.last_seen_at, t1);
            assert_eq!(profile.created_at, t0);
            assert_eq!(profile.message_count, 1);
        }
        Lookup::Missing => panic!("profile should persist"),
    }
}

#[tokio::test]
async fn a_gap_of_days_prepends_the_greeting() {
    let p = processor();
    let t0 = Utc::now();

    p.process_at(&InboundMessage::new(PHONE, "I'm Alex"), t0)
        .await;
    let t1 = t0 + Duration::days(3);
    let reply = p.process_at(&InboundMessage::new(PHONE, "help"), t1).await;

    assert!(reply.contains("Welcome back, Alex"), "got: {}", reply);
    assert!(reply.contains("Help"), "got: {}", reply);
}

#[tokio::test]
async fn a_long_absence_gets_its_own_greeting() {
    let p = processor();
    let t0 = Utc::now();

    p.process_at(&InboundMessage::new(PHONE, "I'm Alex"), t0)
        .await;
    let t1 = t0 + Duration::days(10);
    let reply = p.process_at(&InboundMessage::new(PHONE, "👍"), t1).await;

    assert!(reply.contains("Good to see you again"), "got: {}", reply);
    assert!(reply.contains("Got it, Alex"), "got: {}", reply);
}

#[tokio::test]
async fn unrecognized_input_maps_to_a_helpful_fallback() {
    let p = processor();
    let t0 = Utc::now();

    p.process_at(&InboundMessage::new(PHONE, "I'm Alex"), t0)
        .await;
    let reply = p
        .process_at(&InboundMessage::new(PHONE, "xyzzy"), t0 + Duration::hours(1))
        .await;

    assert!(reply.contains("didn't catch that"), "got: {}", reply);
    assert!(reply.contains("menu"), "got: {}", reply);
}

#[tokio::test]
async fn dead_store_still_produces_coherent_replies() {
    let p = processor_with(Arc::new(DeadBackend));

    // Every user appears new; the reply is the onboarding prompt, never an
    // error.
    let reply = p.process(&InboundMessage::new(PHONE, "menu")).await;
    assert!(reply.contains("first name"), "got: {}", reply);

    // Even a name capture (which writes) must not error out.
    let reply = p.process(&InboundMessage::new(PHONE, "I'm Alex")).await;
    assert!(reply.contains("Alex"), "got: {}", reply);
}

#[tokio::test]
async fn detached_store_behaves_like_every_user_is_new() {
    let store = ProfileStore::detached("test-salt").expect("valid salt");
    let p = MessageProcessor::new(store, CommandMatcher::default(), DefaultHandlers);

    let first = p.process(&InboundMessage::new(PHONE, "hello")).await;
    let second = p.process(&InboundMessage::new(PHONE, "hello")).await;
    assert_eq!(first, second);
    assert!(first.contains("first name"), "got: {}", first);
}

#[tokio::test]
async fn nameless_stored_profile_captures_name_on_next_message() {
    let backend = Arc::new(MemoryBackend::new());
    let p = processor_with(backend.clone());
    let t0 = Utc::now();

    // Seed a profile that predates name capture.
    let hash = p.store().hash_identity(PHONE);
    let profile = UserProfile::new(&hash, t0 - Duration::days(2));
    p.store().put(&profile, "seed").await;

    let reply = p.process_at(&InboundMessage::new(PHONE, "Priya"), t0).await;

    assert!(reply.contains("Priya"), "got: {}", reply);
    match p.store().get(&hash, "t").await {
        Lookup::Found(updated) => assert_eq!(updated.display_name(), Some("Priya")),
        Lookup::Missing => panic!("profile should persist"),
    }
}

#[tokio::test]
async fn concurrent_messages_from_different_users_stay_isolated() {
    let backend = Arc::new(MemoryBackend::new());
    let store_a = ProfileStore::new(Some(backend.clone()), "test-salt").expect("valid salt");
    let store_b = ProfileStore::new(Some(backend.clone()), "test-salt").expect("valid salt");
    let p_a = MessageProcessor::new(store_a, CommandMatcher::default(), DefaultHandlers);
    let p_b = MessageProcessor::new(store_b, CommandMatcher::default(), DefaultHandlers);
    let now = Utc::now();

    let msg_a = InboundMessage::new("+15550000001", "I'm Alex");
    let msg_b = InboundMessage::new("+15550000002", "I'm Sam");
    let (ra, rb) = tokio::join!(
        p_a.process_at(&msg_a, now),
        p_b.process_at(&msg_b, now),
    );

    assert!(ra.contains("Alex"), "got: {}", ra);
    assert!(rb.contains("Sam"), "got: {}", rb);
}
