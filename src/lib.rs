//! memobot - an SMS assistant core that remembers who it is talking to.
//!
//! The crate is split into three layers:
//! - `domain`: entities (profiles, messages, greetings, commands) and the
//!   storage backend trait
//! - `application`: the greeting resolver, fuzzy command matcher and the
//!   per-message processor
//! - `infrastructure`: configuration, the Redis/in-memory profile store and
//!   the console adapter used in dev mode

pub mod application;
pub mod domain;
pub mod infrastructure;
