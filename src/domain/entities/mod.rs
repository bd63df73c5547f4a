//! Domain entities

mod command;
mod greeting;
mod message;
mod user;

pub use command::{CanonicalCommand, CommandMatch, Vocabulary};
pub use greeting::{GreetingDecision, GreetingTier};
pub use message::InboundMessage;
pub use user::UserProfile;
