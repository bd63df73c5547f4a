//! Application services

mod greeting;
mod handlers;
mod matcher;
mod processor;

pub use greeting::GreetingResolver;
pub use handlers::{DefaultHandlers, ReplyHandlers};
pub use matcher::{CommandMatcher, DEFAULT_THRESHOLD};
pub use processor::MessageProcessor;
