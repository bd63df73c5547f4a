//! Reply handlers - the texts sent back for each recognized command

use crate::domain::entities::CanonicalCommand;

/// Seam between the message processor and whatever produces reply content.
///
/// The processor resolves identity, greeting and intent; handlers only turn a
/// canonical command into reply text. Swappable for tests and future
/// transports.
pub trait ReplyHandlers: Send + Sync {
    /// Reply for a recognized command.
    fn handle(&self, command: CanonicalCommand, display_name: Option<&str>) -> String;

    /// Reply when no command matched.
    fn fallback(&self, display_name: Option<&str>) -> String;

    /// Reply after onboarding captured the user's name.
    fn welcome(&self, name: &str) -> String;
}

/// Stock replies with light name personalization.
pub struct DefaultHandlers;

impl ReplyHandlers for DefaultHandlers {
    fn handle(&self, command: CanonicalCommand, display_name: Option<&str>) -> String {
        match command {
            CanonicalCommand::Menu => {
                let mut msg = String::from("📋 Main Menu:\n");
                if let Some(name) = display_name {
                    msg = format!("Hi {}! {}", name, msg);
                }
                msg.push_str(
                    "• menu — show this menu\n\
                     • help — how I work\n\
                     • yes / no — answer a question\n\
                     • confirm / cancel — manage a pending event",
                );
                msg
            }
            CanonicalCommand::Help => {
                let mut msg = String::from("💡 Memo Help:\n");
                if let Some(name) = display_name {
                    msg = format!("Hi {}, {}", name, msg);
                }
                msg.push_str(
                    "- Text me an event and I'll remember it.\n\
                     - Type 'menu' for options.\n\
                     - 👍 or 'yes' to accept, ❌ or 'no' to decline.",
                );
                msg
            }
            CanonicalCommand::Yes => match display_name {
                Some(name) => format!("👍 Got it, {}!", name),
                None => "👍 Got it!".to_string(),
            },
            CanonicalCommand::No => "No problem. Nothing was changed.".to_string(),
            CanonicalCommand::Confirm => "✅ Confirmed! Your event is saved. 🌟".to_string(),
            CanonicalCommand::Cancel => "❌ Cancelled. Nothing was saved.".to_string(),
        }
    }

    fn fallback(&self, display_name: Option<&str>) -> String {
        match display_name {
            Some(name) => format!(
                "🤔 Sorry {}, I didn't catch that. Type 'menu' to see what I can do, or 'help' for more info.",
                name
            ),
            None => "🤔 Sorry, I didn't catch that. Type 'menu' to see what I can do, or 'help' for more info."
                .to_string(),
        }
    }

    fn welcome(&self, name: &str) -> String {
        format!(
            "👋 Great to meet you, {}! I'm Memo, your planning assistant. Type 'menu' to see what I can do.",
            name
        )
    }
}
