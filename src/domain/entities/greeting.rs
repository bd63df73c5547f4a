/// How a user should be greeted, based on elapsed time since last contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GreetingTier {
    /// Unknown user, name capture pending
    Onboarding,
    /// Last seen less than a day ago
    SameDay,
    /// Last seen between one and seven days ago
    Recent,
    /// Last seen seven or more days ago
    LongAbsence,
}

impl GreetingTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            GreetingTier::Onboarding => "onboarding",
            GreetingTier::SameDay => "same_day",
            GreetingTier::Recent => "recent",
            GreetingTier::LongAbsence => "long_absence",
        }
    }
}

/// Result of resolving a greeting for one inbound message.
///
/// Recomputed per message, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct GreetingDecision {
    pub tier: GreetingTier,
    pub rendered_text: String,
}
