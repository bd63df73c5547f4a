//! Greeting resolver - picks a greeting tier from elapsed time

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::{GreetingDecision, GreetingTier};
use crate::domain::traits::Lookup;

const ONBOARDING_PROMPT: &str =
    "👋 Hi! I'm Memo, your planning assistant. What's your first name?";

/// Classifies a user's greeting tier and renders the matching text.
///
/// Read-only given the fetched profile; refreshing `last_seen_at` is the
/// caller's job so this stays independently testable.
pub struct GreetingResolver;

impl GreetingResolver {
    /// Resolve the greeting for one inbound message.
    ///
    /// Tier boundaries: strictly under one day is same-day, one day up to
    /// (but excluding) seven days is recent, seven days and beyond is a long
    /// absence. Exactly 24h is recent, exactly 7 days is a long absence.
    pub fn resolve(lookup: &Lookup, now: DateTime<Utc>) -> GreetingDecision {
        let profile = match lookup {
            Lookup::Missing => {
                return GreetingDecision {
                    tier: GreetingTier::Onboarding,
                    rendered_text: ONBOARDING_PROMPT.to_string(),
                }
            }
            Lookup::Found(profile) => profile,
        };

        let elapsed = now - profile.last_seen_at;
        let tier = if elapsed < Duration::days(1) {
            GreetingTier::SameDay
        } else if elapsed < Duration::days(7) {
            GreetingTier::Recent
        } else {
            GreetingTier::LongAbsence
        };

        let rendered_text = match (tier, profile.display_name()) {
            (GreetingTier::SameDay, Some(name)) => {
                format!("👋 Hey {}! Back again? What can I do for you?", name)
            }
            (GreetingTier::SameDay, None) => {
                "👋 Hey there! Back again? What can I do for you?".to_string()
            }
            (GreetingTier::Recent, Some(name)) => {
                format!("👋 Welcome back, {}! What's next?", name)
            }
            (GreetingTier::Recent, None) => "👋 Welcome back! What's next?".to_string(),
            (GreetingTier::LongAbsence, Some(name)) => {
                format!(
                    "👋 Hey {}! Good to see you again. I still have your setup.",
                    name
                )
            }
            (GreetingTier::LongAbsence, None) => {
                "👋 Hey there! Good to see you again. I still have your setup.".to_string()
            }
            (GreetingTier::Onboarding, _) => unreachable!("handled above"),
        };

        GreetingDecision {
            tier,
            rendered_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserProfile;

    fn seen(hours_ago: i64, now: DateTime<Utc>) -> Lookup {
        let created = now - Duration::days(400);
        let mut profile = UserProfile::new("abc123", created).with_display_name("Alex");
        profile.last_seen_at = now - Duration::hours(hours_ago);
        Lookup::Found(profile)
    }

    #[test]
    fn missing_profile_resolves_to_onboarding() {
        let decision = GreetingResolver::resolve(&Lookup::Missing, Utc::now());
        assert_eq!(decision.tier, GreetingTier::Onboarding);
        assert!(decision.rendered_text.contains("first name"));
    }

    #[test]
    fn two_hours_is_same_day() {
        let now = Utc::now();
        let decision = GreetingResolver::resolve(&seen(2, now), now);
        assert_eq!(decision.tier, GreetingTier::SameDay);
        assert!(decision.rendered_text.contains("Alex"));
    }

    #[test]
    fn three_days_is_recent() {
        let now = Utc::now();
        let decision = GreetingResolver::resolve(&seen(3 * 24, now), now);
        assert_eq!(decision.tier, GreetingTier::Recent);
    }

    #[test]
    fn ten_days_is_long_absence() {
        let now = Utc::now();
        let decision = GreetingResolver::resolve(&seen(10 * 24, now), now);
        assert_eq!(decision.tier, GreetingTier::LongAbsence);
    }

    #[test]
    fn exactly_one_day_is_recent_not_same_day() {
        let now = Utc::now();
        let decision = GreetingResolver::resolve(&seen(24, now), now);
        assert_eq!(decision.tier, GreetingTier::Recent);
    }

    #[test]
    fn exactly_seven_days_is_long_absence() {
        let now = Utc::now();
        let decision = GreetingResolver::resolve(&seen(7 * 24, now), now);
        assert_eq!(decision.tier, GreetingTier::LongAbsence);
    }

    #[test]
    fn nameless_profile_renders_without_a_name() {
        let now = Utc::now();
        let mut profile = UserProfile::new("abc123", now - Duration::days(3));
        profile.last_seen_at = now - Duration::days(3);
        let decision = GreetingResolver::resolve(&Lookup::Found(profile), now);
        assert_eq!(decision.tier, GreetingTier::Recent);
        assert_eq!(decision.rendered_text, "👋 Welcome back! What's next?");
    }

    #[test]
    fn resolver_is_pure_for_a_fixed_clock() {
        let now = Utc::now();
        let lookup = seen(48, now);
        let first = GreetingResolver::resolve(&lookup, now);
        let second = GreetingResolver::resolve(&lookup, now);
        assert_eq!(first, second);
    }
}
