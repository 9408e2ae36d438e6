//! Entry-state signals: abuse gate, orientation, dating context

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use setter_core::AttributeStore;

use crate::phrases::PhraseSet;

/// Abusive messages at which the conversation is ended
pub const ABUSE_HARD_STOP_THRESHOLD: u32 = 2;

static ABUSE: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "fuck*",
        "bitch*",
        "slut*",
        "whore*",
        "asshole*",
        "dumbass*",
        "retard*",
        "rapist",
        "kill yourself",
        "kill you",
        "go die",
        "kys",
    ])
});

static ORIENTATION: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "hi",
        "hello",
        "hey",
        "hey there",
        "hi there",
        "yo",
        "sup",
        "who are you",
        "what is this",
        "are you real",
        "are you a bot",
    ])
});

static DATING_CONTEXT: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "date*",
        "dating",
        "love life",
        "girlfriend",
        "boyfriend",
        "gf",
        "bf",
        "single",
        "matches",
        "tinder",
        "hinge",
        "bumble",
        "ghosted",
        "relationship*",
        "hookup*",
        "talking stage",
        "crush",
        "help",
        "advice",
    ])
});

static EMOTIONAL: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "lonely",
        "loneliness",
        "frustrated",
        "frustrating",
        "sad",
        "heartbroken",
        "heartbreak",
        "rejected",
        "rejection",
        "hopeless",
        "tired of",
        "fed up",
        "sick of",
        "struggling",
        "hurt",
    ])
});

/// Outcome of the entry boundary gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoundaryAction {
    Allow,
    WarnAbuse,
    HardStop,
}

pub fn is_abusive(text: &str) -> bool {
    ABUSE.matches(text)
}

/// Abuse gate for the entry state.
///
/// Increments `abuse_count` on an abusive message. Reaching the threshold
/// sets `hard_stop_triggered`.
pub fn entry_boundary_action(text: &str, attrs: &mut AttributeStore) -> BoundaryAction {
    if !is_abusive(text) {
        return BoundaryAction::Allow;
    }

    attrs.abuse_count = attrs.abuse_count.saturating_add(1);
    if attrs.abuse_count >= ABUSE_HARD_STOP_THRESHOLD {
        attrs.hard_stop_triggered = true;
        tracing::info!(abuse_count = attrs.abuse_count, "Abuse threshold reached");
        BoundaryAction::HardStop
    } else {
        tracing::debug!(abuse_count = attrs.abuse_count, "Abusive message");
        BoundaryAction::WarnAbuse
    }
}

/// Whole message is a greeting or a who-are-you question
pub fn is_orientation_only(text: &str) -> bool {
    ORIENTATION.matches_whole(text)
}

pub fn has_dating_context(text: &str) -> bool {
    DATING_CONTEXT.matches(text)
}

pub fn has_emotional_signal(text: &str) -> bool {
    EMOTIONAL.matches(text)
}

/// Leave `ENTRY` once the user talks about dating or how they feel
pub fn should_exit_entry(text: &str) -> bool {
    if is_orientation_only(text) {
        return false;
    }
    has_dating_context(text) || has_emotional_signal(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abuse_detection() {
        assert!(is_abusive("you fucking bot"));
        assert!(is_abusive("kys"));
        assert!(is_abusive("i will kill you"));
        assert!(!is_abusive("my social skills are bad"));
        assert!(!is_abusive("she said i was a bit much"));
        assert!(!is_abusive(""));
    }

    #[test]
    fn test_boundary_escalation() {
        let mut attrs = AttributeStore::new();
        assert_eq!(entry_boundary_action("hello", &mut attrs), BoundaryAction::Allow);
        assert_eq!(attrs.abuse_count, 0);

        assert_eq!(
            entry_boundary_action("fuck off", &mut attrs),
            BoundaryAction::WarnAbuse
        );
        assert_eq!(attrs.abuse_count, 1);
        assert!(!attrs.hard_stop_triggered);

        assert_eq!(
            entry_boundary_action("you bitch", &mut attrs),
            BoundaryAction::HardStop
        );
        assert_eq!(attrs.abuse_count, 2);
        assert!(attrs.hard_stop_triggered);
    }

    #[test]
    fn test_orientation_never_exits() {
        assert!(is_orientation_only("hey there"));
        assert!(is_orientation_only("are you a bot"));
        assert!(!should_exit_entry("hi"));
        assert!(!should_exit_entry("who are you"));
        assert!(!should_exit_entry(""));
    }

    #[test]
    fn test_exit_on_context_or_emotion() {
        assert!(should_exit_entry("hey i need help with dating"));
        assert!(should_exit_entry("my girlfriend left me"));
        assert!(should_exit_entry("honestly just lonely lately"));
        assert!(!should_exit_entry("what's the weather like"));
    }

    #[test]
    fn test_inflected_dating_words_exit() {
        assert!(should_exit_entry("i dated someone for a while"));
        assert!(should_exit_entry("we had two dates and then silence"));
        assert!(!should_exit_entry("i need to update my data"));
    }
}
