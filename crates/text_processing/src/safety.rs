//! Gates that run before the transition engine
//!
//! Both take the raw message; they normalize it themselves since they sit
//! in front of the per-turn pipeline.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::phrases::{PhraseSet, PrioritySet};

static UNSAFE: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "nude",
        "nudes",
        "onlyfans",
        "only fans",
        "porn*",
        "explicit pics",
        "send pics",
        "sexting",
        "sex",
    ])
});

static OFF_TOPIC: Lazy<PrioritySet<OffTopic>> = Lazy::new(|| {
    PrioritySet::new(vec![
        (
            OffTopic::Identity,
            PhraseSet::new([
                "are you real",
                "are you really jamie",
                "is this a bot",
                "are you a bot",
                "is this ai",
                "are you ai",
                "who is this",
                "are you human",
            ]),
        ),
        (
            OffTopic::WhyAsking,
            PhraseSet::new(["why are you asking", "why do you need to know"]),
        ),
    ])
});

/// Side questions answered with a canned reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffTopic {
    /// Asking who or what they are talking to
    Identity,
    /// Asking why a qualification question is being asked
    WhyAsking,
}

/// Explicit content the assistant refuses to engage with
pub fn is_unsafe(raw: &str) -> bool {
    UNSAFE.matches(&normalize(raw))
}

pub fn identity_question(raw: &str) -> Option<OffTopic> {
    OFF_TOPIC.classify(&normalize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsafe() {
        assert!(is_unsafe("send nudes"));
        assert!(is_unsafe("do you have OnlyFans?"));
        assert!(is_unsafe("want to talk about sex"));
        assert!(!is_unsafe("i'm bad at sexual escalation"));
        assert!(!is_unsafe("she ghosted me"));
    }

    #[test]
    fn test_identity_questions() {
        assert_eq!(identity_question("wait, are you real?"), Some(OffTopic::Identity));
        assert_eq!(identity_question("Who is this??"), Some(OffTopic::Identity));
        assert_eq!(
            identity_question("why do you need to know that"),
            Some(OffTopic::WhyAsking)
        );
        assert_eq!(identity_question("i live in ohio"), None);
    }
}
