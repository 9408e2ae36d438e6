//! Rapport and problem-discovery signals

use once_cell::sync::Lazy;

use crate::normalize::word_count;
use crate::phrases::PhraseSet;

/// Messages this short count as a stall
pub const STALL_MAX_WORDS: usize = 4;

static HELP_SEEKING: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "help me",
        "need help",
        "can you help",
        "how do i",
        "how can i",
        "what should i do",
        "what do i do",
        "any advice",
        "any tips",
        "give me advice",
        "i need advice",
        "teach me",
        "fix this",
        "i want to get better",
        "i want to improve",
    ])
});

static EXHAUSTION: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "tired of",
        "sick of",
        "fed up",
        "exhausted",
        "i give up",
        "giving up",
        "done with",
        "over it",
        "burnt out",
        "burned out",
        "can't keep doing",
        "cant keep doing",
        "frustrated",
    ])
});

// recurrence adverbs
static PATTERN: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "always",
        "every time",
        "everytime",
        "never",
        "usually",
        "keeps happening",
        "again and again",
        "over and over",
        "all the time",
        "each time",
        "every single time",
    ])
});

static NAMED_OBSTACLE: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "the problem is",
        "my problem",
        "my issue",
        "the issue is",
        "i struggle with",
        "i'm struggling with",
        "i can't",
        "i don't know how to",
        "stuck",
        "i get nervous",
        "anxiety",
    ])
});

static SEEKS_UNDERSTANDING: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "why do",
        "why does",
        "why am i",
        "why is it",
        "what am i doing wrong",
        "what's wrong with me",
        "whats wrong with me",
        "figure out why",
        "understand why",
    ])
});

static VAGUENESS: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "i don't know",
        "i dont know",
        "idk",
        "not sure",
        "no idea",
        "everything",
        "nothing really",
        "whatever",
        "i guess",
        "maybe",
        "kind of",
        "hard to say",
        "dunno",
    ])
});

static CONCRETE_DETAIL: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "message*",
        "matches",
        "match",
        "ghost*",
        "reply",
        "replies",
        "replied",
        "replying",
        "texts",
        "texting",
        "text back",
        "dates",
        "first date",
        "second date",
        "profile",
        "bio",
        "swipe*",
        "left on read",
        "left me on read",
        "unmatch*",
        "app",
        "apps",
        "tinder",
        "hinge",
        "bumble",
        "conversation*",
        "dm",
        "dms",
    ])
});

static PROBLEM_SIGNAL: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "ghost*",
        "no replies",
        "don't reply",
        "dont reply",
        "stop replying",
        "stops replying",
        "unmatch*",
        "no matches",
        "few matches",
        "friend zone",
        "friendzone*",
        "no spark",
        "fizzle*",
        "dies out",
        "flake*",
        "rejected",
        "rejection",
        "left on read",
        "nervous",
        "awkward",
        "dry conversation*",
        "dry texts",
        "one word answers",
    ])
});

pub fn is_help_seeking(text: &str) -> bool {
    HELP_SEEKING.matches(text)
}

pub fn is_exhausted(text: &str) -> bool {
    EXHAUSTION.matches(text)
}

/// Describes something that keeps recurring
pub fn has_specific_pattern(text: &str) -> bool {
    PATTERN.matches(text)
}

pub fn has_named_obstacle(text: &str) -> bool {
    NAMED_OBSTACLE.matches(text)
}

pub fn seeks_understanding(text: &str) -> bool {
    SEEKS_UNDERSTANDING.matches(text)
}

/// Any signal that the user is ready to dig into the problem
pub fn should_exit_rapport(text: &str) -> bool {
    is_help_seeking(text)
        || has_specific_pattern(text)
        || has_named_obstacle(text)
        || seeks_understanding(text)
}

/// Short or vague answer
pub fn is_stall(text: &str) -> bool {
    word_count(text) <= STALL_MAX_WORDS || VAGUENESS.matches(text)
}

pub fn has_concrete_detail(text: &str) -> bool {
    CONCRETE_DETAIL.matches(text)
}

pub fn has_problem_signal(text: &str) -> bool {
    PROBLEM_SIGNAL.matches(text)
}

pub fn confirms_pattern(text: &str) -> bool {
    PATTERN.matches(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rapport_exit_signals() {
        assert!(should_exit_rapport("how do i get more dates"));
        assert!(should_exit_rapport("she always stops texting after a week"));
        assert!(should_exit_rapport("the problem is i get nervous"));
        assert!(should_exit_rapport("why do girls lose interest"));
        assert!(!should_exit_rapport("things have been okay i guess"));
        assert!(!should_exit_rapport(""));
    }

    #[test]
    fn test_stall() {
        assert!(is_stall(""));
        assert!(is_stall("yeah kinda"));
        assert!(is_stall("its fine i suppose"));
        assert!(is_stall("honestly i don't know what to tell you man"));
        assert!(!is_stall("i met someone at work last month and it went well"));
    }

    #[test]
    fn test_concrete_detail() {
        assert!(has_concrete_detail("she stopped replying"));
        assert!(has_concrete_detail("my messages get ignored"));
        assert!(has_concrete_detail("got ghosted"));
        assert!(!has_concrete_detail("everything is bad"));
    }

    #[test]
    fn test_problem_signals() {
        assert!(has_problem_signal("they ghost me after two dates"));
        assert!(has_problem_signal("it always fizzles"));
        assert!(has_problem_signal("stuck in the friend zone"));
        assert!(!has_problem_signal("work is busy"));

        assert!(confirms_pattern("this happens every time"));
        assert!(confirms_pattern("she never texts first"));
        assert!(!confirms_pattern("it happened once"));
    }

    #[test]
    fn test_exhaustion_and_help() {
        assert!(is_exhausted("honestly i'm so tired of this"));
        assert!(is_exhausted("i'm over it"));
        assert!(is_help_seeking("can you help"));
        assert!(!is_help_seeking("helpful tips"));
    }
}
