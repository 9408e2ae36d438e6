//! Qualification signals: permission, relationship goal, capacity, finances

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use setter_core::{FinancialBucket, RelationshipGoal};

use crate::phrases::{PhraseSet, PrioritySet};

static AFFIRMATIVE: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "yes",
        "yeah",
        "yep",
        "yup",
        "sure",
        "ok",
        "okay",
        "sounds good",
        "of course",
        "definitely",
        "absolutely",
        "let's do it",
        "lets do it",
        "go ahead",
        "i'm open",
        "im open",
        "open to it",
        "why not",
        "for sure",
        "please",
    ])
});

static NEGATIVE: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "no",
        "nope",
        "nah",
        "not interested",
        "not really",
        "no thanks",
        "not now",
        "don't want",
        "dont want",
        "not ready",
        "maybe later",
        "i'll pass",
        "pass",
    ])
});

static RELATIONSHIP_GOAL: Lazy<PrioritySet<RelationshipGoal>> = Lazy::new(|| {
    PrioritySet::new(vec![
        (
            RelationshipGoal::Supported,
            PhraseSet::new([
                "serious",
                "long term",
                "relationship",
                "marriage",
                "married",
                "marry",
                "wife",
                "husband",
                "partner",
                "settle down",
                "committed",
                "commitment",
                "the one",
                "family",
                "kids",
            ])
            .with_exclusions([
                "nothing serious",
                "not serious",
                "not looking for anything serious",
                "no relationship",
                "not a relationship",
                "anything serious",
                "don't want a relationship",
                "dont want a relationship",
                "not looking for a relationship",
                "not ready for a relationship",
            ]),
        ),
        (
            RelationshipGoal::Unsupported,
            PhraseSet::new([
                "casual",
                "fun",
                "short term",
                "hookup*",
                "hook up",
                "nothing serious",
                "not serious",
                "not looking for anything serious",
                "don't want anything serious",
                "dont want anything serious",
                "don't want a relationship",
                "dont want a relationship",
                "not looking for a relationship",
                "not ready for a relationship",
                "see what's out there",
                "seeing what's out there",
                "keep it casual",
                "fwb",
                "friends with benefits",
                "vibe",
                "play the field",
            ]),
        ),
    ])
});

static LOW_CAPACITY: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "burnt out",
        "burned out",
        "burnout",
        "overwhelmed",
        "no energy",
        "no time",
        "too busy",
        "exhausted",
        "drained",
        "can't handle",
        "cant handle",
        "too much going on",
        "barely coping",
        "no bandwidth",
        "stretched thin",
        "depressed",
        "mentally drained",
    ])
});

// low is checked before high, high before mid
static FINANCIAL_BUCKET: Lazy<PrioritySet<FinancialBucket>> = Lazy::new(|| {
    PrioritySet::new(vec![
        (
            FinancialBucket::Low,
            PhraseSet::new([
                "broke",
                "paycheck to paycheck",
                "struggling financially",
                "struggling",
                "student",
                "no money",
                "tight",
                "money is tight",
                "can't afford",
                "cant afford",
                "unemployed",
                "no job",
                "lost my job",
                "in debt",
                "not much",
                "low income",
                "not doing well",
                "not doing great",
                "not great",
                "not comfortable",
                "not stable",
                "not well off",
            ])
            .with_exclusions(["not struggling", "not broke"]),
        ),
        (
            FinancialBucket::High,
            PhraseSet::new([
                "doing well",
                "doing pretty well",
                "doing great",
                "comfortable",
                "stable",
                "savings",
                "money is fine",
                "financially free",
                "well off",
                "good money",
                "six figures",
                "high income",
                "not a problem",
                "money isn't an issue",
                "money isnt an issue",
                "great",
            ])
            .with_exclusions([
                "not doing well",
                "not doing pretty well",
                "not doing great",
                "not great",
                "not comfortable",
                "not stable",
                "not well off",
                "not good money",
                "no savings",
            ]),
        ),
        (
            FinancialBucket::Mid,
            PhraseSet::new([
                "okay",
                "ok",
                "alright",
                "decent",
                "getting by",
                "manageable",
                "average",
                "not bad",
                "could be better",
            ]),
        ),
    ])
});

static INVESTMENT_MINDSET: Lazy<PhraseSet> = Lazy::new(|| {
    PhraseSet::new([
        "i invest in myself",
        "invest in myself",
        "i hire",
        "hired a coach",
        "i buy courses",
        "bought courses",
        "bought a course",
        "paid for coaching",
        "paid for a coach",
        "worth investing",
        "i invest",
        "investing in myself",
        "spend on myself",
    ])
});

/// Answer to a permission question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Granted,
    Declined,
}

pub fn is_affirmative(text: &str) -> bool {
    AFFIRMATIVE.matches(text)
}

pub fn is_negative(text: &str) -> bool {
    NEGATIVE.matches(text)
}

/// Negative wins over affirmative; no signal at all counts as granted
pub fn permission(text: &str) -> Permission {
    if is_negative(text) {
        tracing::debug!(signal = "negative", "Permission declined");
        Permission::Declined
    } else if is_affirmative(text) {
        tracing::debug!(signal = "affirmative", "Permission granted");
        Permission::Granted
    } else {
        tracing::debug!(signal = "none", "Permission granted by default");
        Permission::Granted
    }
}

/// Serious phrases are checked first
pub fn classify_relationship_goal(text: &str) -> Option<RelationshipGoal> {
    RELATIONSHIP_GOAL.classify(text)
}

/// False only on explicit low-capacity language
pub fn has_capacity(text: &str) -> bool {
    !LOW_CAPACITY.matches(text)
}

pub fn classify_financial_bucket(text: &str) -> Option<FinancialBucket> {
    FINANCIAL_BUCKET.classify(text)
}

/// Indirect high-spend behavior
pub fn has_investment_mindset(text: &str) -> bool {
    INVESTMENT_MINDSET.matches(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_default_forward() {
        assert_eq!(permission("yeah sure"), Permission::Granted);
        assert_eq!(permission("hmm tell me more"), Permission::Granted);
        assert_eq!(permission(""), Permission::Granted);
        assert_eq!(permission("nah i'm good"), Permission::Declined);
        assert_eq!(permission("yes but not now"), Permission::Declined);
        assert!(is_affirmative("sounds good"));
        assert!(!is_negative("i know"));
    }

    #[test]
    fn test_relationship_goal() {
        assert_eq!(
            classify_relationship_goal("i want something long term"),
            Some(RelationshipGoal::Supported)
        );
        assert_eq!(
            classify_relationship_goal("looking for a wife honestly"),
            Some(RelationshipGoal::Supported)
        );
        assert_eq!(
            classify_relationship_goal("just something casual"),
            Some(RelationshipGoal::Unsupported)
        );
        assert_eq!(
            classify_relationship_goal("nothing serious right now"),
            Some(RelationshipGoal::Unsupported)
        );
        assert_eq!(classify_relationship_goal("dunno"), None);
    }

    #[test]
    fn test_negated_relationship_goal() {
        assert_eq!(
            classify_relationship_goal("i don't want anything serious"),
            Some(RelationshipGoal::Unsupported)
        );
        assert_eq!(
            classify_relationship_goal("not looking for a relationship tbh"),
            Some(RelationshipGoal::Unsupported)
        );
        assert_eq!(
            classify_relationship_goal("i dont want a relationship just fun"),
            Some(RelationshipGoal::Unsupported)
        );
        assert_eq!(classify_relationship_goal("is anything serious even possible"), None);
    }

    #[test]
    fn test_serious_checked_first() {
        assert_eq!(
            classify_relationship_goal("fun at first but eventually a relationship"),
            Some(RelationshipGoal::Supported)
        );
    }

    #[test]
    fn test_capacity() {
        assert!(has_capacity("yeah i have time"));
        assert!(has_capacity(""));
        assert!(!has_capacity("honestly i'm burnt out"));
        assert!(!has_capacity("way too busy with work"));
    }

    #[test]
    fn test_financial_bucket_order() {
        assert_eq!(
            classify_financial_bucket("i'm doing pretty well financially comfortable"),
            Some(FinancialBucket::High)
        );
        assert_eq!(
            classify_financial_bucket("broke student"),
            Some(FinancialBucket::Low)
        );
        assert_eq!(
            classify_financial_bucket("it's okay i guess"),
            Some(FinancialBucket::Mid)
        );
        // low beats high
        assert_eq!(
            classify_financial_bucket("it was great until i lost my job"),
            Some(FinancialBucket::Low)
        );
        assert_eq!(
            classify_financial_bucket("not struggling at all doing great"),
            Some(FinancialBucket::High)
        );
        assert_eq!(classify_financial_bucket("why do you ask"), None);
    }

    #[test]
    fn test_negated_comfort_is_not_high() {
        for text in [
            "i'm not doing well financially",
            "honestly money is not great",
            "not comfortable at all",
            "things are not stable right now",
        ] {
            assert_eq!(
                classify_financial_bucket(text),
                Some(FinancialBucket::Low),
                "{text}"
            );
        }
        assert_eq!(
            classify_financial_bucket("no savings but a stable job"),
            Some(FinancialBucket::High)
        );
    }

    #[test]
    fn test_investment_mindset() {
        assert!(has_investment_mindset("i invest in myself a lot"));
        assert!(has_investment_mindset("i hired a coach last year"));
        assert!(!has_investment_mindset("i like hiking"));
    }
}
