//! Problem-tag inference

use once_cell::sync::Lazy;
use setter_core::ProblemTag;

use crate::phrases::{PhraseSet, PrioritySet};

static PROBLEM_TAGS: Lazy<PrioritySet<ProblemTag>> = Lazy::new(|| {
    PrioritySet::new(vec![
        (
            ProblemTag::Texting,
            PhraseSet::new([
                "text*",
                "messag*",
                "what to say",
                "fizzle*",
                "reply",
                "replies",
                "replied",
                "replying",
                "left on read",
            ]),
        ),
        (
            ProblemTag::Matches,
            PhraseSet::new([
                "matches",
                "matched",
                "matching",
                "no matches",
                "dating apps",
                "dating app",
                "tinder",
                "hinge",
                "bumble",
                "profile",
                "bio",
            ]),
        ),
        (
            ProblemTag::Approach,
            PhraseSet::new([
                "approach*",
                "in person",
                "real life",
                "cold approach",
                "social anxiety",
                "nervous",
            ]),
        ),
        (
            ProblemTag::Spark,
            PhraseSet::new([
                "no spark",
                "friend zone",
                "friends",
                "chemistry",
                "attraction",
                "too nice",
            ]),
        ),
        (
            ProblemTag::Escalation,
            PhraseSet::new([
                "escalat*",
                "physical",
                "kiss*",
                "touch*",
                "sexual",
                "make a move",
                "made a move",
            ]),
        ),
        (
            ProblemTag::Confidence,
            PhraseSet::new([
                "confidence",
                "self doubt",
                "feel stuck",
                "insecure",
                "not good enough",
                "lost",
            ]),
        ),
    ])
});

/// Most specific problem mentioned, `General` if none.
///
/// Checked in order TEXTING, MATCHES, APPROACH, SPARK, ESCALATION,
/// CONFIDENCE.
pub fn infer_problem_tag(text: &str) -> ProblemTag {
    PROBLEM_TAGS.classify(text).unwrap_or(ProblemTag::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_tag() {
        assert_eq!(infer_problem_tag("she stops texting me"), ProblemTag::Texting);
        assert_eq!(infer_problem_tag("i get no matches on hinge"), ProblemTag::Matches);
        assert_eq!(infer_problem_tag("i freeze up in person"), ProblemTag::Approach);
        assert_eq!(infer_problem_tag("i always end up in the friend zone"), ProblemTag::Spark);
        assert_eq!(infer_problem_tag("i never know when to kiss her"), ProblemTag::Escalation);
        assert_eq!(infer_problem_tag("i'm just so insecure"), ProblemTag::Confidence);
        assert_eq!(infer_problem_tag("life is hard"), ProblemTag::General);
        assert_eq!(infer_problem_tag(""), ProblemTag::General);
    }

    #[test]
    fn test_inflected_forms() {
        assert_eq!(
            infer_problem_tag("she texted me once then vanished"),
            ProblemTag::Texting
        );
        assert_eq!(infer_problem_tag("she never replied"), ProblemTag::Texting);
        assert_eq!(infer_problem_tag("i approached her and froze"), ProblemTag::Approach);
        assert_eq!(infer_problem_tag("we kissed and then nothing"), ProblemTag::Escalation);
        assert_eq!(
            infer_problem_tag("things never escalated past hugging"),
            ProblemTag::Escalation
        );
        assert_eq!(infer_problem_tag("we matched but she's quiet"), ProblemTag::Matches);
    }

    #[test]
    fn test_priority() {
        // texting outranks matches
        assert_eq!(
            infer_problem_tag("i get matches on tinder but they never reply"),
            ProblemTag::Texting
        );
        // approach outranks confidence
        assert_eq!(
            infer_problem_tag("no confidence when i approach girls"),
            ProblemTag::Approach
        );
    }
}
