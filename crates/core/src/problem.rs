//! Problem categories used to pick a matching product

use serde::{Deserialize, Deserializer, Serialize};

/// The user's primary dating difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProblemTag {
    Texting,
    Matches,
    Approach,
    Spark,
    Escalation,
    Confidence,
    /// Nothing specific inferred
    #[default]
    General,
}

impl ProblemTag {
    /// All tags, in inference priority order with `General` last
    pub const ALL: [ProblemTag; 7] = [
        ProblemTag::Texting,
        ProblemTag::Matches,
        ProblemTag::Approach,
        ProblemTag::Spark,
        ProblemTag::Escalation,
        ProblemTag::Confidence,
        ProblemTag::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemTag::Texting => "TEXTING",
            ProblemTag::Matches => "MATCHES",
            ProblemTag::Approach => "APPROACH",
            ProblemTag::Spark => "SPARK",
            ProblemTag::Escalation => "ESCALATION",
            ProblemTag::Confidence => "CONFIDENCE",
            ProblemTag::General => "GENERAL",
        }
    }

    /// Parse a stored tag; anything unrecognized becomes `General`
    pub fn parse_lenient(raw: &str) -> Self {
        let wanted = raw.trim();
        ProblemTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .unwrap_or_else(|| {
                if !wanted.is_empty() {
                    tracing::debug!(raw = %raw, "Unknown problem tag, using GENERAL");
                }
                ProblemTag::General
            })
    }

    pub fn is_general(&self) -> bool {
        matches!(self, ProblemTag::General)
    }
}

impl std::fmt::Display for ProblemTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProblemTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProblemTag::parse_lenient(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(ProblemTag::parse_lenient("TEXTING"), ProblemTag::Texting);
        assert_eq!(ProblemTag::parse_lenient("spark"), ProblemTag::Spark);
        assert_eq!(ProblemTag::parse_lenient(" Confidence "), ProblemTag::Confidence);
        assert_eq!(ProblemTag::parse_lenient("BOGUS"), ProblemTag::General);
        assert_eq!(ProblemTag::parse_lenient(""), ProblemTag::General);
    }

    #[test]
    fn test_unknown_tag_deserializes_to_general() {
        let tag: ProblemTag = serde_json::from_str("\"NOT_A_TAG\"").unwrap();
        assert_eq!(tag, ProblemTag::General);
        let tag: ProblemTag = serde_json::from_str("\"MATCHES\"").unwrap();
        assert_eq!(tag, ProblemTag::Matches);
    }
}
