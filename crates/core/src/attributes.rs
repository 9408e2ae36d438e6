//! Attribute store carried across turns
//!
//! The caller owns one `AttributeStore` per conversation and lends it to the
//! transition engine by `&mut` for the duration of a single call. Counters,
//! flags and memoized extractions are all named fields; anything else a
//! newer client sends lands in `extra` and is preserved untouched.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::conversation::ConversationState;
use crate::problem::ProblemTag;

/// Region a user lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationRegion {
    Us,
    Canada,
    Eu,
    Other,
}

impl LocationRegion {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationRegion::Us => "US",
            LocationRegion::Canada => "CANADA",
            LocationRegion::Eu => "EU",
            LocationRegion::Other => "OTHER",
        }
    }

    /// Regions the high-ticket program is sold in
    pub fn is_eligible(&self) -> bool {
        !matches!(self, LocationRegion::Other)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "US" | "USA" => Some(LocationRegion::Us),
            "CANADA" => Some(LocationRegion::Canada),
            "EU" | "EUROPE" => Some(LocationRegion::Eu),
            "OTHER" => Some(LocationRegion::Other),
            _ => None,
        }
    }
}

/// Financial readiness bucket
///
/// Always stored lower-case; parsing accepts any case so upstream
/// extractors that emit `LOW`/`HIGH` converge on the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinancialBucket {
    Low,
    Mid,
    High,
}

impl FinancialBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinancialBucket::Low => "low",
            FinancialBucket::Mid => "mid",
            FinancialBucket::High => "high",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Some(FinancialBucket::Low),
            "mid" | "medium" => Some(FinancialBucket::Mid),
            "high" => Some(FinancialBucket::High),
            _ => None,
        }
    }
}

/// Whether the stated relationship goal fits the coaching program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipGoal {
    Supported,
    Unsupported,
}

impl RelationshipGoal {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "supported" | "serious" => Some(RelationshipGoal::Supported),
            "unsupported" | "casual" => Some(RelationshipGoal::Unsupported),
            _ => None,
        }
    }
}

macro_rules! lenient_deserialize {
    ($ty:ty) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                <$ty>::parse(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} value: {}",
                        stringify!($ty),
                        raw
                    ))
                })
            }
        }
    };
}

lenient_deserialize!(LocationRegion);
lenient_deserialize!(FinancialBucket);
lenient_deserialize!(RelationshipGoal);

/// Per-conversation attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeStore {
    // counters
    pub abuse_count: u32,
    pub stall_count: u32,
    pub problem_signal_count: u32,
    pub current_state_turn_count: u32,

    // flags
    pub hard_stop_triggered: bool,
    pub problem_confirmed: bool,
    pub finance_completed: bool,

    // classified facts
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub location_region: Option<LocationRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub relationship_goal: Option<RelationshipGoal>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_option")]
    pub financial_bucket: Option<FinancialBucket>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "specific_problem")]
    pub primary_problem: Option<ProblemTag>,
    #[serde(deserialize_with = "lenient_age")]
    pub age: u32,

    /// Forward-compatible extension counters and values
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the problem tag unless one is already set.
    ///
    /// Returns true when the tag was written. `General` is never stored.
    pub fn set_primary_problem_if_absent(&mut self, tag: ProblemTag) -> bool {
        if self.primary_problem.is_some() || tag.is_general() {
            return false;
        }
        self.primary_problem = Some(tag);
        tracing::debug!(tag = %tag, "Primary problem recorded");
        true
    }

    pub fn primary_problem_or_general(&self) -> ProblemTag {
        self.primary_problem.unwrap_or_default()
    }

    /// Turn-count bookkeeping after a transition
    pub fn record_turn(&mut self, previous: ConversationState, next: ConversationState) {
        if previous == next {
            self.current_state_turn_count = self.current_state_turn_count.saturating_add(1);
        } else {
            self.current_state_turn_count = 0;
        }
    }

    /// Increment an extension counter, creating it at 1
    pub fn increment_extra(&mut self, key: &str) -> i64 {
        let next = self
            .extra
            .get(key)
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(0)
            + 1;
        self.extra.insert(key.to_string(), serde_json::Value::from(next));
        next
    }

    pub fn extra_counter(&self, key: &str) -> i64 {
        self.extra
            .get(key)
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(0)
    }
}

/// First run of ASCII digits as an age, or 0
pub fn parse_age(raw: &str) -> u32 {
    let digits: String = raw
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

fn lenient_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

// GENERAL is the absence of a problem, not a stored value
fn specific_problem<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ProblemTag>, D::Error> {
    let tag: Option<ProblemTag> = lenient_option(deserializer)?;
    Ok(tag.filter(|t| !t.is_general()))
}

fn lenient_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => parse_age(&s),
        _ => 0,
    })
}
