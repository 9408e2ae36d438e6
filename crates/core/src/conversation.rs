//! Conversation types including funnel states and turns

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::SetterError;

/// Phase of the funnel a state belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelPhase {
    Entry,
    Discovery,
    Qualification,
    Resolution,
}

/// Conversation states of the sales-qualification funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationState {
    /// First contact, boundary checks and orientation
    #[default]
    Entry,
    /// Building rapport around the user's dating life
    Rapport,
    /// Digging into the concrete recurring problem
    ProblemDiscovery,
    /// Asking permission to talk about coaching
    CoachingTransition,
    /// Where the user lives
    QualLocation,
    /// What kind of relationship the user wants
    QualRelationshipGoal,
    /// Whether the user has capacity to take on a program right now
    QualFitness,
    /// Financial readiness
    QualFinance,
    /// Present the matched premium product
    RouteHighTicket,
    /// Present the self-guided course library
    RouteLowTicket,
    /// Link has been sent, handle follow-ups
    PostLinkFlow,
    /// Conversation over
    End,
}

static STATE_TRANSITIONS: Lazy<HashMap<ConversationState, &'static [ConversationState]>> =
    Lazy::new(|| {
        use ConversationState::*;
        let mut map = HashMap::new();
        map.insert(Entry, &[Entry, Rapport, End] as &[_]);
        map.insert(Rapport, &[Rapport, ProblemDiscovery] as &[_]);
        map.insert(
            ProblemDiscovery,
            &[ProblemDiscovery, CoachingTransition] as &[_],
        );
        map.insert(
            CoachingTransition,
            &[CoachingTransition, QualLocation] as &[_],
        );
        map.insert(
            QualLocation,
            &[QualRelationshipGoal, RouteLowTicket] as &[_],
        );
        map.insert(
            QualRelationshipGoal,
            &[QualRelationshipGoal, QualFitness] as &[_],
        );
        map.insert(QualFitness, &[QualFinance, RouteLowTicket] as &[_]);
        map.insert(
            QualFinance,
            &[QualFinance, RouteHighTicket, RouteLowTicket] as &[_],
        );
        map.insert(RouteHighTicket, &[PostLinkFlow] as &[_]);
        map.insert(RouteLowTicket, &[PostLinkFlow] as &[_]);
        map.insert(PostLinkFlow, &[PostLinkFlow] as &[_]);
        map.insert(End, &[] as &[_]);
        map
    });

impl ConversationState {
    /// Every state in funnel order
    pub const ALL: [ConversationState; 12] = [
        ConversationState::Entry,
        ConversationState::Rapport,
        ConversationState::ProblemDiscovery,
        ConversationState::CoachingTransition,
        ConversationState::QualLocation,
        ConversationState::QualRelationshipGoal,
        ConversationState::QualFitness,
        ConversationState::QualFinance,
        ConversationState::RouteHighTicket,
        ConversationState::RouteLowTicket,
        ConversationState::PostLinkFlow,
        ConversationState::End,
    ];

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationState::Entry => "ENTRY",
            ConversationState::Rapport => "RAPPORT",
            ConversationState::ProblemDiscovery => "PROBLEM_DISCOVERY",
            ConversationState::CoachingTransition => "COACHING_TRANSITION",
            ConversationState::QualLocation => "QUAL_LOCATION",
            ConversationState::QualRelationshipGoal => "QUAL_RELATIONSHIP_GOAL",
            ConversationState::QualFitness => "QUAL_FITNESS",
            ConversationState::QualFinance => "QUAL_FINANCE",
            ConversationState::RouteHighTicket => "ROUTE_HIGH_TICKET",
            ConversationState::RouteLowTicket => "ROUTE_LOW_TICKET",
            ConversationState::PostLinkFlow => "POST_LINK_FLOW",
            ConversationState::End => "END",
        }
    }

    /// Key of the directive text for this state (`QUAL_FINANCE` -> `qual_finance`)
    pub fn directive_key(&self) -> &'static str {
        match self {
            ConversationState::Entry => "entry",
            ConversationState::Rapport => "rapport",
            ConversationState::ProblemDiscovery => "problem_discovery",
            ConversationState::CoachingTransition => "coaching_transition",
            ConversationState::QualLocation => "qual_location",
            ConversationState::QualRelationshipGoal => "qual_relationship_goal",
            ConversationState::QualFitness => "qual_fitness",
            ConversationState::QualFinance => "qual_finance",
            ConversationState::RouteHighTicket => "route_high_ticket",
            ConversationState::RouteLowTicket => "route_low_ticket",
            ConversationState::PostLinkFlow => "post_link_flow",
            ConversationState::End => "end",
        }
    }

    pub fn phase(&self) -> FunnelPhase {
        match self {
            ConversationState::Entry => FunnelPhase::Entry,
            ConversationState::Rapport
            | ConversationState::ProblemDiscovery
            | ConversationState::CoachingTransition => FunnelPhase::Discovery,
            ConversationState::QualLocation
            | ConversationState::QualRelationshipGoal
            | ConversationState::QualFitness
            | ConversationState::QualFinance => FunnelPhase::Qualification,
            ConversationState::RouteHighTicket
            | ConversationState::RouteLowTicket
            | ConversationState::PostLinkFlow
            | ConversationState::End => FunnelPhase::Resolution,
        }
    }

    /// Only `End` is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConversationState::End)
    }

    /// Successors the engine may produce from this state, self-loop included
    pub fn allowed_transitions(&self) -> &'static [ConversationState] {
        STATE_TRANSITIONS.get(self).copied().unwrap_or(&[])
    }

    pub fn can_transition_to(&self, target: ConversationState) -> bool {
        self.allowed_transitions().contains(&target)
    }
}

impl std::fmt::Display for ConversationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationState {
    type Err = SetterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ConversationState::ALL
            .iter()
            .copied()
            .find(|state| state.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SetterError::InvalidState(s.to_string()))
    }
}

/// Role in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
    System,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
            TurnRole::System => "system",
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single turn in the conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_is_only_terminal_state() {
        for state in ConversationState::ALL {
            assert_eq!(state.is_terminal(), state == ConversationState::End);
            if !state.is_terminal() {
                assert!(
                    !state.allowed_transitions().is_empty(),
                    "{} has no successor",
                    state
                );
            }
        }
        assert!(ConversationState::End.allowed_transitions().is_empty());
    }

    #[test]
    fn test_directive_key_is_case_folded_name() {
        for state in ConversationState::ALL {
            assert_eq!(state.directive_key(), state.as_str().to_lowercase());
        }
    }

    #[test]
    fn test_parse_state() {
        assert_eq!(
            "QUAL_FINANCE".parse::<ConversationState>().unwrap(),
            ConversationState::QualFinance
        );
        assert_eq!(
            "post_link_flow".parse::<ConversationState>().unwrap(),
            ConversationState::PostLinkFlow
        );
        let err = "STAGE_1_PATTERN".parse::<ConversationState>().unwrap_err();
        assert!(matches!(err, SetterError::InvalidState(s) if s == "STAGE_1_PATTERN"));
    }

    #[test]
    fn test_serde_uses_screaming_names() {
        let json = serde_json::to_string(&ConversationState::RouteHighTicket).unwrap();
        assert_eq!(json, "\"ROUTE_HIGH_TICKET\"");
        let back: ConversationState = serde_json::from_str("\"COACHING_TRANSITION\"").unwrap();
        assert_eq!(back, ConversationState::CoachingTransition);
    }

    #[test]
    fn test_phases() {
        assert_eq!(ConversationState::Entry.phase(), FunnelPhase::Entry);
        assert_eq!(ConversationState::CoachingTransition.phase(), FunnelPhase::Discovery);
        assert_eq!(ConversationState::QualFitness.phase(), FunnelPhase::Qualification);
        assert_eq!(ConversationState::PostLinkFlow.phase(), FunnelPhase::Resolution);
    }

    #[test]
    fn test_turn_creation() {
        let turn = Turn::user("my matches never reply");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(Turn::assistant("ok").role.as_str(), "assistant");
    }
}
