//! Progress scoring
//!
//! A fixed lookup by funnel position, used only for progress display.

use setter_core::ConversationState;

/// Progress in `[0, 100]`, non-decreasing along the funnel
pub fn score_for(state: ConversationState) -> u8 {
    match state {
        ConversationState::Entry => 0,
        ConversationState::Rapport => 15,
        ConversationState::ProblemDiscovery => 30,
        ConversationState::CoachingTransition => 50,
        ConversationState::QualLocation => 70,
        ConversationState::QualRelationshipGoal => 78,
        ConversationState::QualFitness => 85,
        ConversationState::QualFinance => 92,
        ConversationState::RouteHighTicket
        | ConversationState::RouteLowTicket
        | ConversationState::PostLinkFlow
        | ConversationState::End => 100,
    }
}
