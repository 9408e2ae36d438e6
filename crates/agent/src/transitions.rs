//! Funnel transition engine
//!
//! Each state owns one guard function. A guard reads the normalized message,
//! may update the attribute store, and returns the next state. The engine
//! normalizes once, dispatches through the table, then does the turn-count
//! bookkeeping shared by every state.

use once_cell::sync::Lazy;
use setter_core::{AttributeStore, ConversationState, FinancialBucket, LocationRegion};
use setter_text_processing::normalize;
use setter_text_processing::signals::{self, BoundaryAction, Permission};
use std::collections::HashMap;

/// Problem signals after which the problem counts as confirmed
pub const PROBLEM_CONFIRMATION_THRESHOLD: u32 = 2;

/// Guard for one state: normalized text in, next state out
pub type Guard = fn(&str, &mut AttributeStore) -> ConversationState;

static DEFAULT_ENGINE: Lazy<TransitionEngine> = Lazy::new(TransitionEngine::new);

/// Next state for a raw message, using the shared default engine
pub fn determine_next_state(
    state: ConversationState,
    raw_message: &str,
    attrs: &mut AttributeStore,
) -> ConversationState {
    DEFAULT_ENGINE.next_state(state, raw_message, attrs)
}

/// Table of per-state guards
pub struct TransitionEngine {
    guards: HashMap<ConversationState, Guard>,
}

impl TransitionEngine {
    pub fn new() -> Self {
        use ConversationState::*;

        let mut guards: HashMap<ConversationState, Guard> = HashMap::new();
        guards.insert(Entry, entry);
        guards.insert(Rapport, rapport);
        guards.insert(ProblemDiscovery, problem_discovery);
        guards.insert(CoachingTransition, coaching_transition);
        guards.insert(QualLocation, qual_location);
        guards.insert(QualRelationshipGoal, qual_relationship_goal);
        guards.insert(QualFitness, qual_fitness);
        guards.insert(QualFinance, qual_finance);
        guards.insert(RouteHighTicket, routed);
        guards.insert(RouteLowTicket, routed);
        guards.insert(PostLinkFlow, post_link_flow);
        guards.insert(End, end);

        Self { guards }
    }

    /// Replace the guard for one state
    pub fn with_guard(mut self, state: ConversationState, guard: Guard) -> Self {
        self.guards.insert(state, guard);
        self
    }

    /// Compute the next state and update `attrs` in place.
    ///
    /// Total: a state without a guard goes to `END`.
    pub fn next_state(
        &self,
        state: ConversationState,
        raw_message: &str,
        attrs: &mut AttributeStore,
    ) -> ConversationState {
        let text = normalize(raw_message);

        let next = match self.guards.get(&state) {
            Some(guard) => guard(&text, attrs),
            None => {
                tracing::warn!(state = %state, "No guard registered, ending conversation");
                ConversationState::End
            }
        };

        if !state.is_terminal() && !state.can_transition_to(next) {
            tracing::warn!(from = %state, to = %next, "Guard returned a state outside the successor table");
        }

        attrs.record_turn(state, next);

        tracing::debug!(
            from = %state,
            to = %next,
            state_turns = attrs.current_state_turn_count,
            "State transition"
        );

        next
    }
}

impl Default for TransitionEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn entry(text: &str, attrs: &mut AttributeStore) -> ConversationState {
    match signals::entry_boundary_action(text, attrs) {
        BoundaryAction::HardStop => ConversationState::End,
        BoundaryAction::WarnAbuse => ConversationState::Entry,
        BoundaryAction::Allow if signals::should_exit_entry(text) => ConversationState::Rapport,
        BoundaryAction::Allow => ConversationState::Entry,
    }
}

fn rapport(text: &str, attrs: &mut AttributeStore) -> ConversationState {
    if signals::should_exit_rapport(text) {
        return ConversationState::ProblemDiscovery;
    }

    if signals::has_concrete_detail(text) {
        attrs.stall_count = 0;
    } else if signals::is_stall(text) {
        attrs.stall_count = attrs.stall_count.saturating_add(1);
    }
    ConversationState::Rapport
}

fn problem_discovery(text: &str, attrs: &mut AttributeStore) -> ConversationState {
    if signals::has_problem_signal(text) {
        attrs.problem_signal_count = attrs.problem_signal_count.saturating_add(1);
    }
    if signals::confirms_pattern(text)
        || attrs.problem_signal_count >= PROBLEM_CONFIRMATION_THRESHOLD
    {
        attrs.problem_confirmed = true;
    }

    // confirmation does not gate the exit
    if signals::is_help_seeking(text) || signals::is_exhausted(text) {
        ConversationState::CoachingTransition
    } else {
        ConversationState::ProblemDiscovery
    }
}

fn coaching_transition(text: &str, _attrs: &mut AttributeStore) -> ConversationState {
    match signals::permission(text) {
        Permission::Granted => ConversationState::QualLocation,
        Permission::Declined => ConversationState::CoachingTransition,
    }
}

fn qual_location(text: &str, attrs: &mut AttributeStore) -> ConversationState {
    match signals::extract_location_detail(text) {
        Some(location) => {
            attrs.location_region = Some(location.region);
            attrs.location_detail = location.detail;
            ConversationState::QualRelationshipGoal
        }
        None => {
            attrs.location_region = Some(LocationRegion::Other);
            ConversationState::RouteLowTicket
        }
    }
}

fn qual_relationship_goal(text: &str, attrs: &mut AttributeStore) -> ConversationState {
    match signals::classify_relationship_goal(text) {
        Some(goal) => {
            attrs.relationship_goal = Some(goal);
            ConversationState::QualFitness
        }
        None => ConversationState::QualRelationshipGoal,
    }
}

fn qual_fitness(text: &str, _attrs: &mut AttributeStore) -> ConversationState {
    if signals::has_capacity(text) {
        ConversationState::QualFinance
    } else {
        ConversationState::RouteLowTicket
    }
}

fn qual_finance(text: &str, attrs: &mut AttributeStore) -> ConversationState {
    if !signals::has_capacity(text) {
        return ConversationState::RouteLowTicket;
    }

    if let Some(bucket) = signals::classify_financial_bucket(text) {
        attrs.finance_completed = true;
        attrs.financial_bucket = Some(bucket);
        return match bucket {
            FinancialBucket::Low => ConversationState::RouteLowTicket,
            FinancialBucket::Mid | FinancialBucket::High => ConversationState::RouteHighTicket,
        };
    }

    if signals::has_investment_mindset(text) {
        attrs.finance_completed = true;
        attrs.financial_bucket = Some(FinancialBucket::High);
        return ConversationState::RouteHighTicket;
    }

    ConversationState::QualFinance
}

fn routed(_text: &str, _attrs: &mut AttributeStore) -> ConversationState {
    ConversationState::PostLinkFlow
}

// intent branching happens in reply generation
fn post_link_flow(_text: &str, _attrs: &mut AttributeStore) -> ConversationState {
    ConversationState::PostLinkFlow
}

fn end(_text: &str, _attrs: &mut AttributeStore) -> ConversationState {
    ConversationState::End
}
