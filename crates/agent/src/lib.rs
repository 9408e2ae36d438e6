//! Funnel agent
//!
//! - [`transitions`]: the per-state transition engine
//! - [`routing`]: product catalog and offer selection
//! - [`scoring`]: progress score per state
//! - [`history`]: in-memory rolling conversation history
//! - [`orchestrator`]: the per-turn pipeline tying them together
//!
//! # Example
//!
//! ```
//! use setter_agent::determine_next_state;
//! use setter_core::{AttributeStore, ConversationState};
//!
//! let mut attrs = AttributeStore::new();
//! let next = determine_next_state(ConversationState::QualLocation, "I live in Germany", &mut attrs);
//! assert_eq!(next, ConversationState::QualRelationshipGoal);
//! ```

pub mod history;
pub mod orchestrator;
pub mod routing;
pub mod scoring;
pub mod transitions;

pub use history::InMemoryHistoryStore;
pub use orchestrator::{FunnelAgent, TurnInput, TurnResult};
pub use routing::{resolve_problem, ProductCatalog, Router, RoutingDecision, Ticket};
pub use scoring::score_for;
pub use transitions::{
    determine_next_state, Guard, TransitionEngine, PROBLEM_CONFIRMATION_THRESHOLD,
};
