//! Keyword signal classifiers
//!
//! Every classifier is a pure function over text that has already been
//! through [`crate::normalize::normalize`]. Phrase lists are static data,
//! compiled once on first use.

mod boundary;
mod discovery;
mod location;
mod problem;
mod qualification;

pub use boundary::{
    entry_boundary_action, has_dating_context, has_emotional_signal, is_abusive,
    is_orientation_only, should_exit_entry, BoundaryAction, ABUSE_HARD_STOP_THRESHOLD,
};
pub use discovery::{
    confirms_pattern, has_concrete_detail, has_named_obstacle, has_problem_signal,
    has_specific_pattern, is_exhausted, is_help_seeking, is_stall, seeks_understanding,
    should_exit_rapport, STALL_MAX_WORDS,
};
pub use location::{extract_location_detail, is_location_eligible, LocationDetail};
pub use problem::infer_problem_tag;
pub use qualification::{
    classify_financial_bucket, classify_relationship_goal, has_capacity,
    has_investment_mindset, is_affirmative, is_negative, permission, Permission,
};
