//! Core types for the sales-qualification funnel
//!
//! This crate provides the types shared by every other crate:
//! - Conversation states and their successor table
//! - Problem tags and products
//! - The per-conversation attribute store
//! - Collaborator traits (reply generation, directives, history)
//! - Error types

pub mod attributes;
pub mod conversation;
pub mod error;
pub mod problem;
pub mod product;
pub mod traits;

pub use attributes::{
    parse_age, AttributeStore, FinancialBucket, LocationRegion, RelationshipGoal,
};
pub use conversation::{ConversationState, FunnelPhase, Turn, TurnRole};
pub use error::{Result, SetterError};
pub use problem::ProblemTag;
pub use product::Product;
pub use traits::{
    DirectiveLoader, HistoryStore, PostLinkIntent, ReplyGenerator, ReplyRequest,
    StaticDirectiveLoader, DEFAULT_DIRECTIVE,
};
