//! Text processing for the sales-qualification funnel
//!
//! This crate provides:
//! - **Normalization**: one canonical form every classifier expects
//! - **Phrase sets**: word-boundary keyword matching with stems and exclusions
//! - **Signals**: the keyword classifiers that drive state transitions
//! - **Safety**: gates that run before the transition engine
//! - **Age**: opportunistic age extraction
//!
//! # Example
//!
//! ```
//! use setter_text_processing::{normalize, signals};
//!
//! let text = normalize("I live in Germany!");
//! let location = signals::extract_location_detail(&text).unwrap();
//! assert_eq!(location.detail.as_deref(), Some("germany"));
//! ```

pub mod age;
pub mod normalize;
pub mod phrases;
pub mod safety;
pub mod signals;

pub use age::extract_age;
pub use normalize::{normalize, word_count};
pub use phrases::{PhraseSet, PrioritySet};
pub use safety::{identity_question, is_unsafe, OffTopic};
