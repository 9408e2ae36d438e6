//! Collaborator traits for the funnel
//!
//! The engine itself is pure. Everything that talks to the outside world
//! sits behind one of these traits so it can be swapped or mocked:
//!
//! ```text
//! Reply generation:
//!   - ReplyGenerator: free-text reply for a state directive
//!
//! Directives:
//!   - DirectiveLoader: key -> instruction text, with default filler
//!
//! History:
//!   - HistoryStore: rolling per-user conversation window
//! ```

mod directives;
mod history;
mod reply;

pub use directives::{DirectiveLoader, StaticDirectiveLoader, DEFAULT_DIRECTIVE};
pub use history::HistoryStore;
pub use reply::{PostLinkIntent, ReplyGenerator, ReplyRequest};
