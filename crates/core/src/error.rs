//! Error types shared across the funnel crates

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetterError {
    /// A state name that is not part of the funnel, rejected at the boundary
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Reply generation failed: {0}")]
    Generation(String),

    #[error("History store error: {0}")]
    History(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SetterError>;
