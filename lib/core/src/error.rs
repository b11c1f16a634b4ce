use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A raw record failed normalization.
    #[error("Malformed attribute '{attribute}' on item {item}: {reason}")]
    MalformedAttribute {
        item: String,
        attribute: &'static str,
        reason: String,
    },

    /// A fused sub-vector disagrees with the width recorded at fit time.
    /// Always an encoder or fusion bug.
    #[error("Dimension mismatch in {block} block: expected {expected}, got {actual}")]
    DimensionMismatch {
        block: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown title: {0}")]
    UnknownTitle(String),

    #[error("top_n must be a positive integer, got {0}")]
    InvalidTopN(usize),

    #[error("No catalog item passed normalization")]
    EmptyCatalog,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Query-time errors the caller can recover from by fixing its input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::UnknownTitle(_) | Error::InvalidTopN(_))
    }
}
