use std::fmt;

/// Result type for pattern operations.
pub type PatternResult<T = ()> = Result<T, PatternError>;

/// Error from a pattern operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The sequence holds no events, so there is nothing to deliver.
    EmptySequence,
    /// An unrecognized traversal policy identifier.
    InvalidPolicy(String),
    /// A value write named an event that is not in the sequence.
    ValueNotFound,
    /// The pattern was used after `dispose()`.
    UseAfterDispose,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySequence => write!(f, "pattern has no events"),
            Self::InvalidPolicy(id) => write!(f, "unknown pattern type: {:?}", id),
            Self::ValueNotFound => write!(f, "value is not in the pattern's events"),
            Self::UseAfterDispose => write!(f, "pattern used after dispose"),
        }
    }
}

impl std::error::Error for PatternError {}
