use std::fmt;

pub type SimJoinResult<T> = Result<T, SimJoinError>;

/// Errors raised while configuring or running a similarity join.
///
/// Mirrors the shape of a hand-rolled CLI error enum: a small closed set of
/// variants, each carrying a plain diagnostic string, with no external error
/// crate in the mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimJoinError {
    /// A record or table failed a structural precondition (e.g. duplicate keys).
    InvalidInput(String),
    /// The join configuration itself is inconsistent (bad threshold, unsupported
    /// measure/comparison-operator pair, wrong tokenizer for the measure).
    InvalidConfig(String),
    /// A tokenizer implementation violated the `Tokenizer` contract.
    InvalidTokenizer(String),
    /// An invariant the core is supposed to maintain internally was violated.
    /// Reaching this is a bug in this crate, not a caller error.
    Internal(String),
}

impl fmt::Display for SimJoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Self::InvalidTokenizer(msg) => write!(f, "invalid tokenizer: {}", msg),
            Self::Internal(msg) => write!(f, "internal error (this is a bug): {}", msg),
        }
    }
}

impl std::error::Error for SimJoinError {}

impl From<String> for SimJoinError {
    fn from(msg: String) -> Self {
        Self::InvalidInput(msg)
    }
}

impl<'a> From<&'a str> for SimJoinError {
    fn from(msg: &'a str) -> Self {
        Self::InvalidInput(msg.to_owned())
    }
}
