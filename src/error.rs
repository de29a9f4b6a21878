use thiserror::Error;

/// Errors raised by the matching engine before any candidate is scored
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Incomplete profile for {user_id}: missing {field}")]
    IncompleteProfile { user_id: String, field: &'static str },

    #[error("Invalid range for {user_id}: {field} min {min} exceeds max {max}")]
    InvalidRange {
        user_id: String,
        field: &'static str,
        min: u32,
        max: u32,
    },

    #[error("Unknown scoring factor: {0}")]
    UnknownFactor(String),

    #[error("Scoring weights overflow: total exceeds {}", u32::MAX)]
    WeightOverflow,
}
