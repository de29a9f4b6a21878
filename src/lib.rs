//! Wanas Match - roommate compatibility engine for the Wanas rental marketplace
//!
//! Scores a requester against a pool of candidates on nine independent
//! factors, normalizes the weighted total to a percentage and returns the
//! ranked top matches. Storage and transport stay with the caller.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::Matcher;
pub use error::MatchError;
pub use models::{
    AdmissionPolicy, FindMatchesRequest, FindMatchesResponse, MatchBreakdown, Member,
    RoommateMatch, ScoringWeights, UserPreferences, UserProfile,
};
