use serde::{Deserialize, Serialize};
use crate::models::domain::RoommateMatch;

/// Response for a find-matches call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<RoommateMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
