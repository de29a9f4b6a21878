use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find roommate matches for a member
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Falls back to the configured default limit when absent
    #[validate(range(max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    #[serde(alias = "exclude_user_ids", rename = "excludeUserIds")]
    pub exclude_user_ids: Vec<String>,
}

impl FindMatchesRequest {
    pub fn new(user_id: impl Into<String>, limit: u16) -> Self {
        Self {
            limit: Some(limit),
            ..Self::for_user(user_id)
        }
    }

    /// Request without an explicit limit
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            limit: None,
            exclude_user_ids: Vec::new(),
        }
    }
}
