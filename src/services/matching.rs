use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::error::MatchError;
use crate::models::{ErrorResponse, FindMatchesRequest, FindMatchesResponse, Member};
use crate::services::directory::{DirectoryError, UserDirectory};

/// Errors surfaced by [`MatchService`]
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

impl ServiceError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::Match(MatchError::UnknownFactor(_) | MatchError::WeightOverflow) => 500,
            ServiceError::Match(_) => 400,
            ServiceError::Directory(DirectoryError::NotFound(_)) => 404,
            ServiceError::Directory(DirectoryError::Unavailable(_)) => 503,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_failed",
            ServiceError::Match(MatchError::IncompleteProfile { .. }) => "incomplete_profile",
            ServiceError::Match(MatchError::InvalidRange { .. }) => "invalid_range",
            ServiceError::Match(MatchError::UnknownFactor(_) | MatchError::WeightOverflow) => {
                "misconfigured_weights"
            }
            ServiceError::Directory(DirectoryError::NotFound(_)) => "not_found",
            ServiceError::Directory(DirectoryError::Unavailable(_)) => "directory_unavailable",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            status_code: self.status_code(),
        }
    }
}

/// Fetches a requester and candidate pool from a directory and ranks them
pub struct MatchService<D> {
    directory: Arc<D>,
    matcher: Matcher,
    settings: MatchingSettings,
}

impl<D: UserDirectory> MatchService<D> {
    pub fn new(directory: Arc<D>, matcher: Matcher, settings: MatchingSettings) -> Self {
        Self {
            directory,
            matcher,
            settings,
        }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Find roommate matches for the user named in `req`
    pub async fn find_matches(
        &self,
        req: &FindMatchesRequest,
    ) -> Result<FindMatchesResponse, ServiceError> {
        if let Err(errors) = req.validate() {
            tracing::info!("Validation failed for find_matches request: {}", errors);
            return Err(errors.into());
        }

        let user_id = &req.user_id;
        let limit = req
            .limit
            .unwrap_or(self.settings.default_limit)
            .min(self.settings.max_limit) as usize;

        tracing::info!("Finding matches for user: {}, limit: {}", user_id, limit);

        let requester = self.directory.find_member(user_id).await.map_err(|e| {
            tracing::error!("Failed to fetch member {}: {}", user_id, e);
            e
        })?;

        if limit == 0 {
            self.matcher
                .compute_matches(&requester, std::iter::empty::<Member>(), 0)?;
            return Ok(FindMatchesResponse {
                matches: Vec::new(),
                total_candidates: 0,
            });
        }

        let pool_size = limit.saturating_mul(self.settings.pool_multiplier.max(1));
        let candidates = self
            .directory
            .candidate_pool(&requester, &req.exclude_user_ids, pool_size)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query candidates for {}: {}", user_id, e);
                e
            })?;

        let total_candidates = candidates.len();
        tracing::debug!("Found {} candidates for {}", total_candidates, user_id);

        let matches = self
            .matcher
            .compute_matches(&requester, candidates, limit)
            .map_err(|e| {
                tracing::warn!("Matching rejected input for {}: {}", user_id, e);
                e
            })?;

        tracing::info!(
            "Returning {} matches for user {} (from {} candidates)",
            matches.len(),
            user_id,
            total_candidates
        );

        Ok(FindMatchesResponse {
            matches,
            total_candidates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, BudgetRange, Gender, UserPreferences, UserProfile};
    use crate::services::directory::InMemoryDirectory;

    fn member(id: &str, city: &str, preferences: Option<UserPreferences>) -> Member {
        Member::new(
            UserProfile {
                user_id: id.to_string(),
                name: format!("User {}", id),
                city: city.to_string(),
                age: 25,
                gender: Gender::Female,
                photo_url: None,
            },
            preferences,
        )
    }

    fn complete_preferences() -> UserPreferences {
        UserPreferences {
            target_city: Some("Cairo".to_string()),
            age_range: Some(AgeRange::new(20, 30)),
            budget_range: Some(BudgetRange::new(2000, 4000)),
            ..Default::default()
        }
    }

    fn build_service(members: Vec<Member>) -> MatchService<InMemoryDirectory> {
        let settings = MatchingSettings::default();
        let directory = Arc::new(InMemoryDirectory::with_members(settings.city_prefilter, members));
        MatchService::new(directory, Matcher::with_default_weights(), settings)
    }

    #[tokio::test]
    async fn test_unknown_user_maps_to_404() {
        let service = build_service(vec![]);
        let err = service
            .find_matches(&FindMatchesRequest::new("ghost", 10))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_error_response().error, "not_found");
    }

    #[tokio::test]
    async fn test_incomplete_requester_maps_to_400() {
        let service = build_service(vec![member("req", "Cairo", None)]);
        let err = service
            .find_matches(&FindMatchesRequest::new("req", 10))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Match(MatchError::IncompleteProfile { .. })));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_limit_zero_still_validates_requester() {
        let service = build_service(vec![member("req", "Cairo", None), member("a", "Cairo", None)]);
        let result = service.find_matches(&FindMatchesRequest::new("req", 0)).await;
        assert!(result.is_err());

        let service = build_service(vec![
            member("req", "Cairo", Some(complete_preferences())),
            member("a", "Cairo", None),
        ]);
        let response = service
            .find_matches(&FindMatchesRequest::new("req", 0))
            .await
            .unwrap();
        assert!(response.matches.is_empty());
    }

    #[tokio::test]
    async fn test_find_matches_excludes_requested_ids() {
        let service = build_service(vec![
            member("req", "Cairo", Some(complete_preferences())),
            member("a", "Cairo", None),
            member("b", "Cairo", None),
            member("c", "Giza", None),
        ]);

        let mut request = FindMatchesRequest::new("req", 10);
        request.exclude_user_ids = vec!["a".to_string()];
        let response = service.find_matches(&request).await.unwrap();

        let ids: Vec<&str> = response.matches.iter().map(|m| m.user_id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);
        assert_eq!(response.total_candidates, 1);
    }

    #[tokio::test]
    async fn test_missing_limit_uses_configured_default() {
        let settings = MatchingSettings {
            default_limit: 2,
            ..MatchingSettings::default()
        };
        let mut members = vec![member("req", "Cairo", Some(complete_preferences()))];
        members.extend((0..5).map(|i| member(&format!("m{}", i), "Cairo", None)));
        let directory = Arc::new(InMemoryDirectory::with_members(true, members));
        let service = MatchService::new(directory, Matcher::with_default_weights(), settings);

        let response = service.find_matches(&FindMatchesRequest::for_user("req")).await.unwrap();
        assert_eq!(response.matches.len(), 2);

        let response = service.find_matches(&FindMatchesRequest::new("req", 4)).await.unwrap();
        assert_eq!(response.matches.len(), 4);
    }

    #[tokio::test]
    async fn test_invalid_request_rejected() {
        let service = build_service(vec![]);
        let err = service
            .find_matches(&FindMatchesRequest::new("", 10))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.status_code(), 400);
    }
}
