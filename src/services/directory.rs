use crate::core::factors::city_matches;
use crate::models::Member;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur when reading from a user directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Directory unavailable: {0}")]
    Unavailable(String),
}

/// Source of members and candidate pools.
///
/// Implementations own persistence and pre-filtering; the matcher only ever
/// sees the members they hand back.
#[allow(async_fn_in_trait)]
pub trait UserDirectory {
    /// Fetch a single member with their preferences
    async fn find_member(&self, user_id: &str) -> Result<Member, DirectoryError>;

    /// Fetch up to `max` candidates for `requester`, skipping `exclude_ids`.
    ///
    /// The cap is applied before any scoring, so when more than `max` members
    /// qualify the matcher only ranks the slice the directory chose to return.
    /// `InMemoryDirectory` returns the first `max` by ascending `user_id`;
    /// callers page past them with `exclude_ids`.
    async fn candidate_pool(
        &self,
        requester: &Member,
        exclude_ids: &[String],
        max: usize,
    ) -> Result<Vec<Member>, DirectoryError>;
}

/// Directory kept entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    members: RwLock<HashMap<String, Member>>,
    city_prefilter: bool,
}

impl InMemoryDirectory {
    pub fn new(city_prefilter: bool) -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
            city_prefilter,
        }
    }

    pub fn with_members(city_prefilter: bool, members: impl IntoIterator<Item = Member>) -> Self {
        let members = members
            .into_iter()
            .map(|member| (member.user_id().to_string(), member))
            .collect();
        Self {
            members: RwLock::new(members),
            city_prefilter,
        }
    }

    /// Insert or replace a member
    pub async fn upsert(&self, member: Member) {
        let mut members = self.members.write().await;
        members.insert(member.user_id().to_string(), member);
    }

    pub async fn remove(&self, user_id: &str) -> Option<Member> {
        self.members.write().await.remove(user_id)
    }

    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}

impl UserDirectory for InMemoryDirectory {
    async fn find_member(&self, user_id: &str) -> Result<Member, DirectoryError> {
        self.members
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(user_id.to_string()))
    }

    async fn candidate_pool(
        &self,
        requester: &Member,
        exclude_ids: &[String],
        max: usize,
    ) -> Result<Vec<Member>, DirectoryError> {
        let target_city = if self.city_prefilter {
            requester
                .preferences
                .as_ref()
                .and_then(|prefs| prefs.target_city.as_deref())
        } else {
            None
        };

        let members = self.members.read().await;
        let mut pool: Vec<Member> = members
            .values()
            .filter(|member| member.user_id() != requester.user_id())
            .filter(|member| !exclude_ids.iter().any(|id| id == member.user_id()))
            .filter(|member| target_city.map_or(true, |city| city_matches(city, &member.profile.city)))
            .cloned()
            .collect();
        drop(members);

        pool.sort_by(|a, b| a.profile.user_id.cmp(&b.profile.user_id));
        pool.truncate(max);

        tracing::debug!("Directory returned {} candidates for {}", pool.len(), requester.user_id());
        Ok(pool)
    }
}
