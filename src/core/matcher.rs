use crate::core::{
    scoring::calculate_match_score,
    validation::{validate_ranges, validate_requester},
};
use crate::error::MatchError;
use crate::models::{AdmissionPolicy, Member, RoommateMatch, ScoringWeights};
use std::cmp::Ordering;

/// Roommate matching pipeline
///
/// # Pipeline Stages
/// 1. Requester validation
/// 2. Self-exclusion and candidate range validation
/// 3. Per-factor scoring
/// 4. Admission gate
/// 5. Ranking and truncation
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    weights: ScoringWeights,
    admission: AdmissionPolicy,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            admission: AdmissionPolicy::default(),
        }
    }

    pub fn with_default_weights() -> Self {
        Self::default()
    }

    pub fn with_admission(mut self, admission: AdmissionPolicy) -> Self {
        self.admission = admission;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn admission(&self) -> &AdmissionPolicy {
        &self.admission
    }

    /// Compute ranked matches for `requester` against a candidate pool.
    ///
    /// The requester must carry complete preferences. Every candidate is
    /// validated before any scoring happens, so a malformed range anywhere in
    /// the pool fails the whole call. With `limit == 0` the candidate
    /// iterator is never pulled.
    pub fn compute_matches<I>(
        &self,
        requester: &Member,
        candidates: I,
        limit: usize,
    ) -> Result<Vec<RoommateMatch>, MatchError>
    where
        I: IntoIterator<Item = Member>,
    {
        let requester_prefs = validate_requester(requester)?;
        let max_score = self.weights.checked_max_score()?;

        if limit == 0 {
            tracing::trace!("Limit is zero, skipping scoring for {}", requester.user_id());
            return Ok(Vec::new());
        }

        let requester_id = requester.user_id();
        let pool: Vec<Member> = candidates
            .into_iter()
            .filter(|candidate| candidate.user_id() != requester_id)
            .collect();

        for candidate in &pool {
            if let Some(prefs) = candidate.preferences.as_ref() {
                validate_ranges(candidate.user_id(), prefs)?;
            }
        }

        let pool_size = pool.len();

        let mut matches: Vec<RoommateMatch> = pool
            .into_iter()
            .filter_map(|candidate| {
                let (score, percentage, breakdown) = calculate_match_score(
                    &requester.profile,
                    requester_prefs,
                    &candidate,
                    &self.weights,
                );

                if !self.admission.admits(&breakdown, percentage) {
                    tracing::trace!("Candidate {} not admitted ({}%)", candidate.user_id(), percentage);
                    return None;
                }

                let profile = candidate.profile;
                Some(RoommateMatch {
                    user_id: profile.user_id,
                    name: profile.name,
                    city: profile.city,
                    age: profile.age,
                    photo_url: profile.photo_url,
                    gender: profile.gender,
                    score,
                    percentage,
                    breakdown,
                })
            })
            .collect();

        matches.sort_by(rank_order);
        matches.truncate(limit);

        tracing::debug!(
            "Ranked {} of {} candidates for {} (max score {})",
            matches.len(),
            pool_size,
            requester_id,
            max_score
        );

        Ok(matches)
    }
}

/// Percentage descending, then raw score descending, then user id ascending
fn rank_order(a: &RoommateMatch, b: &RoommateMatch) -> Ordering {
    b.percentage
        .cmp(&a.percentage)
        .then_with(|| b.score.cmp(&a.score))
        .then_with(|| a.user_id.cmp(&b.user_id))
}
