use crate::core::factors::{
    age_compatible, budget_compatible, city_matches, gender_matches, habit_compatible,
    noise_tolerance_compatible, sleep_schedule_compatible, social_level_compatible,
};
use crate::models::{
    Factor, MatchBreakdown, Member, ScoringWeights, Tolerance, UserPreferences, UserProfile,
};

/// Evaluate every factor for one candidate.
///
/// `requester_prefs` must already have passed requester validation; a
/// required field that is somehow absent scores its factor as false.
/// Missing candidate fields are neutral and score their factor as true.
pub fn evaluate_breakdown(
    requester: &UserProfile,
    requester_prefs: &UserPreferences,
    candidate: &Member,
) -> MatchBreakdown {
    let profile = &candidate.profile;
    let candidate_prefs = candidate.preferences.as_ref();

    let city_match = requester_prefs
        .target_city
        .as_deref()
        .is_some_and(|city| city_matches(city, &profile.city));

    let age_compatible = requester_prefs.age_range.as_ref().is_some_and(|range| {
        age_compatible(
            requester.age,
            range,
            profile.age,
            candidate_prefs.and_then(|p| p.age_range.as_ref()),
        )
    });

    let budget_compatible = requester_prefs.budget_range.as_ref().is_some_and(|range| {
        budget_compatible(range, candidate_prefs.and_then(|p| p.budget_range.as_ref()))
    });

    let smoking_habit = candidate_prefs.map_or(Tolerance::NoPreference, |p| p.smoking);
    let pets_habit = candidate_prefs.map_or(Tolerance::NoPreference, |p| p.pets);

    MatchBreakdown {
        city_match,
        age_compatible,
        budget_compatible,
        gender_match: gender_matches(requester_prefs.gender, profile.gender),
        smoking_compatible: habit_compatible(requester_prefs.smoking, smoking_habit),
        pets_compatible: habit_compatible(requester_prefs.pets, pets_habit),
        sleep_schedule_match: sleep_schedule_compatible(
            requester_prefs.sleep_schedule,
            candidate_prefs.and_then(|p| p.sleep_schedule),
        ),
        social_level_match: social_level_compatible(
            requester_prefs.social_level,
            candidate_prefs.and_then(|p| p.social_level),
        ),
        noise_tolerance_match: noise_tolerance_compatible(
            requester_prefs.noise_tolerance,
            candidate_prefs.and_then(|p| p.noise_tolerance),
        ),
    }
}

/// Sum of the weights of every true factor
#[inline]
pub fn raw_score(breakdown: &MatchBreakdown, weights: &ScoringWeights) -> u32 {
    Factor::ALL
        .iter()
        .filter(|factor| breakdown.get(**factor))
        .fold(0u32, |total, factor| total.saturating_add(weights.weight(*factor)))
}

/// Normalize a raw score to 0-100, rounding half up
#[inline]
pub fn percentage(raw: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let (raw, max) = (raw as u64, max as u64);
    ((raw * 100 + max / 2) / max).min(100) as u8
}

/// Calculate the raw score, percentage and breakdown for one candidate
pub fn calculate_match_score(
    requester: &UserProfile,
    requester_prefs: &UserPreferences,
    candidate: &Member,
    weights: &ScoringWeights,
) -> (u32, u8, MatchBreakdown) {
    let breakdown = evaluate_breakdown(requester, requester_prefs, candidate);
    let raw = raw_score(&breakdown, weights);
    (raw, percentage(raw, weights.max_score()), breakdown)
}
