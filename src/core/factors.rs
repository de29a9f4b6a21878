use crate::models::{
    AgeRange, BudgetRange, Gender, GenderPreference, NoiseTolerance, SleepSchedule, SocialLevel,
    Tolerance,
};

/// City names compare case-insensitively, ignoring surrounding whitespace
#[inline]
pub fn city_matches(target_city: &str, candidate_city: &str) -> bool {
    target_city.trim().to_lowercase() == candidate_city.trim().to_lowercase()
}

/// Age compatibility is checked in both directions.
///
/// The candidate must fall in the requester's range and, when the candidate
/// declared a range of their own, the requester must fall in it too.
#[inline]
pub fn age_compatible(
    requester_age: u8,
    requester_range: &AgeRange,
    candidate_age: u8,
    candidate_range: Option<&AgeRange>,
) -> bool {
    if !requester_range.contains(candidate_age) {
        return false;
    }
    candidate_range.map_or(true, |range| range.contains(requester_age))
}

/// Budget ranges are compatible when they overlap; an undeclared candidate
/// budget is neutral.
#[inline]
pub fn budget_compatible(requester: &BudgetRange, candidate: Option<&BudgetRange>) -> bool {
    candidate.map_or(true, |range| requester.overlaps(range))
}

#[inline]
pub fn gender_matches(preference: GenderPreference, candidate_gender: Gender) -> bool {
    preference.accepts(candidate_gender)
}

/// Smoking and pets share the same rule: the requester's tolerance has to
/// agree with the candidate's declared habit.
#[inline]
pub fn habit_compatible(tolerance: Tolerance, habit: Tolerance) -> bool {
    match (tolerance, habit) {
        (Tolerance::NoPreference, _) | (_, Tolerance::NoPreference) => true,
        (tolerance, habit) => tolerance == habit,
    }
}

#[inline]
pub fn sleep_schedule_compatible(a: Option<SleepSchedule>, b: Option<SleepSchedule>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a == b || a == SleepSchedule::Flexible || b == SleepSchedule::Flexible
        }
        _ => true,
    }
}

#[inline]
pub fn social_level_compatible(a: Option<SocialLevel>, b: Option<SocialLevel>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b || a == SocialLevel::Balanced || b == SocialLevel::Balanced,
        _ => true,
    }
}

/// Equal or adjacent noise tolerance is compatible; low against high is not
#[inline]
pub fn noise_tolerance_compatible(a: Option<NoiseTolerance>, b: Option<NoiseTolerance>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.rank().abs_diff(b.rank()) <= 1,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_case_insensitive() {
        assert!(city_matches("Cairo", "cairo"));
        assert!(city_matches(" CAIRO ", "Cairo"));
        assert!(city_matches("Zürich", "ZÜRICH"));
        assert!(!city_matches("Cairo", "Giza"));
    }

    #[test]
    fn test_age_bidirectional() {
        let requester_range = AgeRange::new(25, 35);
        let candidate_range = AgeRange::new(20, 26);

        // Requester accepts the candidate but the candidate's range excludes the requester
        assert!(!age_compatible(30, &requester_range, 28, Some(&candidate_range)));
        // Without a declared range only the requester's side counts
        assert!(age_compatible(30, &requester_range, 28, None));
        // Out of the requester's range
        assert!(!age_compatible(30, &requester_range, 40, None));
        // Inclusive bounds
        assert!(age_compatible(30, &requester_range, 35, Some(&AgeRange::new(30, 30))));
    }

    #[test]
    fn test_budget_overlap() {
        let requester = BudgetRange::new(3000, 5000);
        assert!(budget_compatible(&requester, Some(&BudgetRange::new(4500, 6000))));
        assert!(budget_compatible(&requester, Some(&BudgetRange::new(5000, 6000))));
        assert!(!budget_compatible(
            &BudgetRange::new(3000, 4000),
            Some(&BudgetRange::new(4500, 6000))
        ));
        assert!(budget_compatible(&requester, None));
    }

    #[test]
    fn test_gender_preference() {
        assert!(gender_matches(GenderPreference::NoPreference, Gender::Male));
        assert!(gender_matches(GenderPreference::Female, Gender::Female));
        assert!(!gender_matches(GenderPreference::Female, Gender::Male));
    }

    #[test]
    fn test_habit_tolerance() {
        assert!(habit_compatible(Tolerance::Disallow, Tolerance::Disallow));
        assert!(!habit_compatible(Tolerance::Disallow, Tolerance::Allow));
        assert!(habit_compatible(Tolerance::Allow, Tolerance::Allow));
        assert!(!habit_compatible(Tolerance::Allow, Tolerance::Disallow));
        assert!(habit_compatible(Tolerance::NoPreference, Tolerance::Allow));
        assert!(habit_compatible(Tolerance::Disallow, Tolerance::NoPreference));
    }

    #[test]
    fn test_sleep_and_social_flexibility() {
        use SleepSchedule::*;
        assert!(sleep_schedule_compatible(Some(EarlyBird), Some(EarlyBird)));
        assert!(sleep_schedule_compatible(Some(NightOwl), Some(Flexible)));
        assert!(!sleep_schedule_compatible(Some(EarlyBird), Some(NightOwl)));
        assert!(sleep_schedule_compatible(None, Some(NightOwl)));

        assert!(social_level_compatible(Some(SocialLevel::Balanced), Some(SocialLevel::Introvert)));
        assert!(!social_level_compatible(Some(SocialLevel::Extrovert), Some(SocialLevel::Introvert)));
    }

    #[test]
    fn test_noise_adjacency() {
        use NoiseTolerance::*;
        assert!(noise_tolerance_compatible(Some(Low), Some(Medium)));
        assert!(noise_tolerance_compatible(Some(High), Some(Medium)));
        assert!(noise_tolerance_compatible(Some(High), Some(High)));
        assert!(!noise_tolerance_compatible(Some(Low), Some(High)));
        assert!(noise_tolerance_compatible(Some(Low), None));
    }
}
