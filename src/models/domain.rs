use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::MatchError;

/// Public profile of a marketplace member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub city: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "photoUrl", default)]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenderPreference {
    Male,
    Female,
    #[default]
    NoPreference,
}

impl GenderPreference {
    pub fn accepts(self, gender: Gender) -> bool {
        match self {
            GenderPreference::NoPreference => true,
            GenderPreference::Male => gender == Gender::Male,
            GenderPreference::Female => gender == Gender::Female,
        }
    }
}

/// Tri-state used for smoking and pets.
///
/// On the requester side this is a tolerance. On the candidate side it is read
/// as the candidate's own habit: `Allow` means they smoke (or keep pets),
/// `Disallow` means they don't, `NoPreference` means nothing was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tolerance {
    #[serde(alias = "yes")]
    Allow,
    #[serde(alias = "no")]
    Disallow,
    #[default]
    NoPreference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SleepSchedule {
    EarlyBird,
    NightOwl,
    Flexible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SocialLevel {
    Introvert,
    Extrovert,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoiseTolerance {
    Low,
    Medium,
    High,
}

impl NoiseTolerance {
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            NoiseTolerance::Low => 0,
            NoiseTolerance::Medium => 1,
            NoiseTolerance::High => 2,
        }
    }
}

/// Inclusive age range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(rename = "minAge")]
    pub min: u8,
    #[serde(rename = "maxAge")]
    pub max: u8,
}

impl AgeRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, age: u8) -> bool {
        age >= self.min && age <= self.max
    }
}

/// Inclusive monthly budget range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetRange {
    #[serde(rename = "minBudget")]
    pub min: u32,
    #[serde(rename = "maxBudget")]
    pub max: u32,
}

impl BudgetRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn overlaps(&self, other: &BudgetRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

/// Roommate preferences declared by a member
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(rename = "targetCity", default)]
    pub target_city: Option<String>,
    #[serde(rename = "ageRange", default)]
    pub age_range: Option<AgeRange>,
    #[serde(rename = "budgetRange", default)]
    pub budget_range: Option<BudgetRange>,
    #[serde(default)]
    pub gender: GenderPreference,
    #[serde(default)]
    pub smoking: Tolerance,
    #[serde(default)]
    pub pets: Tolerance,
    #[serde(rename = "sleepSchedule", default)]
    pub sleep_schedule: Option<SleepSchedule>,
    #[serde(rename = "socialLevel", default)]
    pub social_level: Option<SocialLevel>,
    #[serde(rename = "noiseTolerance", default)]
    pub noise_tolerance: Option<NoiseTolerance>,
}

/// A profile together with the preferences its owner declared, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub profile: UserProfile,
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
}

impl Member {
    pub fn new(profile: UserProfile, preferences: Option<UserPreferences>) -> Self {
        Self { profile, preferences }
    }

    pub fn user_id(&self) -> &str {
        &self.profile.user_id
    }
}

/// Per-factor outcome for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchBreakdown {
    pub city_match: bool,
    pub age_compatible: bool,
    pub budget_compatible: bool,
    pub gender_match: bool,
    pub smoking_compatible: bool,
    pub pets_compatible: bool,
    pub sleep_schedule_match: bool,
    pub social_level_match: bool,
    pub noise_tolerance_match: bool,
}

impl MatchBreakdown {
    pub const FACTOR_COUNT: usize = Factor::ALL.len();

    pub fn get(&self, factor: Factor) -> bool {
        match factor {
            Factor::City => self.city_match,
            Factor::Age => self.age_compatible,
            Factor::Budget => self.budget_compatible,
            Factor::Gender => self.gender_match,
            Factor::Smoking => self.smoking_compatible,
            Factor::Pets => self.pets_compatible,
            Factor::SleepSchedule => self.sleep_schedule_match,
            Factor::SocialLevel => self.social_level_match,
            Factor::NoiseTolerance => self.noise_tolerance_match,
        }
    }

    pub fn set(&mut self, factor: Factor, value: bool) {
        let slot = match factor {
            Factor::City => &mut self.city_match,
            Factor::Age => &mut self.age_compatible,
            Factor::Budget => &mut self.budget_compatible,
            Factor::Gender => &mut self.gender_match,
            Factor::Smoking => &mut self.smoking_compatible,
            Factor::Pets => &mut self.pets_compatible,
            Factor::SleepSchedule => &mut self.sleep_schedule_match,
            Factor::SocialLevel => &mut self.social_level_match,
            Factor::NoiseTolerance => &mut self.noise_tolerance_match,
        };
        *slot = value;
    }

    /// Number of factors that evaluated to true
    pub fn hits(&self) -> usize {
        Factor::ALL.iter().filter(|f| self.get(**f)).count()
    }

    /// City and gender are the hard factors
    pub fn has_hard_factor(&self) -> bool {
        self.city_match || self.gender_match
    }
}

/// A single compatibility dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    City,
    Age,
    Budget,
    Gender,
    Smoking,
    Pets,
    SleepSchedule,
    SocialLevel,
    NoiseTolerance,
}

impl Factor {
    pub const ALL: [Factor; 9] = [
        Factor::City,
        Factor::Age,
        Factor::Budget,
        Factor::Gender,
        Factor::Smoking,
        Factor::Pets,
        Factor::SleepSchedule,
        Factor::SocialLevel,
        Factor::NoiseTolerance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Factor::City => "city",
            Factor::Age => "age",
            Factor::Budget => "budget",
            Factor::Gender => "gender",
            Factor::Smoking => "smoking",
            Factor::Pets => "pets",
            Factor::SleepSchedule => "sleep_schedule",
            Factor::SocialLevel => "social_level",
            Factor::NoiseTolerance => "noise_tolerance",
        }
    }

    pub fn from_name(name: &str) -> Option<Factor> {
        Factor::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Ranked compatibility result for one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoommateMatch {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub city: String,
    pub age: u8,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
    pub gender: Gender,
    pub score: u32,
    pub percentage: u8,
    pub breakdown: MatchBreakdown,
}

/// Integer weight contributed by each factor when it is true
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub city: u32,
    pub age: u32,
    pub budget: u32,
    pub gender: u32,
    pub smoking: u32,
    pub pets: u32,
    pub sleep_schedule: u32,
    pub social_level: u32,
    pub noise_tolerance: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            city: 3,
            age: 2,
            budget: 2,
            gender: 2,
            smoking: 1,
            pets: 1,
            sleep_schedule: 1,
            social_level: 1,
            noise_tolerance: 1,
        }
    }
}

impl ScoringWeights {
    pub fn weight(&self, factor: Factor) -> u32 {
        match factor {
            Factor::City => self.city,
            Factor::Age => self.age,
            Factor::Budget => self.budget,
            Factor::Gender => self.gender,
            Factor::Smoking => self.smoking,
            Factor::Pets => self.pets,
            Factor::SleepSchedule => self.sleep_schedule,
            Factor::SocialLevel => self.social_level,
            Factor::NoiseTolerance => self.noise_tolerance,
        }
    }

    fn weight_mut(&mut self, factor: Factor) -> &mut u32 {
        match factor {
            Factor::City => &mut self.city,
            Factor::Age => &mut self.age,
            Factor::Budget => &mut self.budget,
            Factor::Gender => &mut self.gender,
            Factor::Smoking => &mut self.smoking,
            Factor::Pets => &mut self.pets,
            Factor::SleepSchedule => &mut self.sleep_schedule,
            Factor::SocialLevel => &mut self.social_level,
            Factor::NoiseTolerance => &mut self.noise_tolerance,
        }
    }

    /// Maximum attainable raw score, saturating at `u32::MAX`.
    ///
    /// Use [`ScoringWeights::checked_max_score`] to reject weights whose total
    /// does not fit.
    pub fn max_score(&self) -> u32 {
        Factor::ALL
            .iter()
            .fold(0u32, |total, f| total.saturating_add(self.weight(*f)))
    }

    pub fn checked_max_score(&self) -> Result<u32, MatchError> {
        Factor::ALL
            .iter()
            .try_fold(0u32, |total, f| total.checked_add(self.weight(*f)))
            .ok_or(MatchError::WeightOverflow)
    }

    /// Build weights from a `factor name -> weight` mapping.
    ///
    /// Factors absent from the map keep their default weight.
    pub fn from_map(map: &BTreeMap<String, u32>) -> Result<Self, MatchError> {
        let mut weights = Self::default();
        for (name, value) in map {
            let factor = Factor::from_name(name)
                .ok_or_else(|| MatchError::UnknownFactor(name.clone()))?;
            *weights.weight_mut(factor) = *value;
        }
        weights.checked_max_score()?;
        Ok(weights)
    }
}

/// Optional gate applied after scoring and before ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdmissionPolicy {
    /// Drop candidates whose city and gender factors are both false
    #[serde(default)]
    pub require_hard_factor: bool,
    #[serde(default)]
    pub min_percentage: u8,
}

impl AdmissionPolicy {
    pub fn admits(&self, breakdown: &MatchBreakdown, percentage: u8) -> bool {
        if self.require_hard_factor && !breakdown.has_hard_factor() {
            return false;
        }
        percentage >= self.min_percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_max_score() {
        assert_eq!(ScoringWeights::default().max_score(), 14);
    }

    #[test]
    fn test_weights_from_map_overrides_named_factor() {
        let mut map = BTreeMap::new();
        map.insert("city".to_string(), 5);
        map.insert("noise_tolerance".to_string(), 0);

        let weights = ScoringWeights::from_map(&map).unwrap();
        assert_eq!(weights.city, 5);
        assert_eq!(weights.noise_tolerance, 0);
        assert_eq!(weights.age, 2);
    }

    #[test]
    fn test_weights_from_map_rejects_unknown_factor() {
        let mut map = BTreeMap::new();
        map.insert("hair_color".to_string(), 1);

        let err = ScoringWeights::from_map(&map).unwrap_err();
        assert!(matches!(err, MatchError::UnknownFactor(name) if name == "hair_color"));
    }

    #[test]
    fn test_weights_from_map_rejects_overflowing_total() {
        let mut map = BTreeMap::new();
        map.insert("city".to_string(), 3_000_000_000);
        map.insert("age".to_string(), 2_000_000_000);

        assert_eq!(ScoringWeights::from_map(&map), Err(MatchError::WeightOverflow));
    }

    #[test]
    fn test_max_score_saturates() {
        let weights = ScoringWeights { city: u32::MAX, age: u32::MAX, ..Default::default() };
        assert_eq!(weights.max_score(), u32::MAX);
        assert_eq!(weights.checked_max_score(), Err(MatchError::WeightOverflow));
        assert_eq!(ScoringWeights::default().checked_max_score(), Ok(14));
    }

    #[test]
    fn test_breakdown_set_get_roundtrip_per_factor() {
        let mut breakdown = MatchBreakdown::default();
        for factor in Factor::ALL {
            breakdown.set(factor, true);
            assert!(breakdown.get(factor));
        }
        assert_eq!(breakdown.hits(), MatchBreakdown::FACTOR_COUNT);
    }

    #[test]
    fn test_tolerance_accepts_yes_no_aliases() {
        let yes: Tolerance = serde_json::from_str("\"yes\"").unwrap();
        let no: Tolerance = serde_json::from_str("\"no\"").unwrap();
        assert_eq!(yes, Tolerance::Allow);
        assert_eq!(no, Tolerance::Disallow);
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let parsed = serde_json::from_str::<SleepSchedule>("\"sometimes\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_admission_policy_hard_factor_gate() {
        let policy = AdmissionPolicy { require_hard_factor: true, min_percentage: 0 };
        let mut breakdown = MatchBreakdown::default();
        assert!(!policy.admits(&breakdown, 50));

        breakdown.gender_match = true;
        assert!(policy.admits(&breakdown, 50));
    }
}
