// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AdmissionPolicy, AgeRange, BudgetRange, Factor, Gender, GenderPreference, MatchBreakdown,
    Member, NoiseTolerance, RoommateMatch, ScoringWeights, SleepSchedule, SocialLevel, Tolerance,
    UserPreferences, UserProfile,
};
pub use requests::FindMatchesRequest;
pub use responses::{ErrorResponse, FindMatchesResponse};
