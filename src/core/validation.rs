use crate::error::MatchError;
use crate::models::{Member, UserPreferences};

/// Check that the requester carries every preference the engine needs.
///
/// Returns the requester's preferences so callers don't unwrap twice.
pub fn validate_requester(requester: &Member) -> Result<&UserPreferences, MatchError> {
    let user_id = requester.user_id();
    let incomplete = |field| MatchError::IncompleteProfile {
        user_id: user_id.to_string(),
        field,
    };

    let preferences = requester.preferences.as_ref().ok_or_else(|| incomplete("preferences"))?;

    match preferences.target_city.as_deref() {
        Some(city) if !city.trim().is_empty() => {}
        _ => return Err(incomplete("targetCity")),
    }
    if preferences.age_range.is_none() {
        return Err(incomplete("ageRange"));
    }
    if preferences.budget_range.is_none() {
        return Err(incomplete("budgetRange"));
    }

    validate_ranges(user_id, preferences)?;
    Ok(preferences)
}

/// Reject min/max pairs where min exceeds max
pub fn validate_ranges(user_id: &str, preferences: &UserPreferences) -> Result<(), MatchError> {
    if let Some(range) = preferences.age_range {
        if range.min > range.max {
            return Err(MatchError::InvalidRange {
                user_id: user_id.to_string(),
                field: "ageRange",
                min: range.min as u32,
                max: range.max as u32,
            });
        }
    }

    if let Some(range) = preferences.budget_range {
        if range.min > range.max {
            return Err(MatchError::InvalidRange {
                user_id: user_id.to_string(),
                field: "budgetRange",
                min: range.min,
                max: range.max,
            });
        }
    }

    Ok(())
}
