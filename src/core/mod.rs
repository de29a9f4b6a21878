// Core algorithm exports
pub mod factors;
pub mod matcher;
pub mod scoring;
pub mod validation;

pub use matcher::Matcher;
pub use scoring::{calculate_match_score, evaluate_breakdown, percentage, raw_score};
pub use validation::{validate_ranges, validate_requester};
