//! @acp:module "Tool Scoring"
//! @acp:summary "Weighted multi-dimensional utility for catalog tools"
//! @acp:domain recommend
//! @acp:layer logic

use super::types::*;

/// Price floor for utility-per-dollar; free tools divide by this
pub const PRICE_FLOOR: f64 = 1.0;

/// Calculate weighted tool score
///
/// Iterates the weight keys, not the tool's fields: a dimension the mapping
/// leaves out contributes nothing. Rounded to 3 decimals.
pub fn score(tool: &Tool, weights: &WeightMapping) -> f64 {
    let total: f64 = weights
        .iter()
        .map(|(key, mult)| tool.field_for_key(key) * mult)
        .sum();
    round_to(total, 3)
}

/// Score with a category boost applied, rounded to 3 decimals
pub fn boosted_score(tool: &Tool, weights: &WeightMapping, boost: f64) -> f64 {
    round_to(score(tool, weights) * boost, 3)
}

/// Calculate value per dollar for ranking
pub fn utility_per_dollar(score: f64, price: f64) -> f64 {
    score / price.max(PRICE_FLOOR)
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
