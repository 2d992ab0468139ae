/// Ceiling used when no consumption limit is configured (percent of a
/// category's reference servings).
pub const DEFAULT_MAX_CONSUMPTION_PERCENT: f64 = 100.0;

/// Environment variable holding the configured ceiling.
pub const MAX_CONSUMPTION_ENV: &str = "MAX_INGREDIENT_CONSUMPTION";

/// Fuzzy match score needed before an ingredient name is suggested.
pub const NAME_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum suggestions offered for one fuzzy lookup.
pub const MAX_NAME_SUGGESTIONS: usize = 5;
