use serde::{Deserialize, Serialize};

/// Match specificity level. `Exact` agrees with the target on location,
/// property type, and bedroom count; `Relaxed` on location and bedrooms only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Exact,
    Relaxed,
}

/// The single tier-selection policy shared by the base recommender and the
/// comparison formatter: prefer exact matches, fall back to relaxed, and
/// select nothing when both tiers are empty.
pub fn preferred_tier(exact_count: usize, relaxed_count: usize) -> Option<Tier> {
    if exact_count > 0 {
        Some(Tier::Exact)
    } else if relaxed_count > 0 {
        Some(Tier::Relaxed)
    } else {
        None
    }
}
