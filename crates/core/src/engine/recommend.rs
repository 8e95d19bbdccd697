use crate::domain::recommendation::{BaseRecommendation, Confidence};
use crate::engine::stats::PriceStatistics;
use crate::engine::tier::Tier;

/// Deterministic rule engine over the aggregated statistics. Total function:
/// no data is a valid outcome (absent price, Low confidence), never an error.
pub fn recommend(stats: &PriceStatistics) -> BaseRecommendation {
    match stats.preferred_tier() {
        Some(Tier::Exact) => BaseRecommendation {
            price: stats.exact.summary.map(|s| s.mean),
            confidence: Confidence::High,
            reasoning: format!("Based on {} similar properties", stats.exact.count),
        },
        Some(Tier::Relaxed) => BaseRecommendation {
            price: stats.relaxed.summary.map(|s| s.mean),
            confidence: Confidence::Medium,
            reasoning: format!("Based on {} properties in same area", stats.relaxed.count),
        },
        None => BaseRecommendation {
            price: None,
            confidence: Confidence::Low,
            reasoning: "Insufficient competitor data".to_string(),
        },
    }
}
