pub mod chart;
pub mod matcher;
pub mod recommend;
pub mod stats;
pub mod tier;

use crate::domain::listing::TargetProperty;
use crate::domain::recommendation::BaseRecommendation;
use crate::store::CompetitorStore;

/// Everything one analyze action produces from the competitor snapshot.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub matches: matcher::MatchSet,
    pub stats: stats::PriceStatistics,
    pub base: BaseRecommendation,
}

/// The composed presentation-boundary query: match, aggregate, recommend.
/// Pure and synchronous; the store is only read.
pub fn analyze(store: &CompetitorStore, target: &TargetProperty) -> Analysis {
    let matches = matcher::match_listings(store, target);
    let stats = stats::aggregate(&matches);
    let base = recommend::recommend(&stats);
    Analysis {
        matches,
        stats,
        base,
    }
}
