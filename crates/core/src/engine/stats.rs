use crate::domain::listing::ListingRecord;
use crate::engine::matcher::MatchSet;
use crate::engine::tier::{preferred_tier, Tier};
use serde::Serialize;

/// Mean and extrema of nightly rates within one tier. Present only when the
/// tier has at least one record; an empty tier carries no summary rather than
/// zeros, so a missing price can never be mistaken for a real floor of 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierStats {
    pub count: usize,
    #[serde(flatten)]
    pub summary: Option<PriceSummary>,
}

/// Per-tier summary statistics for one request. Aggregation keeps full f64
/// precision; rounding to the currency's minor unit happens only at display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceStatistics {
    pub exact: TierStats,
    pub relaxed: TierStats,
}

impl PriceStatistics {
    pub fn tier(&self, tier: Tier) -> &TierStats {
        match tier {
            Tier::Exact => &self.exact,
            Tier::Relaxed => &self.relaxed,
        }
    }

    /// Preferred non-empty tier under the shared selection policy.
    pub fn preferred_tier(&self) -> Option<Tier> {
        preferred_tier(self.exact.count, self.relaxed.count)
    }
}

/// Compute summary statistics for both tiers. Pure and deterministic.
pub fn aggregate(matches: &MatchSet) -> PriceStatistics {
    PriceStatistics {
        exact: tier_stats(&matches.exact),
        relaxed: tier_stats(&matches.relaxed),
    }
}

fn tier_stats(records: &[ListingRecord]) -> TierStats {
    if records.is_empty() {
        return TierStats {
            count: 0,
            summary: None,
        };
    }

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for record in records {
        sum += record.nightly_rate;
        min = min.min(record.nightly_rate);
        max = max.max(record.nightly_rate);
    }

    TierStats {
        count: records.len(),
        summary: Some(PriceSummary {
            mean: sum / records.len() as f64,
            min,
            max,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(rate: f64) -> ListingRecord {
        ListingRecord {
            location: "London".to_string(),
            property_type: "Flat".to_string(),
            bedrooms: 2,
            nightly_rate: rate,
            has_parking: false,
            has_wifi: true,
            pet_friendly: false,
        }
    }

    #[test]
    fn empty_tier_has_zero_count_and_no_summary() {
        let matches = MatchSet {
            exact: Vec::new(),
            relaxed: Vec::new(),
        };
        let stats = aggregate(&matches);
        assert_eq!(stats.exact.count, 0);
        assert!(stats.exact.summary.is_none());
        assert_eq!(stats.relaxed.count, 0);
        assert!(stats.relaxed.summary.is_none());
        assert!(stats.preferred_tier().is_none());
    }

    #[test]
    fn computes_mean_min_max_per_tier() {
        let matches = MatchSet {
            exact: vec![record(140.0), record(150.0), record(160.0), record(130.0), record(145.0)],
            relaxed: vec![record(100.0), record(110.0), record(90.0)],
        };
        let stats = aggregate(&matches);

        let exact = stats.exact.summary.unwrap();
        assert_eq!(stats.exact.count, 5);
        assert_eq!(exact.mean, 145.0);
        assert_eq!(exact.min, 130.0);
        assert_eq!(exact.max, 160.0);

        let relaxed = stats.relaxed.summary.unwrap();
        assert_eq!(stats.relaxed.count, 3);
        assert_eq!(relaxed.mean, 100.0);
        assert_eq!(relaxed.min, 90.0);
        assert_eq!(relaxed.max, 110.0);
    }

    #[test]
    fn single_record_tier_has_degenerate_range() {
        let matches = MatchSet {
            exact: vec![record(120.0)],
            relaxed: vec![record(120.0)],
        };
        let stats = aggregate(&matches);
        let exact = stats.exact.summary.unwrap();
        assert_eq!(exact.mean, 120.0);
        assert_eq!(exact.min, 120.0);
        assert_eq!(exact.max, 120.0);
    }

    #[test]
    fn empty_tier_serializes_without_price_fields() {
        let stats = tier_stats(&[]);
        let value = serde_json::to_value(stats).unwrap();
        assert_eq!(value["count"], 0);
        assert!(value.get("mean").is_none());
    }
}
