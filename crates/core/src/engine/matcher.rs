use crate::domain::listing::{ListingRecord, TargetProperty};
use crate::engine::tier::{preferred_tier, Tier};
use crate::store::CompetitorStore;

/// The two competitor subsets relevant to a target property, in store order.
/// Every exact match also satisfies the relaxed predicate, so `exact` is a
/// subset of `relaxed` by construction.
#[derive(Debug, Clone)]
pub struct MatchSet {
    pub exact: Vec<ListingRecord>,
    pub relaxed: Vec<ListingRecord>,
}

impl MatchSet {
    pub fn records(&self, tier: Tier) -> &[ListingRecord] {
        match tier {
            Tier::Exact => &self.exact,
            Tier::Relaxed => &self.relaxed,
        }
    }

    /// The preferred non-empty tier and its records, if any tier has data.
    pub fn preferred(&self) -> Option<(Tier, &[ListingRecord])> {
        preferred_tier(self.exact.len(), self.relaxed.len())
            .map(|tier| (tier, self.records(tier)))
    }
}

/// Select both match tiers for the target. Never fails; an empty store yields
/// two empty sets. The relaxed tier deliberately ignores property type,
/// treating all types within a location and bedroom count as substitutable.
pub fn match_listings(store: &CompetitorStore, target: &TargetProperty) -> MatchSet {
    let relaxed: Vec<ListingRecord> = store
        .records()
        .iter()
        .filter(|r| r.location == target.location && r.bedrooms == target.bedrooms)
        .cloned()
        .collect();

    let exact: Vec<ListingRecord> = relaxed
        .iter()
        .filter(|r| r.property_type == target.property_type)
        .cloned()
        .collect();

    MatchSet { exact, relaxed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(location: &str, property_type: &str, bedrooms: u32, rate: f64) -> ListingRecord {
        ListingRecord {
            location: location.to_string(),
            property_type: property_type.to_string(),
            bedrooms,
            nightly_rate: rate,
            has_parking: false,
            has_wifi: true,
            pet_friendly: false,
        }
    }

    fn target(location: &str, property_type: &str, bedrooms: u32) -> TargetProperty {
        TargetProperty {
            location: location.to_string(),
            property_type: property_type.to_string(),
            bedrooms,
            has_parking: false,
            has_wifi: true,
            pet_friendly: false,
        }
    }

    #[test]
    fn exact_is_subset_of_relaxed() {
        let store = CompetitorStore::from_records(vec![
            record("London", "Flat", 2, 140.0),
            record("London", "House", 2, 180.0),
            record("London", "Flat", 3, 200.0),
            record("Edinburgh", "Flat", 2, 95.0),
        ]);
        let matches = match_listings(&store, &target("London", "Flat", 2));

        assert_eq!(matches.exact.len(), 1);
        assert_eq!(matches.relaxed.len(), 2);
        for exact in &matches.exact {
            assert!(matches.relaxed.contains(exact));
        }
    }

    #[test]
    fn relaxed_ignores_property_type_only() {
        let store = CompetitorStore::from_records(vec![
            record("Edinburgh", "House", 3, 100.0),
            record("Edinburgh", "Flat", 3, 110.0),
            record("Edinburgh", "House", 2, 90.0),
            record("Cornwall", "Cottage", 3, 130.0),
        ]);
        let matches = match_listings(&store, &target("Edinburgh", "Cottage", 3));

        assert!(matches.exact.is_empty());
        assert_eq!(matches.relaxed.len(), 2);
    }

    #[test]
    fn empty_store_yields_two_empty_sets() {
        let store = CompetitorStore::from_records(Vec::new());
        let matches = match_listings(&store, &target("London", "Flat", 2));
        assert!(matches.exact.is_empty());
        assert!(matches.relaxed.is_empty());
        assert!(matches.preferred().is_none());
    }

    #[test]
    fn preserves_store_order() {
        let store = CompetitorStore::from_records(vec![
            record("London", "Flat", 2, 140.0),
            record("London", "Flat", 2, 130.0),
            record("London", "Flat", 2, 150.0),
        ]);
        let matches = match_listings(&store, &target("London", "Flat", 2));
        let rates: Vec<f64> = matches.exact.iter().map(|r| r.nightly_rate).collect();
        assert_eq!(rates, vec![140.0, 130.0, 150.0]);
    }

    #[test]
    fn duplicates_are_distinct_properties() {
        let store = CompetitorStore::from_records(vec![
            record("London", "Flat", 2, 140.0),
            record("London", "Flat", 2, 140.0),
        ]);
        let matches = match_listings(&store, &target("London", "Flat", 2));
        assert_eq!(matches.exact.len(), 2);
    }
}
