use crate::domain::listing::TargetProperty;
use crate::domain::recommendation::{ComparisonRow, RowKind};
use crate::engine::matcher::MatchSet;

// Cap keeps the comparison chart readable on the dashboard.
const MAX_COMPETITOR_ROWS: usize = 10;

/// Flatten the preferred match tier plus the candidate price into chart rows:
/// up to 10 competitor rows in store order, then exactly one "Your Property"
/// row. With no competitors in either tier there is nothing to compare
/// against, so the result is empty (no target row either).
pub fn prepare_comparison(
    matches: &MatchSet,
    candidate_price: f64,
    target: &TargetProperty,
) -> Vec<ComparisonRow> {
    let Some((_, competitors)) = matches.preferred() else {
        return Vec::new();
    };

    let mut rows: Vec<ComparisonRow> = competitors
        .iter()
        .take(MAX_COMPETITOR_ROWS)
        .map(|record| ComparisonRow {
            property: format!("{} ({}BR)", record.property_type, record.bedrooms),
            price: record.nightly_rate,
            kind: RowKind::Competitor,
            details: record.location.clone(),
        })
        .collect();

    rows.push(ComparisonRow {
        property: format!("YOUR {} ({}BR)", target.property_type, target.bedrooms),
        price: candidate_price,
        kind: RowKind::YourProperty,
        details: target.location.clone(),
    });

    rows
}
