use anyhow::Context;
use letprice_core::domain::listing::ListingRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

// Location base rates and property-type multipliers for the synthetic market.
const LOCATIONS: [(&str, f64); 3] = [
    ("London", 150.0),
    ("Edinburgh", 100.0),
    ("Cornwall", 120.0),
];
const PROPERTY_TYPES: [(&str, f64); 3] = [("Flat", 0.9), ("House", 1.1), ("Cottage", 1.0)];
const BEDROOM_COUNTS: [u32; 3] = [1, 2, 3];
const BEDROOM_UPLIFT: f64 = 30.0;
const RATE_JITTER: i32 = 20;

#[derive(Debug, Clone)]
pub struct DatasetOptions {
    /// RNG seed; reruns with the same seed produce the same dataset.
    pub seed: u64,

    /// Listings generated per location/type/bedroom combination.
    pub per_combination: usize,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            seed: 42,
            per_combination: 5,
        }
    }
}

/// Build the deterministic synthetic competitor dataset: every location,
/// property type, and bedroom count combination, priced from the location
/// base rate, the type multiplier, a per-bedroom uplift, and bounded jitter.
/// WiFi is always on; parking and pets are coin flips.
pub fn build_dataset(opts: &DatasetOptions) -> anyhow::Result<Vec<ListingRecord>> {
    anyhow::ensure!(
        opts.per_combination >= 1,
        "per_combination must be >= 1 (got {})",
        opts.per_combination
    );

    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut out =
        Vec::with_capacity(LOCATIONS.len() * PROPERTY_TYPES.len() * BEDROOM_COUNTS.len() * opts.per_combination);

    for (location, base_rate) in LOCATIONS {
        for (property_type, type_multiplier) in PROPERTY_TYPES {
            for bedrooms in BEDROOM_COUNTS {
                for _ in 0..opts.per_combination {
                    let jitter = rng.gen_range(-RATE_JITTER..RATE_JITTER) as f64;
                    let nightly_rate =
                        base_rate * type_multiplier + f64::from(bedrooms) * BEDROOM_UPLIFT + jitter;
                    // Round to pence at generation so the CSV matches what a
                    // listing site would display.
                    let nightly_rate = (nightly_rate * 100.0).round() / 100.0;

                    out.push(ListingRecord {
                        location: location.to_string(),
                        property_type: property_type.to_string(),
                        bedrooms,
                        nightly_rate,
                        has_parking: rng.gen_bool(0.5),
                        has_wifi: true,
                        pet_friendly: rng.gen_bool(0.5),
                    });
                }
            }
        }
    }

    Ok(out)
}

pub fn write_csv(path: &Path, records: &[ListingRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open {} for writing", path.display()))?;
    for record in records {
        writer
            .serialize(record)
            .context("failed to write competitor row")?;
    }
    writer.flush().context("failed to flush competitor CSV")?;
    Ok(())
}
