use crate::domain::listing::ListingRecord;
use anyhow::Context;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;
use std::path::Path;

/// Read-only collection of comparable listings. Loaded once by the caller and
/// passed by reference into the engine; nothing mutates it afterwards, so it
/// is safe to share across any number of concurrent requests.
#[derive(Debug, Clone)]
pub struct CompetitorStore {
    records: Vec<ListingRecord>,
}

/// Dataset-wide quick statistics for the summary panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub total_properties: usize,
    pub mean_nightly_rate: Option<f64>,
    pub locations: usize,
}

impl CompetitorStore {
    pub fn from_records(records: Vec<ListingRecord>) -> Self {
        Self { records }
    }

    /// Load the competitor dataset from a CSV file. A missing or malformed
    /// file is the `DataUnavailable` condition: the error is returned to the
    /// caller and no recommendation can be computed.
    pub fn load_csv(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open competitor dataset at {}", path.display()))?;
        Self::read_csv(file)
            .with_context(|| format!("failed to read competitor dataset at {}", path.display()))
    }

    pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();
        for (idx, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
            // Header is row 1; data starts at row 2.
            let line = idx + 2;
            let row = row.with_context(|| format!("invalid competitor row at line {line}"))?;
            records.push(
                row.into_record()
                    .with_context(|| format!("invalid competitor row at line {line}"))?,
            );
        }
        Ok(Self { records })
    }

    /// All records in file insertion order.
    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> StoreSummary {
        let mean_nightly_rate = if self.records.is_empty() {
            None
        } else {
            let sum: f64 = self.records.iter().map(|r| r.nightly_rate).sum();
            Some(sum / self.records.len() as f64)
        };
        let locations = self
            .records
            .iter()
            .map(|r| r.location.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len();

        StoreSummary {
            total_properties: self.records.len(),
            mean_nightly_rate,
            locations,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    location: String,
    property_type: String,
    bedrooms: u32,
    nightly_rate: f64,
    #[serde(deserialize_with = "flexible_bool")]
    has_parking: bool,
    #[serde(deserialize_with = "flexible_bool")]
    has_wifi: bool,
    #[serde(deserialize_with = "flexible_bool")]
    pet_friendly: bool,
}

impl CsvRow {
    fn into_record(self) -> anyhow::Result<ListingRecord> {
        let location = self.location.trim().to_string();
        anyhow::ensure!(!location.is_empty(), "location must be non-empty");

        let property_type = self.property_type.trim().to_string();
        anyhow::ensure!(!property_type.is_empty(), "property_type must be non-empty");

        anyhow::ensure!(self.bedrooms >= 1, "bedrooms must be >= 1");
        anyhow::ensure!(
            self.nightly_rate.is_finite() && self.nightly_rate >= 0.0,
            "nightly_rate must be a non-negative number (got {})",
            self.nightly_rate
        );

        Ok(ListingRecord {
            location,
            property_type,
            bedrooms: self.bedrooms,
            nightly_rate: self.nightly_rate,
            has_parking: self.has_parking,
            has_wifi: self.has_wifi,
            pet_friendly: self.pet_friendly,
        })
    }
}

/// Datasets exported from pandas spell booleans `True`/`False`; accept those
/// alongside the usual lowercase and numeric forms.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean value: {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "location,property_type,bedrooms,nightly_rate,has_parking,has_wifi,pet_friendly\n";

    #[test]
    fn reads_pandas_style_booleans() {
        let csv = format!("{HEADER}London,Flat,2,145.0,True,True,False\n");
        let store = CompetitorStore::read_csv(csv.as_bytes()).unwrap();
        assert_eq!(store.len(), 1);
        let record = &store.records()[0];
        assert!(record.has_parking);
        assert!(record.has_wifi);
        assert!(!record.pet_friendly);
    }

    #[test]
    fn reads_lowercase_and_numeric_booleans() {
        let csv = format!("{HEADER}Cornwall,Cottage,3,120.5,false,1,no\n");
        let store = CompetitorStore::read_csv(csv.as_bytes()).unwrap();
        let record = &store.records()[0];
        assert!(!record.has_parking);
        assert!(record.has_wifi);
        assert!(!record.pet_friendly);
    }

    #[test]
    fn missing_file_is_data_unavailable() {
        let err = CompetitorStore::load_csv(Path::new("/nonexistent/competitors.csv"))
            .err()
            .unwrap();
        assert!(err.to_string().contains("competitor dataset"));
    }

    #[test]
    fn rejects_unknown_boolean() {
        let csv = format!("{HEADER}London,Flat,2,145.0,maybe,True,False\n");
        assert!(CompetitorStore::read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn rejects_zero_bedrooms_and_negative_rate() {
        let csv = format!("{HEADER}London,Flat,0,145.0,True,True,False\n");
        assert!(CompetitorStore::read_csv(csv.as_bytes()).is_err());

        let csv = format!("{HEADER}London,Flat,2,-5.0,True,True,False\n");
        assert!(CompetitorStore::read_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn preserves_file_order() {
        let csv = format!(
            "{HEADER}London,Flat,2,140.0,True,True,False\nLondon,House,2,180.0,False,True,True\n"
        );
        let store = CompetitorStore::read_csv(csv.as_bytes()).unwrap();
        assert_eq!(store.records()[0].property_type, "Flat");
        assert_eq!(store.records()[1].property_type, "House");
    }

    #[test]
    fn summary_over_empty_store_has_no_mean() {
        let store = CompetitorStore::from_records(Vec::new());
        assert!(store.is_empty());
        let summary = store.summary();
        assert_eq!(summary.total_properties, 0);
        assert_eq!(summary.mean_nightly_rate, None);
        assert_eq!(summary.locations, 0);
    }

    #[test]
    fn summary_counts_distinct_locations() {
        let csv = format!(
            "{HEADER}London,Flat,2,100.0,True,True,False\n\
             London,House,3,200.0,True,True,False\n\
             Cornwall,Cottage,1,120.0,False,True,True\n"
        );
        let store = CompetitorStore::read_csv(csv.as_bytes()).unwrap();
        let summary = store.summary();
        assert_eq!(summary.total_properties, 3);
        assert_eq!(summary.mean_nightly_rate, Some(140.0));
        assert_eq!(summary.locations, 2);
    }
}
