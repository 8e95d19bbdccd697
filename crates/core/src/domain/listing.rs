use serde::{Deserialize, Serialize};

/// One comparable property from the competitor dataset. Duplicates are valid;
/// two identical rows represent two distinct properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub location: String,
    pub property_type: String,
    pub bedrooms: u32,
    pub nightly_rate: f64,
    pub has_parking: bool,
    pub has_wifi: bool,
    pub pet_friendly: bool,
}

/// The property being priced. Same shape as a listing minus the nightly rate,
/// which is the unknown to be recommended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProperty {
    pub location: String,
    pub property_type: String,
    pub bedrooms: u32,
    pub has_parking: bool,
    pub has_wifi: bool,
    pub pet_friendly: bool,
}
