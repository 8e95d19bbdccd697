use serde::{Deserialize, Serialize};

/// Coarse indicator of how much matching data backed a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Deterministic recommendation derived from competitor statistics alone.
/// `price` is absent when neither match tier had any data; callers must check
/// it before refinement or display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecommendation {
    pub price: Option<f64>,
    pub confidence: Confidence,
    pub reasoning: String,
}

/// Market segment assigned by the LLM to the refined price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Positioning {
    Budget,
    MidRange,
    Premium,
}

impl Positioning {
    /// Case-insensitive parse of the three wire literals.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Some(Self::Budget),
            "mid-range" => Some(Self::MidRange),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::MidRange => "mid-range",
            Self::Premium => "premium",
        }
    }
}

/// Validated refinement produced from the LLM reply. Either fully populated
/// or not produced at all; there is no partially-filled variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub recommended_price: f64,
    pub positioning: Positioning,
    pub reasoning: String,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    Competitor,
    #[serde(rename = "Your Property")]
    YourProperty,
}

/// One flat row of the price-comparison table consumed by chart renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    #[serde(rename = "Property")]
    pub property: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Type")]
    pub kind: RowKind,
    #[serde(rename = "Details")]
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positioning_parse_is_case_insensitive() {
        assert_eq!(Positioning::parse("Premium"), Some(Positioning::Premium));
        assert_eq!(Positioning::parse("MID-RANGE"), Some(Positioning::MidRange));
        assert_eq!(Positioning::parse("  budget "), Some(Positioning::Budget));
        assert_eq!(Positioning::parse("luxury"), None);
        assert_eq!(Positioning::parse("midrange"), None);
    }

    #[test]
    fn positioning_serializes_to_wire_literals() {
        let json = serde_json::to_string(&Positioning::MidRange).unwrap();
        assert_eq!(json, "\"mid-range\"");
    }

    #[test]
    fn comparison_row_uses_display_column_names() {
        let row = ComparisonRow {
            property: "Flat (2BR)".to_string(),
            price: 145.0,
            kind: RowKind::Competitor,
            details: "London".to_string(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["Property"], "Flat (2BR)");
        assert_eq!(value["Type"], "Competitor");
        assert_eq!(value["Details"], "London");
    }
}
