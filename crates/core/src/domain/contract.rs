use crate::domain::recommendation::{AiRecommendation, Positioning};
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

const MIN_TIPS: usize = 2;
const MAX_TIPS: usize = 3;

/// Raw wire shape of the LLM pricing reply. All four keys are required;
/// `serde_json` rejects a reply that omits any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmPricingAdvice {
    pub recommended_price: f64,
    pub positioning: String,
    pub reasoning: String,
    pub tips: Vec<String>,
}

impl LlmPricingAdvice {
    /// Validate the raw reply against the response contract and convert it
    /// into a domain recommendation. Any violation fails the whole reply;
    /// a partially-valid advice is never produced.
    pub fn validate_and_into_advice(self) -> anyhow::Result<AiRecommendation> {
        ensure!(
            self.recommended_price.is_finite(),
            "recommended_price must be a finite number (got {})",
            self.recommended_price
        );
        ensure!(
            self.recommended_price >= 0.0,
            "recommended_price must be non-negative (got {})",
            self.recommended_price
        );

        let positioning = Positioning::parse(&self.positioning).with_context(|| {
            format!(
                "positioning must be one of budget/mid-range/premium (got {:?})",
                self.positioning
            )
        })?;

        let reasoning = self.reasoning.trim().to_string();
        ensure!(!reasoning.is_empty(), "reasoning must be non-empty");

        ensure!(
            (MIN_TIPS..=MAX_TIPS).contains(&self.tips.len()),
            "tips must contain {MIN_TIPS} to {MAX_TIPS} entries (got {})",
            self.tips.len()
        );
        let mut tips = Vec::with_capacity(self.tips.len());
        for tip in self.tips {
            let tip = tip.trim().to_string();
            ensure!(!tip.is_empty(), "tips entries must be non-empty");
            tips.push(tip);
        }

        Ok(AiRecommendation {
            recommended_price: self.recommended_price,
            positioning,
            reasoning,
            tips,
        })
    }
}
