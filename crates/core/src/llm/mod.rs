pub mod anthropic;
pub mod error;
pub mod json;

use crate::config::Settings;
use crate::domain::listing::TargetProperty;
use crate::domain::recommendation::{AiRecommendation, BaseRecommendation};
use crate::engine::stats::PriceStatistics;

/// Context handed to the refiner: the target property plus the analysis the
/// deterministic engine already produced for it.
#[derive(Debug, Clone)]
pub struct RefineInput {
    pub property: TargetProperty,
    pub stats: PriceStatistics,
    pub base: BaseRecommendation,
}

#[derive(Debug, Clone, Copy)]
pub enum Provider {
    Anthropic,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    async fn refine_pricing(&self, input: &RefineInput) -> anyhow::Result<AiRecommendation>;
}

/// Best-effort refinement. A missing credential, transport failure, or
/// malformed reply all collapse to `None`; the cause is logged and the base
/// recommendation stays usable. This never raises to the caller.
pub async fn refine(settings: &Settings, input: &RefineInput) -> Option<AiRecommendation> {
    if !settings.has_anthropic_api_key() {
        tracing::debug!("ANTHROPIC_API_KEY not configured; skipping AI refinement");
        return None;
    }

    let client = match anthropic::AnthropicClient::from_settings(settings) {
        Ok(client) => client,
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "failed to build LLM client; AI insights unavailable");
            return None;
        }
    };

    match client.refine_pricing(input).await {
        Ok(advice) => Some(advice),
        Err(err) => {
            tracing::warn!(
                provider = ?client.provider(),
                error = %format!("{err:#}"),
                "AI refinement failed; continuing with base recommendation"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recommendation::Confidence;
    use crate::engine::stats::TierStats;

    fn input() -> RefineInput {
        RefineInput {
            property: TargetProperty {
                location: "London".to_string(),
                property_type: "Flat".to_string(),
                bedrooms: 2,
                has_parking: false,
                has_wifi: true,
                pet_friendly: false,
            },
            stats: PriceStatistics {
                exact: TierStats {
                    count: 0,
                    summary: None,
                },
                relaxed: TierStats {
                    count: 0,
                    summary: None,
                },
            },
            base: BaseRecommendation {
                price: None,
                confidence: Confidence::Low,
                reasoning: "Insufficient competitor data".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn refine_is_absent_without_credential() {
        let settings = Settings {
            anthropic_api_key: None,
            competitor_data_path: None,
            sentry_dsn: None,
        };
        assert!(refine(&settings, &input()).await.is_none());
    }

    #[tokio::test]
    async fn refine_treats_blank_credential_as_missing() {
        let settings = Settings {
            anthropic_api_key: Some("   ".to_string()),
            competitor_data_path: None,
            sentry_dsn: None,
        };
        assert!(refine(&settings, &input()).await.is_none());
    }

    #[tokio::test]
    async fn refine_is_absent_on_transport_failure() {
        // Port 9 (discard) has no listener; the request fails at connect
        // time, which must degrade to None rather than an error.
        std::env::set_var("ANTHROPIC_BASE_URL", "http://127.0.0.1:9");
        let settings = Settings {
            anthropic_api_key: Some("test-key".to_string()),
            competitor_data_path: None,
            sentry_dsn: None,
        };
        let result = refine(&settings, &input()).await;
        std::env::remove_var("ANTHROPIC_BASE_URL");
        assert!(result.is_none());
    }
}
