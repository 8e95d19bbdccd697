use crate::config::Settings;
use crate::domain::recommendation::AiRecommendation;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::json;
use crate::llm::{LlmClient, Provider, RefineInput};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 1000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_anthropic_api_key()?.to_string();
        let base_url =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = std::env::var("ANTHROPIC_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let timeout_secs = std::env::var("ANTHROPIC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
            max_tokens,
        })
    }

    async fn create_message(
        &self,
        req: CreateMessageRequest,
    ) -> anyhow::Result<CreateMessageResponse> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(&self.api_key)?);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .post(url)
            .headers(headers)
            .json(&req)
            .send()
            .await
            .context("Anthropic request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Anthropic response body")?;
        if !status.is_success() {
            return Err(LlmDiagnosticsError {
                provider: Provider::Anthropic,
                stage: "http",
                detail: format!("status={status}"),
                raw_output: Some(text),
            }
            .into());
        }

        serde_json::from_str::<CreateMessageResponse>(&text)
            .with_context(|| format!("failed to decode Anthropic response: {text}"))
    }

    fn system_prompt() -> String {
        [
            "You are a revenue management expert for holiday rental properties.",
            "Respond with ONLY a JSON object, no other text. Do not wrap it in markdown.",
            "The object must have exactly these keys:",
            "{",
            "    \"recommended_price\": <number>,",
            "    \"positioning\": \"<budget|mid-range|premium>\",",
            "    \"reasoning\": \"<2-3 sentences explaining the recommendation>\",",
            "    \"tips\": [\"<tip 1>\", \"<tip 2>\", \"<tip 3>\"]",
            "}",
            "Rules:",
            "- recommended_price is a specific nightly rate in GBP",
            "- positioning must be exactly one of: budget, mid-range, premium",
            "- tips must contain 2 or 3 short actionable strings",
        ]
        .join("\n")
    }

    fn user_prompt(input: &RefineInput) -> String {
        let property = &input.property;
        let yes_no = |flag: bool| if flag { "Yes" } else { "No" };

        let mut lines = vec![
            "PROPERTY DETAILS:".to_string(),
            format!("- Location: {}", property.location),
            format!("- Type: {}", property.property_type),
            format!("- Bedrooms: {}", property.bedrooms),
            format!("- Parking: {}", yes_no(property.has_parking)),
            format!("- WiFi: {}", yes_no(property.has_wifi)),
            format!("- Pet Friendly: {}", yes_no(property.pet_friendly)),
            String::new(),
            "MARKET DATA:".to_string(),
            format!(
                "- Exact competitor matches found: {}",
                input.stats.exact.count
            ),
            format!("- Similar properties found: {}", input.stats.relaxed.count),
        ];

        // Never print a placeholder for a statistic that is absent.
        if let Some(exact) = input.stats.exact.summary {
            lines.push(format!("- Average price (exact matches): £{:.2}", exact.mean));
            lines.push(format!(
                "- Price range (exact matches): £{:.2} - £{:.2}",
                exact.min, exact.max
            ));
        } else if let Some(relaxed) = input.stats.relaxed.summary {
            lines.push(format!("- Average price (similar): £{:.2}", relaxed.mean));
            lines.push(format!(
                "- Price range (similar): £{:.2} - £{:.2}",
                relaxed.min, relaxed.max
            ));
        }

        lines.push(String::new());
        lines.push("BASELINE RECOMMENDATION:".to_string());
        if let Some(price) = input.base.price {
            lines.push(format!("- Suggested price: £{price:.2}"));
        }
        lines.push(format!("- Confidence: {:?}", input.base.confidence));

        lines.push(String::new());
        lines.push("Please provide:".to_string());
        lines.push("1. A refined pricing recommendation (a specific nightly rate)".to_string());
        lines.push("2. Strategic reasoning (why this price makes sense)".to_string());
        lines.push("3. Competitive positioning (budget/mid-range/premium and why)".to_string());
        lines.push("4. 2-3 actionable tips to maximize revenue".to_string());

        lines.join("\n")
    }

    fn response_text(res: &CreateMessageResponse) -> String {
        let mut out = String::new();
        for block in &res.content {
            match block {
                ContentBlock::Text { text } => {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(text);
                }
                ContentBlock::Unknown => {
                    // Ignore non-text blocks.
                }
            }
        }
        out
    }
}

#[async_trait::async_trait]
impl LlmClient for AnthropicClient {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    /// Single-shot call: one request, no retry. The transport timeout is the
    /// only backstop against a slow provider.
    async fn refine_pricing(&self, input: &RefineInput) -> anyhow::Result<AiRecommendation> {
        let req = CreateMessageRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: Some(Self::system_prompt()),
            messages: vec![Message {
                role: "user",
                content: Self::user_prompt(input),
            }],
        };

        let res = self.create_message(req).await?;
        let text = Self::response_text(&res);

        json::parse_advice(&text).map_err(|err| {
            LlmDiagnosticsError {
                provider: Provider::Anthropic,
                stage: "parse",
                detail: format!("{err:#}"),
                raw_output: Some(text),
            }
            .into()
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct CreateMessageRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(other)]
    Unknown,
}
