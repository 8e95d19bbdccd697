pub mod domain;
pub mod engine;
pub mod llm;
pub mod store;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_DATA_PATH: &str = "data/competitors.csv";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub anthropic_api_key: Option<String>,
        pub competitor_data_path: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
                competitor_data_path: std::env::var("COMPETITOR_DATA_PATH").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        /// The AI credential is optional; its absence is a normal, handled
        /// condition rather than a startup failure.
        pub fn has_anthropic_api_key(&self) -> bool {
            self.anthropic_api_key
                .as_deref()
                .is_some_and(|k| !k.trim().is_empty())
        }

        pub fn require_anthropic_api_key(&self) -> anyhow::Result<&str> {
            self.anthropic_api_key
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .context("ANTHROPIC_API_KEY is required")
        }

        pub fn data_path(&self) -> &str {
            self.competitor_data_path
                .as_deref()
                .unwrap_or(DEFAULT_DATA_PATH)
        }
    }
}
