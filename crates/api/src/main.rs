use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use letprice_core::config::Settings;
use letprice_core::domain::listing::TargetProperty;
use letprice_core::domain::recommendation::{AiRecommendation, BaseRecommendation, ComparisonRow};
use letprice_core::engine::{self, chart, stats::PriceStatistics};
use letprice_core::llm::{self, RefineInput};
use letprice_core::store::{CompetitorStore, StoreSummary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let data_path = settings.data_path().to_string();
    let store: Option<Arc<CompetitorStore>> = match CompetitorStore::load_csv(Path::new(&data_path))
    {
        Ok(store) => {
            tracing::info!(path = %data_path, records = store.len(), "competitor dataset loaded");
            Some(Arc::new(store))
        }
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(
                path = %data_path,
                error = %format!("{e:#}"),
                "competitor dataset unavailable; starting API in degraded mode"
            );
            None
        }
    };

    let state = AppState {
        store,
        settings: Arc::new(settings),
    };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/dataset", get(get_dataset_summary))
        .route("/analyze", post(post_analyze))
        .route("/refine", post(post_refine))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    store: Option<Arc<CompetitorStore>>,
    settings: Arc<Settings>,
}

fn default_true() -> bool {
    true
}

/// Target property as posted by the dashboard. Amenity defaults mirror the
/// original form: wifi on, parking and pets off.
#[derive(Debug, Clone, Deserialize)]
struct AnalyzeRequest {
    location: String,
    property_type: String,
    bedrooms: u32,
    #[serde(default)]
    has_parking: bool,
    #[serde(default = "default_true")]
    has_wifi: bool,
    #[serde(default)]
    pet_friendly: bool,
}

impl AnalyzeRequest {
    fn into_target(self) -> Result<TargetProperty, StatusCode> {
        let location = self.location.trim().to_string();
        let property_type = self.property_type.trim().to_string();
        if location.is_empty() || property_type.is_empty() || self.bedrooms < 1 {
            return Err(StatusCode::BAD_REQUEST);
        }
        Ok(TargetProperty {
            location,
            property_type,
            bedrooms: self.bedrooms,
            has_parking: self.has_parking,
            has_wifi: self.has_wifi,
            pet_friendly: self.pet_friendly,
        })
    }
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    generated_at: DateTime<Utc>,
    stats: PriceStatistics,
    recommendation: BaseRecommendation,
    comparison: Vec<ComparisonRow>,
}

#[derive(Debug, Serialize)]
struct RefineResponse {
    generated_at: DateTime<Utc>,
    recommendation: BaseRecommendation,
    ai: Option<AiRecommendation>,
}

async fn post_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, StatusCode> {
    let Some(store) = &state.store else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let target = req.into_target()?;
    let analysis = engine::analyze(store, &target);
    let comparison = analysis
        .base
        .price
        .map(|price| chart::prepare_comparison(&analysis.matches, price, &target))
        .unwrap_or_default();

    Ok(Json(AnalyzeResponse {
        generated_at: Utc::now(),
        stats: analysis.stats,
        recommendation: analysis.base,
        comparison,
    }))
}

async fn post_refine(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<RefineResponse>, StatusCode> {
    let Some(store) = &state.store else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let target = req.into_target()?;
    // Recompute rather than trusting client-posted statistics; the engine is
    // cheap and this keeps the endpoint stateless.
    let analysis = engine::analyze(store, &target);

    let input = RefineInput {
        property: target,
        stats: analysis.stats,
        base: analysis.base.clone(),
    };
    // `refine` absorbs missing-credential, transport, and parse failures into
    // None; the response degrades to the base recommendation alone.
    let ai = llm::refine(&state.settings, &input).await;

    Ok(Json(RefineResponse {
        generated_at: Utc::now(),
        recommendation: analysis.base,
        ai,
    }))
}

async fn get_dataset_summary(
    State(state): State<AppState>,
) -> Result<Json<StoreSummary>, StatusCode> {
    let Some(store) = &state.store else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };
    Ok(Json(store.summary()))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
