use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod dataset;

#[derive(Debug, Parser)]
#[command(name = "letprice_worker")]
struct Args {
    /// Output path for the generated competitor dataset.
    #[arg(long)]
    out: Option<PathBuf>,

    /// RNG seed; fixed by default so reruns produce the same dataset.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Listings generated per location/type/bedroom combination.
    #[arg(long, default_value_t = 5)]
    per_combination: usize,

    /// Build the dataset without writing it.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = letprice_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let opts = dataset::DatasetOptions {
        seed: args.seed,
        per_combination: args.per_combination,
    };
    let records = dataset::build_dataset(&opts).context("failed to build competitor dataset")?;

    if args.dry_run {
        tracing::info!(
            dry_run = true,
            seed = args.seed,
            records = records.len(),
            "built competitor dataset (not written)"
        );
        return Ok(());
    }

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(settings.data_path()));
    if let Err(err) = dataset::write_csv(&out, &records) {
        sentry_anyhow::capture_anyhow(&err);
        return Err(err);
    }

    let summary = letprice_core::store::CompetitorStore::from_records(records).summary();
    tracing::info!(
        path = %out.display(),
        records = summary.total_properties,
        locations = summary.locations,
        mean_nightly_rate = summary.mean_nightly_rate,
        "competitor dataset written"
    );

    Ok(())
}

fn init_sentry(settings: &letprice_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
