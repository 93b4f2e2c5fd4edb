use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use travel_tracker::initialize_backend;

const DATABASE_URL: &str = "sqlite:travel_records.db";
const BACKUP_DIR: &str = "backups";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let state = initialize_backend(DATABASE_URL, BACKUP_DIR).await?;

    let records = state.record_service.list_records().await?;
    let summary = state.dashboard_service.summarize(&records);
    info!(
        "tracking {} trips, {:.1} tons CO2, {:.2} total spend across {} months",
        summary.record_count,
        summary.total_co2_tons,
        summary.total_spend,
        summary.trips_by_month.len()
    );

    Ok(())
}
