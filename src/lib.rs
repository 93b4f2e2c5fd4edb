//! # Travel Tracker Backend
//!
//! Single-user travel expense registration and reporting. The backend is
//! UI-agnostic: the entry form, tabs and charts live elsewhere and call into
//! the services assembled here.
//!
//! Layered architecture:
//! ```text
//! Presentation layer (external)
//!     ↓
//! Domain layer (services, derived-field calculator, aggregation, export)
//!     ↓
//! Storage layer (SQLite repository)
//! ```

pub mod domain;
pub mod storage;

use anyhow::Result;
use tracing::info;

use crate::domain::{BackupService, DashboardService, ExportService, RecordService};
use crate::storage::DbConnection;

/// Application state holding all constructed services. Built once at process
/// start and handed to the presentation layer; no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub record_service: RecordService,
    pub dashboard_service: DashboardService,
    pub export_service: ExportService,
    pub backup_service: BackupService,
}

/// Initialize the backend: open the database once, ensure the schema, build
/// the services, and run the daily startup backup.
pub async fn initialize_backend(database_url: &str, backup_dir: &str) -> Result<AppState> {
    info!("Setting up database");
    let db = DbConnection::new(database_url).await?;

    info!("Setting up domain services");
    let record_service = RecordService::new(db);
    let dashboard_service = DashboardService::new();
    let export_service = ExportService::new();
    let backup_service = BackupService::new(backup_dir);

    info!("Running daily backup check");
    let records = record_service.list_records().await?;
    match backup_service.run_daily_backup(&records)? {
        Some(path) => info!("daily backup written to {:?}", path),
        None => info!("daily backup already present"),
    }

    Ok(AppState {
        record_service,
        dashboard_service,
        export_service,
        backup_service,
    })
}
