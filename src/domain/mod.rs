//! Domain layer: models, derived-field computation, and the services the
//! presentation layer calls into.

pub mod backup_service;
pub mod dashboard_service;
pub mod derived;
pub mod export_service;
pub mod models;
pub mod record_service;

pub use backup_service::BackupService;
pub use dashboard_service::{DashboardService, DashboardSummary, MonthFilter};
pub use export_service::{ExportScope, ExportService, XLSX_MIME};
pub use record_service::RecordService;
