//! Daily startup backup: a checked file-existence side effect, not a
//! scheduled task.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::domain::export_service::ExportService;
use crate::domain::models::TravelRecord;

/// Writes at most one full-table export per calendar day into the backups
/// directory, never overwriting an existing file.
#[derive(Clone)]
pub struct BackupService {
    backup_dir: PathBuf,
    export_service: ExportService,
}

impl BackupService {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
            export_service: ExportService::new(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Backup filename for a given calendar day.
    pub fn backup_filename(date: NaiveDate) -> String {
        format!("travel_records_{}.xlsx", date.format("%Y-%m-%d"))
    }

    /// Run the startup backup for today. Returns the written path, or `None`
    /// when today's backup already exists.
    pub fn run_daily_backup(&self, records: &[TravelRecord]) -> Result<Option<PathBuf>> {
        self.run_backup_for(Local::now().date_naive(), records)
    }

    /// Idempotent per calendar day: if the dated file already exists it is
    /// left untouched.
    pub fn run_backup_for(
        &self,
        date: NaiveDate,
        records: &[TravelRecord],
    ) -> Result<Option<PathBuf>> {
        let path = self.backup_dir.join(Self::backup_filename(date));
        if path.exists() {
            info!("backup for {} already present, skipping", date);
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir)?;
        let bytes = self.export_service.encode(records)?;
        fs::write(&path, bytes)?;
        info!("wrote daily backup of {} records to {:?}", records.len(), path);
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Position, TravelClass, TripType};
    use chrono::{TimeZone, Utc};

    fn record(id: i64) -> TravelRecord {
        TravelRecord {
            id,
            traveler: "Alice".to_string(),
            position: Position::Staff,
            ta: "".to_string(),
            project: "".to_string(),
            fund: "".to_string(),
            activity: "".to_string(),
            budget_line: "".to_string(),
            airfare_ticket: 100.0,
            change_fare: 0.0,
            final_fare: 100.0,
            airplus_invoice: "".to_string(),
            eticket_number: "".to_string(),
            itinerary: "".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            return_date: None,
            travel_class: TravelClass::Economy,
            trip_type: TripType::Domestic,
            co2_tons: 0.1,
            days_travelled: 1,
            booked_by: "ops".to_string(),
            remarks: "".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn first_backup_of_the_day_is_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = BackupService::new(dir.path().join("backups"));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let path = service
            .run_backup_for(date, &[record(1)])
            .expect("backup")
            .expect("should write a file");
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with("travel_records_2024-03-01.xlsx"));
    }

    #[test]
    fn second_backup_same_day_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = BackupService::new(dir.path());
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let path = service
            .run_backup_for(date, &[record(1)])
            .expect("backup")
            .expect("first run writes");
        let original = fs::read(&path).expect("read backup");

        let second = service
            .run_backup_for(date, &[record(1), record(2)])
            .expect("backup");
        assert!(second.is_none());

        // The existing file was not overwritten.
        assert_eq!(fs::read(&path).expect("read backup"), original);
    }

    #[test]
    fn different_days_get_separate_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let service = BackupService::new(dir.path());

        let first = service
            .run_backup_for(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), &[record(1)])
            .expect("backup");
        let second = service
            .run_backup_for(NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(), &[record(1)])
            .expect("backup");

        assert!(first.is_some());
        assert!(second.is_some());
        assert_ne!(first, second);
    }
}
