//! Spreadsheet export: encodes an ordered record set into a single-sheet
//! styled xlsx workbook.

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use rust_xlsxwriter::{Color, Format, Workbook};
use tracing::info;

use crate::domain::models::TravelRecord;

/// MIME type served alongside the encoded workbook.
pub const XLSX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const SHEET_NAME: &str = "Travel Records";

/// Width padding added around the widest cell of each column.
const COLUMN_PADDING: f64 = 2.0;

/// Fixed column order of the exported sheet, matching the data model.
pub const COLUMNS: [&str; 23] = [
    "id",
    "traveler",
    "position",
    "ta",
    "project",
    "fund",
    "activity",
    "budget_line",
    "airfare_ticket",
    "change_fare",
    "final_fare",
    "airplus_invoice",
    "eticket_number",
    "itinerary",
    "departure_date",
    "return_date",
    "travel_class",
    "trip_type",
    "co2_tons",
    "days_travelled",
    "booked_by",
    "remarks",
    "created_at",
];

/// Whether an export covers the full record set or a caller-selected subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    Full,
    Selection,
}

impl ExportScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportScope::Full => "full",
            ExportScope::Selection => "selection",
        }
    }
}

/// Typed cell value, so numbers export as numbers and everything else as
/// text. Also drives column width measurement.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Int(i64),
}

impl Cell {
    /// Textual rendering, used for width measurement and test assertions.
    pub fn text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Int(i) => i.to_string(),
        }
    }
}

/// Exported cells of one record, in [`COLUMNS`] order.
pub fn record_cells(record: &TravelRecord) -> Vec<Cell> {
    vec![
        Cell::Int(record.id),
        Cell::Text(record.traveler.clone()),
        Cell::Text(record.position.as_str().to_string()),
        Cell::Text(record.ta.clone()),
        Cell::Text(record.project.clone()),
        Cell::Text(record.fund.clone()),
        Cell::Text(record.activity.clone()),
        Cell::Text(record.budget_line.clone()),
        Cell::Number(record.airfare_ticket),
        Cell::Number(record.change_fare),
        Cell::Number(record.final_fare),
        Cell::Text(record.airplus_invoice.clone()),
        Cell::Text(record.eticket_number.clone()),
        Cell::Text(record.itinerary.clone()),
        Cell::Text(
            record
                .departure_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ),
        Cell::Text(record.return_date.map(|d| d.to_string()).unwrap_or_default()),
        Cell::Text(record.travel_class.as_str().to_string()),
        Cell::Text(record.trip_type.as_str().to_string()),
        Cell::Number(record.co2_tons),
        Cell::Int(record.days_travelled),
        Cell::Text(record.booked_by.clone()),
        Cell::Text(record.remarks.clone()),
        Cell::Text(record.created_at.to_rfc3339()),
    ]
}

/// Service encoding record sets to downloadable spreadsheets.
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Encode the records into a single-sheet workbook: styled header row,
    /// one row per record, each column sized to its widest cell.
    pub fn encode(&self, records: &[TravelRecord]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x4472C4));

        let mut widths: Vec<f64> = COLUMNS.iter().map(|h| h.len() as f64).collect();

        for (col, header) in COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (row, record) in records.iter().enumerate() {
            for (col, cell) in record_cells(record).iter().enumerate() {
                let width = cell.text().chars().count() as f64;
                if width > widths[col] {
                    widths[col] = width;
                }
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(row as u32 + 1, col as u16, s)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row as u32 + 1, col as u16, *n)?;
                    }
                    Cell::Int(i) => {
                        worksheet.write_number(row as u32 + 1, col as u16, *i as f64)?;
                    }
                }
            }
        }

        for (col, width) in widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, width + COLUMN_PADDING)?;
        }

        let buffer = workbook.save_to_buffer()?;
        info!(
            "encoded {} travel records into {} byte workbook",
            records.len(),
            buffer.len()
        );
        Ok(buffer)
    }

    /// Keep exactly the given ids, in the order they were given. Unknown ids
    /// are silently ignored.
    pub fn select_by_ids(&self, records: &[TravelRecord], ids: &[i64]) -> Vec<TravelRecord> {
        ids.iter()
            .filter_map(|id| records.iter().find(|record| record.id == *id).cloned())
            .collect()
    }

    /// Deterministic download filename for the given scope and timestamp.
    pub fn export_filename(&self, scope: ExportScope, at: NaiveDateTime) -> String {
        format!(
            "travel_records_{}_{}.xlsx",
            scope.as_str(),
            at.format("%Y%m%d_%H%M%S")
        )
    }

    /// Download filename stamped with the current local time.
    pub fn export_filename_now(&self, scope: ExportScope) -> String {
        self.export_filename(scope, Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Position, TravelClass, TripType};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn record(id: i64) -> TravelRecord {
        TravelRecord {
            id,
            traveler: format!("Traveler {id}"),
            position: Position::Consultant,
            ta: "TA-1".to_string(),
            project: "P-1".to_string(),
            fund: "F-1".to_string(),
            activity: "A-1".to_string(),
            budget_line: "BL-1".to_string(),
            airfare_ticket: 500.0,
            change_fare: 50.0,
            final_fare: 550.0,
            airplus_invoice: "INV-1".to_string(),
            eticket_number: "ET-1".to_string(),
            itinerary: "GVA-TUN-GVA".to_string(),
            departure_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            return_date: NaiveDate::from_ymd_opt(2024, 3, 4),
            travel_class: TravelClass::Business,
            trip_type: TripType::International,
            co2_tons: 0.8,
            days_travelled: 4,
            booked_by: "ops".to_string(),
            remarks: "window seat".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn cells_follow_fixed_column_order() {
        let cells = record_cells(&record(7));
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], Cell::Int(7));
        assert_eq!(cells[1].text(), "Traveler 7");
        assert_eq!(cells[8], Cell::Number(500.0));
        assert_eq!(cells[10], Cell::Number(550.0));
        assert_eq!(cells[14].text(), "2024-03-01");
        assert_eq!(cells[15].text(), "2024-03-04");
        assert_eq!(cells[16].text(), "Business");
        assert_eq!(cells[19], Cell::Int(4));
        assert_eq!(cells[22].text(), "2024-03-01T09:30:00+00:00");
    }

    #[test]
    fn one_way_trip_exports_empty_return_date() {
        let mut r = record(1);
        r.return_date = None;
        let cells = record_cells(&r);
        assert_eq!(cells[15].text(), "");
    }

    #[test]
    fn encode_produces_a_zip_container() {
        let service = ExportService::new();
        let bytes = service.encode(&[record(1), record(2)]).expect("encode");
        // xlsx is a zip archive; check the magic bytes.
        assert!(bytes.len() > 4);
        assert_eq!(&bytes[..4], b"PK\x03\x04");
    }

    #[test]
    fn encode_tolerates_an_empty_record_set() {
        let service = ExportService::new();
        let bytes = service.encode(&[]).expect("encode");
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn selection_preserves_given_id_order() {
        let service = ExportService::new();
        let records: Vec<TravelRecord> = (1..=5).map(record).collect();

        let selected = service.select_by_ids(&records, &[2, 5]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].id, 2);
        assert_eq!(selected[1].id, 5);

        let reversed = service.select_by_ids(&records, &[5, 2]);
        assert_eq!(reversed[0].id, 5);
        assert_eq!(reversed[1].id, 2);
    }

    #[test]
    fn selection_ignores_unknown_ids() {
        let service = ExportService::new();
        let records: Vec<TravelRecord> = (1..=3).map(record).collect();
        let selected = service.select_by_ids(&records, &[2, 42]);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].id, 2);
    }

    #[test]
    fn filename_encodes_scope_and_timestamp() {
        let service = ExportService::new();
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap();
        assert_eq!(
            service.export_filename(ExportScope::Full, at),
            "travel_records_full_20240301_093005.xlsx"
        );
        assert_eq!(
            service.export_filename(ExportScope::Selection, at),
            "travel_records_selection_20240301_093005.xlsx"
        );
    }
}
