//! Repository for travel record persistence.
//!
//! No server-side validation happens here: empty required strings are stored
//! as-is, and the entry form is trusted to supply sensible values. There is
//! no delete operation; records are never purged.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::info;

use crate::domain::derived::parse_date;
use crate::domain::models::{Position, TravelClass, TravelRecord, TravelRecordDraft, TripType};
use crate::storage::connection::DbConnection;

/// One row of a bulk update: target id plus the full replacement field set.
#[derive(Debug, Clone)]
pub struct TravelRecordUpdate {
    pub id: i64,
    pub draft: TravelRecordDraft,
}

/// Repository for travel record operations.
#[derive(Clone)]
pub struct TravelRecordRepository {
    db: DbConnection,
}

impl TravelRecordRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a new record, assigning `created_at` now, and return its id.
    pub async fn create(&self, draft: &TravelRecordDraft) -> Result<i64> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO travel_records (
                traveler, position, ta, project, fund, activity,
                budget_line, airfare_ticket, change_fare, final_fare,
                airplus_invoice, eticket_number, itinerary,
                departure_date, return_date,
                travel_class, trip_type, co2_tons,
                days_travelled, booked_by, remarks, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&draft.traveler)
        .bind(draft.position.as_str())
        .bind(&draft.ta)
        .bind(&draft.project)
        .bind(&draft.fund)
        .bind(&draft.activity)
        .bind(&draft.budget_line)
        .bind(draft.airfare_ticket)
        .bind(draft.change_fare)
        .bind(draft.final_fare)
        .bind(&draft.airplus_invoice)
        .bind(&draft.eticket_number)
        .bind(&draft.itinerary)
        .bind(draft.departure_date.map(|d| d.to_string()))
        .bind(draft.return_date.map(|d| d.to_string()))
        .bind(draft.travel_class.as_str())
        .bind(draft.trip_type.as_str())
        .bind(draft.co2_tons)
        .bind(draft.days_travelled)
        .bind(&draft.booked_by)
        .bind(&draft.remarks)
        .bind(created_at.to_rfc3339())
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        info!("stored travel record {} for {}", id, draft.traveler);
        Ok(id)
    }

    /// List every record, most recent id first.
    pub async fn list_all(&self) -> Result<Vec<TravelRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, traveler, position, ta, project, fund, activity,
                   budget_line, airfare_ticket, change_fare, final_fare,
                   airplus_invoice, eticket_number, itinerary,
                   departure_date, return_date,
                   travel_class, trip_type, co2_tons,
                   days_travelled, booked_by, remarks, created_at
            FROM travel_records
            ORDER BY id DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(row_to_record).collect())
    }

    /// Overwrite every field except `id` and `created_at` for each row, keyed
    /// by identifier. Rows with unknown ids are silently skipped.
    pub async fn bulk_update(&self, updates: &[TravelRecordUpdate]) -> Result<()> {
        for update in updates {
            let draft = &update.draft;
            sqlx::query(
                r#"
                UPDATE travel_records
                SET traveler = ?, position = ?, ta = ?, project = ?,
                    fund = ?, activity = ?, budget_line = ?,
                    airfare_ticket = ?, change_fare = ?, final_fare = ?,
                    airplus_invoice = ?, eticket_number = ?, itinerary = ?,
                    departure_date = ?, return_date = ?,
                    travel_class = ?, trip_type = ?, co2_tons = ?,
                    days_travelled = ?, booked_by = ?, remarks = ?
                WHERE id = ?
                "#,
            )
            .bind(&draft.traveler)
            .bind(draft.position.as_str())
            .bind(&draft.ta)
            .bind(&draft.project)
            .bind(&draft.fund)
            .bind(&draft.activity)
            .bind(&draft.budget_line)
            .bind(draft.airfare_ticket)
            .bind(draft.change_fare)
            .bind(draft.final_fare)
            .bind(&draft.airplus_invoice)
            .bind(&draft.eticket_number)
            .bind(&draft.itinerary)
            .bind(draft.departure_date.map(|d| d.to_string()))
            .bind(draft.return_date.map(|d| d.to_string()))
            .bind(draft.travel_class.as_str())
            .bind(draft.trip_type.as_str())
            .bind(draft.co2_tons)
            .bind(draft.days_travelled)
            .bind(&draft.booked_by)
            .bind(&draft.remarks)
            .bind(update.id)
            .execute(self.db.pool())
            .await?;
        }

        info!("bulk updated {} travel records", updates.len());
        Ok(())
    }
}

fn row_to_record(row: &SqliteRow) -> TravelRecord {
    // Dates live as ISO-8601 text; anything unparseable reads back as None
    // rather than failing the whole load.
    let departure_date = row
        .get::<Option<String>, _>("departure_date")
        .as_deref()
        .and_then(parse_date);
    let return_date = row
        .get::<Option<String>, _>("return_date")
        .as_deref()
        .and_then(parse_date);
    let created_at = DateTime::parse_from_rfc3339(&row.get::<String, _>("created_at"))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default();

    TravelRecord {
        id: row.get("id"),
        traveler: row.get("traveler"),
        position: Position::parse(row.get("position")),
        ta: row.get("ta"),
        project: row.get("project"),
        fund: row.get("fund"),
        activity: row.get("activity"),
        budget_line: row.get("budget_line"),
        airfare_ticket: row.get("airfare_ticket"),
        change_fare: row.get("change_fare"),
        final_fare: row.get("final_fare"),
        airplus_invoice: row.get("airplus_invoice"),
        eticket_number: row.get("eticket_number"),
        itinerary: row.get("itinerary"),
        departure_date,
        return_date,
        travel_class: TravelClass::parse(row.get("travel_class")),
        trip_type: TripType::parse(row.get("trip_type")),
        co2_tons: row.get("co2_tons"),
        days_travelled: row.get("days_travelled"),
        booked_by: row.get("booked_by"),
        remarks: row.get("remarks"),
        created_at,
    }
}
