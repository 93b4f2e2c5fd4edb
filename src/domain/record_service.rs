//! Record service: orchestrates the derived-field calculator and the
//! repository for the entry form and the editor grid.

use anyhow::Result;
use tracing::info;

use crate::domain::derived::{days_travelled, final_fare, parse_date};
use crate::domain::models::{
    NewTravelRecord, Position, TravelClass, TravelRecord, TravelRecordDraft, TravelRecordEdit,
    TripType,
};
use crate::storage::{DbConnection, TravelRecordRepository, TravelRecordUpdate};

/// Service wrapping record creation, listing and bulk editing.
#[derive(Clone)]
pub struct RecordService {
    repository: TravelRecordRepository,
}

impl RecordService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            repository: TravelRecordRepository::new(db),
        }
    }

    /// Create a record from raw form values. Derived fields are computed
    /// here; malformed dates coerce to null with a day count of 1 so data
    /// entry is never blocked.
    pub async fn create_record(&self, input: NewTravelRecord) -> Result<i64> {
        let draft = draft_from_input(&input);
        let id = self.repository.create(&draft).await?;
        info!("created travel record {} ({} days)", id, draft.days_travelled);
        Ok(id)
    }

    /// Every record, most recent first.
    pub async fn list_records(&self) -> Result<Vec<TravelRecord>> {
        self.repository.list_all().await
    }

    /// Apply a batch of edits. `final_fare` and `days_travelled` are
    /// re-derived from the edited raw inputs; manual overrides of derived
    /// fields are not accepted. Returns the number of rows submitted.
    pub async fn bulk_update(&self, edits: Vec<TravelRecordEdit>) -> Result<usize> {
        let updates: Vec<TravelRecordUpdate> = edits
            .iter()
            .map(|edit| TravelRecordUpdate {
                id: edit.id,
                draft: draft_from_input(&edit.fields),
            })
            .collect();

        self.repository.bulk_update(&updates).await?;
        Ok(updates.len())
    }
}

fn draft_from_input(input: &NewTravelRecord) -> TravelRecordDraft {
    let departure_date = parse_date(&input.departure_date);
    let return_date = input.return_date.as_deref().and_then(parse_date);
    let days = departure_date
        .map(|dep| days_travelled(dep, return_date))
        .unwrap_or(1);

    TravelRecordDraft {
        traveler: input.traveler.clone(),
        position: Position::parse(&input.position),
        ta: input.ta.clone(),
        project: input.project.clone(),
        fund: input.fund.clone(),
        activity: input.activity.clone(),
        budget_line: input.budget_line.clone(),
        airfare_ticket: input.airfare_ticket,
        change_fare: input.change_fare,
        final_fare: final_fare(input.airfare_ticket, input.change_fare),
        airplus_invoice: input.airplus_invoice.clone(),
        eticket_number: input.eticket_number.clone(),
        itinerary: input.itinerary.clone(),
        departure_date,
        return_date,
        travel_class: TravelClass::parse(&input.travel_class),
        trip_type: TripType::parse(&input.trip_type),
        co2_tons: input.co2_tons,
        days_travelled: days,
        booked_by: input.booked_by.clone(),
        remarks: input.remarks.clone(),
    }
}
