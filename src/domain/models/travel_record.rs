//! Domain model for a travel record.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Role of the traveler within the organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Consultant,
    Staff,
    Guest,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::Consultant => "Consultant",
            Position::Staff => "Staff",
            Position::Guest => "Guest",
        }
    }

    /// Lenient coercion from stored or entered text. Unknown values fall back
    /// to `Consultant`, the first option the entry form offers.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "staff" => Position::Staff,
            "guest" => Position::Guest,
            _ => Position::Consultant,
        }
    }
}

/// Booking class of the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelClass {
    Economy,
    Business,
    #[serde(rename = "Train First")]
    TrainFirst,
    #[serde(rename = "Train Second")]
    TrainSecond,
}

impl TravelClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelClass::Economy => "Economy",
            TravelClass::Business => "Business",
            TravelClass::TrainFirst => "Train First",
            TravelClass::TrainSecond => "Train Second",
        }
    }

    /// Lenient coercion; unknown values fall back to `Economy`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "business" => TravelClass::Business,
            "train first" | "train 1st" => TravelClass::TrainFirst,
            "train second" | "train 2nd" => TravelClass::TrainSecond,
            _ => TravelClass::Economy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripType {
    International,
    Domestic,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::International => "International",
            TripType::Domestic => "Domestic",
        }
    }

    /// Lenient coercion; unknown values fall back to `International`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "domestic" => TripType::Domestic,
            _ => TripType::International,
        }
    }
}

/// One logged travel event, as persisted.
///
/// `final_fare` and `days_travelled` are derived fields computed at write
/// time; `created_at` is set once at insert and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelRecord {
    pub id: i64,
    pub traveler: String,
    pub position: Position,
    pub ta: String,
    pub project: String,
    pub fund: String,
    pub activity: String,
    pub budget_line: String,
    pub airfare_ticket: f64,
    pub change_fare: f64,
    pub final_fare: f64,
    pub airplus_invoice: String,
    pub eticket_number: String,
    pub itinerary: String,
    /// Stored as ISO-8601 text; unparseable stored text reads back as `None`.
    pub departure_date: Option<NaiveDate>,
    /// `None` for one-way trips.
    pub return_date: Option<NaiveDate>,
    pub travel_class: TravelClass,
    pub trip_type: TripType,
    pub co2_tons: f64,
    pub days_travelled: i64,
    pub booked_by: String,
    pub remarks: String,
    pub created_at: DateTime<Utc>,
}

/// Every persisted field except `id` and `created_at`, with derived fields
/// already computed. This is what the repository writes, both on insert and
/// on bulk update.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelRecordDraft {
    pub traveler: String,
    pub position: Position,
    pub ta: String,
    pub project: String,
    pub fund: String,
    pub activity: String,
    pub budget_line: String,
    pub airfare_ticket: f64,
    pub change_fare: f64,
    pub final_fare: f64,
    pub airplus_invoice: String,
    pub eticket_number: String,
    pub itinerary: String,
    pub departure_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub travel_class: TravelClass,
    pub trip_type: TripType,
    pub co2_tons: f64,
    pub days_travelled: i64,
    pub booked_by: String,
    pub remarks: String,
}

/// Raw field values as collected by the entry form. Dates arrive as text and
/// are coerced leniently; empty required strings are accepted as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTravelRecord {
    pub traveler: String,
    pub position: String,
    pub ta: String,
    pub project: String,
    pub fund: String,
    pub activity: String,
    pub budget_line: String,
    pub airfare_ticket: f64,
    pub change_fare: f64,
    pub airplus_invoice: String,
    pub eticket_number: String,
    pub itinerary: String,
    pub departure_date: String,
    /// `None` marks a one-way trip.
    pub return_date: Option<String>,
    pub travel_class: String,
    pub trip_type: String,
    pub co2_tons: f64,
    pub booked_by: String,
    pub remarks: String,
}

/// One row of a bulk edit: the target id plus the full set of raw edited
/// values. Unparseable dates are stored as null rather than failing the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelRecordEdit {
    pub id: i64,
    #[serde(flatten)]
    pub fields: NewTravelRecord,
}
