//! Dashboard filtering and aggregation over records already loaded from the
//! repository.
//!
//! Everything here is a pure reduction over an in-memory slice; an empty
//! input yields zeros and empty groupings rather than an error.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::domain::models::TravelRecord;

/// Month selection for the dashboard: everything, or one `YYYY-MM` bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthFilter {
    All,
    Month(String),
}

/// Summary metrics over the currently filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub record_count: usize,
    pub total_co2_tons: f64,
    /// Sum of `airfare_ticket + change_fare` over the set.
    pub total_spend: f64,
    /// Trip counts per `YYYY-MM` of departure, chronological order. Records
    /// without a parseable departure date are excluded from month groupings.
    pub trips_by_month: Vec<(String, usize)>,
    pub trips_by_position: Vec<(String, usize)>,
    pub trips_by_booked_by: Vec<(String, usize)>,
    /// Top 5 travelers by summed CO2, descending, ties by name ascending.
    pub top_travelers_by_co2: Vec<(String, f64)>,
    /// Top 5 travelers by trip count, descending, ties by name ascending.
    pub top_travelers_by_trips: Vec<(String, usize)>,
    /// Spend per `YYYY-MM` of departure, chronological order.
    pub monthly_spend: Vec<(String, f64)>,
}

/// Service computing dashboard views over loaded records.
#[derive(Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Keep records where any field's string representation contains the
    /// query, case-insensitively. An empty query keeps everything.
    pub fn text_filter(&self, records: &[TravelRecord], query: &str) -> Vec<TravelRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| record_matches(record, &needle))
            .cloned()
            .collect()
    }

    /// Keep records whose departure date falls in the selected month.
    pub fn month_filter(&self, records: &[TravelRecord], filter: &MonthFilter) -> Vec<TravelRecord> {
        match filter {
            MonthFilter::All => records.to_vec(),
            MonthFilter::Month(selected) => records
                .iter()
                .filter(|record| {
                    record
                        .departure_date
                        .map(|date| month_key(date) == *selected)
                        .unwrap_or(false)
                })
                .cloned()
                .collect(),
        }
    }

    /// Distinct departure months present in the set, ascending. Feeds the
    /// month selector next to its "All" sentinel.
    pub fn months_present(&self, records: &[TravelRecord]) -> Vec<String> {
        records
            .iter()
            .filter_map(|record| record.departure_date.map(month_key))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Compute every dashboard aggregation over the filtered set.
    pub fn summarize(&self, records: &[TravelRecord]) -> DashboardSummary {
        let mut trips_by_month: BTreeMap<String, usize> = BTreeMap::new();
        let mut monthly_spend: BTreeMap<String, f64> = BTreeMap::new();
        let mut trips_by_position: BTreeMap<String, usize> = BTreeMap::new();
        let mut trips_by_booked_by: BTreeMap<String, usize> = BTreeMap::new();
        let mut co2_by_traveler: BTreeMap<String, f64> = BTreeMap::new();
        let mut trips_by_traveler: BTreeMap<String, usize> = BTreeMap::new();

        let mut total_co2_tons = 0.0;
        let mut total_spend = 0.0;

        for record in records {
            let spend = record.airfare_ticket + record.change_fare;
            total_co2_tons += record.co2_tons;
            total_spend += spend;

            if let Some(date) = record.departure_date {
                let key = month_key(date);
                *trips_by_month.entry(key.clone()).or_default() += 1;
                *monthly_spend.entry(key).or_default() += spend;
            }

            *trips_by_position
                .entry(record.position.as_str().to_string())
                .or_default() += 1;
            *trips_by_booked_by
                .entry(record.booked_by.clone())
                .or_default() += 1;
            *co2_by_traveler.entry(record.traveler.clone()).or_default() += record.co2_tons;
            *trips_by_traveler.entry(record.traveler.clone()).or_default() += 1;
        }

        DashboardSummary {
            record_count: records.len(),
            total_co2_tons,
            total_spend,
            trips_by_month: trips_by_month.into_iter().collect(),
            trips_by_position: trips_by_position.into_iter().collect(),
            trips_by_booked_by: trips_by_booked_by.into_iter().collect(),
            top_travelers_by_co2: top_five_f64(co2_by_traveler),
            top_travelers_by_trips: top_five_usize(trips_by_traveler),
            monthly_spend: monthly_spend.into_iter().collect(),
        }
    }
}

/// `YYYY-MM` bucket of a date; sorts chronologically as text.
fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn record_matches(record: &TravelRecord, needle: &str) -> bool {
    let Ok(Value::Object(fields)) = serde_json::to_value(record) else {
        return false;
    };
    fields.values().any(|value| {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Null => return false,
            other => other.to_string(),
        };
        text.to_lowercase().contains(needle)
    })
}

fn top_five_f64(totals: BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = totals.into_iter().collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    entries.truncate(5);
    entries
}

fn top_five_usize(totals: BTreeMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = totals.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(5);
    entries
}
