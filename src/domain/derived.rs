//! Derived-field calculator: pure functions computing `final_fare` and
//! `days_travelled` from raw inputs.
//!
//! Parse failures never block data entry: a malformed date yields a day count
//! of 1 (and a null stored date) instead of an error.

use chrono::NaiveDate;

/// Parse an ISO-8601 date from form or stored text. Failure yields `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Number of calendar days covered by a trip, inclusive of both endpoints.
///
/// A one-way trip (no return date) counts as 1 day. A return date earlier
/// than the departure is floored at 1 rather than going negative.
pub fn days_travelled(departure: NaiveDate, return_date: Option<NaiveDate>) -> i64 {
    match return_date {
        None => 1,
        Some(ret) => ((ret - departure).num_days() + 1).max(1),
    }
}

/// Lenient wrapper over raw form text: any parse failure yields 1.
pub fn days_travelled_raw(departure: &str, return_date: Option<&str>) -> i64 {
    let Some(dep) = parse_date(departure) else {
        return 1;
    };
    match return_date {
        None => 1,
        Some(raw) => match parse_date(raw) {
            Some(ret) => days_travelled(dep, Some(ret)),
            None => 1,
        },
    }
}

/// Total fare: ticket price plus change fees. No rounding is applied.
pub fn final_fare(airfare_ticket: f64, change_fare: f64) -> f64 {
    airfare_ticket + change_fare
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn one_way_trip_is_one_day() {
        assert_eq!(days_travelled(date("2024-06-10"), None), 1);
    }

    #[test]
    fn round_trip_counts_both_endpoints() {
        assert_eq!(
            days_travelled(date("2024-03-01"), Some(date("2024-03-04"))),
            4
        );
        assert_eq!(
            days_travelled(date("2024-03-01"), Some(date("2024-03-01"))),
            1
        );
    }

    #[test]
    fn day_count_never_drops_below_one() {
        // Return before departure should floor at 1, not go negative.
        assert_eq!(
            days_travelled(date("2024-03-10"), Some(date("2024-03-01"))),
            1
        );
    }

    #[test]
    fn day_count_spans_month_and_year_boundaries() {
        assert_eq!(
            days_travelled(date("2024-12-30"), Some(date("2025-01-02"))),
            4
        );
    }

    #[test]
    fn malformed_dates_yield_one_day() {
        assert_eq!(days_travelled_raw("not a date", Some("2024-03-04")), 1);
        assert_eq!(days_travelled_raw("2024-03-01", Some("04/03/2024")), 1);
        assert_eq!(days_travelled_raw("", None), 1);
    }

    #[test]
    fn raw_wrapper_matches_typed_computation() {
        assert_eq!(days_travelled_raw("2024-03-01", Some("2024-03-04")), 4);
        assert_eq!(days_travelled_raw("2024-06-10", None), 1);
    }

    #[test]
    fn final_fare_is_exact_sum() {
        assert_eq!(final_fare(500.0, 50.0), 550.0);
        assert_eq!(final_fare(0.0, 0.0), 0.0);
        assert_eq!(final_fare(123.45, 0.55), 124.0);
    }

    #[test]
    fn parse_date_rejects_non_iso_input() {
        assert_eq!(parse_date("2024-03-01"), Some(date("2024-03-01")));
        assert_eq!(parse_date(" 2024-03-01 "), Some(date("2024-03-01")));
        assert_eq!(parse_date("01/03/2024"), None);
        assert_eq!(parse_date("None"), None);
        assert_eq!(parse_date(""), None);
    }
}
