//! Domain models for the travel tracker.

pub mod travel_record;

pub use travel_record::{
    NewTravelRecord, Position, TravelClass, TravelRecord, TravelRecordDraft, TravelRecordEdit,
    TripType,
};
