//! Storage layer: SQLite connection management and the travel record
//! repository.

pub mod connection;
pub mod record_repository;

pub use connection::DbConnection;
pub use record_repository::{TravelRecordRepository, TravelRecordUpdate};
