//! Business logic services for the Inventory Tracker

pub mod catalog;
pub mod ingestion;
pub mod reporting;

pub use ingestion::{BatchOutcome, IngestionService};
pub use reporting::ReportingService;
