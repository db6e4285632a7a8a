//! Domain models for the Inventory Tracker

mod catalog;
mod entry;
mod report;

pub use catalog::*;
pub use entry::*;
pub use report::*;
