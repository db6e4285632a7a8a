//! HTTP handlers for the Inventory Tracker

pub mod catalog;
pub mod health;
pub mod inward;
pub mod po;
pub mod reporting;

pub use catalog::*;
pub use health::*;
pub use inward::*;
pub use po::*;
pub use reporting::*;
