//! Shared types and models for the Inventory Tracker
//!
//! This crate contains types shared between the backend, the browser UI
//! (via WASM), and other components of the system.

pub mod batch;
pub mod models;
pub mod schema;
pub mod types;
pub mod validation;

pub use batch::*;
pub use models::*;
pub use schema::*;
pub use types::*;
pub use validation::*;
