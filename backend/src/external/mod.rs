//! External API integrations

pub mod google_sheets;
pub mod service_account;

pub use google_sheets::GoogleSheetsStore;
