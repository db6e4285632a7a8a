//! Record store abstraction
//!
//! An append-only set of sheets, one per [`SheetKind`]. Rows are text cells;
//! the first row of every sheet is its header. The store is built once at
//! startup and shared by all handlers through [`crate::AppState`].

use std::sync::Arc;

use async_trait::async_trait;
use shared::SheetKind;
use thiserror::Error;

use crate::config::{StoreBackend, StoreConfig};
use crate::external::GoogleSheetsStore;

mod memory;

pub use memory::MemoryStore;

/// Record store failures. None of these are retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to access {sheet} sheet: {reason}")]
    SheetUnavailable { sheet: SheetKind, reason: String },

    #[error("append to {sheet} failed: {reason}")]
    Append { sheet: SheetKind, reason: String },

    #[error("store request failed: {0}")]
    Request(String),

    #[error("invalid store credentials: {0}")]
    Credentials(String),
}

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Create the sheet with its header row if it does not exist yet
    async fn ensure_sheet(&self, sheet: SheetKind) -> Result<(), StoreError>;

    /// Append one data row at the end of the sheet
    async fn append_row(&self, sheet: SheetKind, row: Vec<String>) -> Result<(), StoreError>;

    /// All rows of the sheet, header first. An absent or blank sheet yields
    /// no rows.
    async fn read_rows(&self, sheet: SheetKind) -> Result<Vec<Vec<String>>, StoreError>;

    /// Short name for health reporting
    fn name(&self) -> &'static str;
}

/// Shared handle to the configured store
pub type SharedStore = Arc<dyn RecordStore>;

/// Build the store selected by configuration
pub fn build_store(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Sheets => Ok(Arc::new(GoogleSheetsStore::from_config(config)?)),
    }
}
