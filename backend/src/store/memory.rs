//! In-process record store for development runs and tests

use std::collections::HashMap;

use async_trait::async_trait;
use shared::SheetKind;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError};

/// Sheets held in memory, keyed by kind
#[derive(Default)]
pub struct MemoryStore {
    sheets: RwLock<HashMap<SheetKind, Vec<Vec<String>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of data rows (header excluded) in a sheet
    pub async fn data_row_count(&self, sheet: SheetKind) -> usize {
        self.sheets
            .read()
            .await
            .get(&sheet)
            .map(|rows| rows.len().saturating_sub(1))
            .unwrap_or(0)
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn ensure_sheet(&self, sheet: SheetKind) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write().await;
        sheets.entry(sheet).or_insert_with(|| {
            tracing::info!("Created worksheet: {}", sheet);
            vec![sheet.header_row()]
        });
        Ok(())
    }

    async fn append_row(&self, sheet: SheetKind, row: Vec<String>) -> Result<(), StoreError> {
        let mut sheets = self.sheets.write().await;
        match sheets.get_mut(&sheet) {
            Some(rows) => {
                rows.push(row);
                Ok(())
            }
            None => Err(StoreError::Append {
                sheet,
                reason: "sheet does not exist".into(),
            }),
        }
    }

    async fn read_rows(&self, sheet: SheetKind) -> Result<Vec<Vec<String>>, StoreError> {
        Ok(self.sheets.read().await.get(&sheet).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
