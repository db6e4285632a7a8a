//! Ingestion service: appends inward and PO entries and mirrors each one
//! into the transaction history sheet
//!
//! Entry and mirror are two separate appends. If the process dies between
//! them the entry has no history row; nothing here tries to repair that.

use chrono::{Local, NaiveDateTime};
use serde_json::Value;
use shared::{
    coerce_quantity, field_text, first_missing_field, format_timestamp, FieldError, InwardEntry,
    InwardItem, PoEntry, SheetKind, SheetRecord, TransactionRecord,
};

use crate::error::AppResult;
use crate::store::{SharedStore, StoreError};

/// Required PO fields, checked in this order
pub const PO_REQUIRED_FIELDS: [&str; 4] = ["itemName", "quantity", "unit", "customerName"];

/// Ingestion service for recording stock movements
#[derive(Clone)]
pub struct IngestionService {
    store: SharedStore,
}

/// Per-batch result, logged but not returned to the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub written: usize,
    pub failed: usize,
}

impl IngestionService {
    /// Create a new IngestionService instance
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Record an inward batch stamped with the current local time
    pub async fn record_inward(&self, items: Vec<InwardItem>) -> AppResult<BatchOutcome> {
        self.record_inward_at(items, Local::now().naive_local()).await
    }

    /// Record an inward batch; every item shares the timestamp `at`.
    ///
    /// Fails only if the Inward sheet cannot be reached. Items are appended
    /// one by one; a failed item is logged and skipped, earlier items stay.
    pub async fn record_inward_at(
        &self,
        items: Vec<InwardItem>,
        at: NaiveDateTime,
    ) -> AppResult<BatchOutcome> {
        self.store.ensure_sheet(SheetKind::Inward).await?;

        let timestamp = format_timestamp(at);
        let history_ready = self.ensure_history().await;
        let mut outcome = BatchOutcome::default();

        for item in items {
            let entry = InwardEntry {
                timestamp: timestamp.clone(),
                item_name: item.full_text,
                quantity: item.quantity,
                unit: item.unit,
            };

            if let Err(e) = self.store.append_row(SheetKind::Inward, entry.to_row()).await {
                tracing::error!("Failed to record inward item {:?}: {}", entry.item_name, e);
                outcome.failed += 1;
                continue;
            }
            outcome.written += 1;

            if history_ready {
                self.mirror(TransactionRecord::from(&entry)).await;
            }
        }

        if outcome.failed > 0 {
            tracing::warn!(
                "Inward batch at {} partially recorded: {} written, {} failed",
                timestamp,
                outcome.written,
                outcome.failed
            );
        } else {
            tracing::info!("Inward batch at {} recorded: {} items", timestamp, outcome.written);
        }

        Ok(outcome)
    }

    /// Record a PO entry stamped with the current local time
    pub async fn record_po_entry(&self, body: &Value) -> AppResult<PoEntry> {
        self.record_po_entry_at(body, Local::now().naive_local()).await
    }

    /// Validate and record one PO entry.
    ///
    /// Nothing is written when validation fails. A failed PO append fails the
    /// call; a failed history mirror is only logged.
    pub async fn record_po_entry_at(&self, body: &Value, at: NaiveDateTime) -> AppResult<PoEntry> {
        if let Some(field) = first_missing_field(body, &PO_REQUIRED_FIELDS) {
            return Err(FieldError::Required(field).into());
        }
        let quantity = coerce_quantity(&body["quantity"])?;

        self.store.ensure_sheet(SheetKind::Po).await?;

        let entry = PoEntry {
            timestamp: format_timestamp(at),
            item_name: field_text(&body["itemName"]),
            quantity,
            unit: field_text(&body["unit"]),
            customer_name: field_text(&body["customerName"]),
        };

        self.store.append_row(SheetKind::Po, entry.to_row()).await?;

        if self.ensure_history().await {
            self.mirror(TransactionRecord::from(&entry)).await;
        }

        tracing::info!(
            "PO entry recorded: {} x {} {} for {}",
            entry.item_name,
            entry.quantity,
            entry.unit,
            entry.customer_name
        );
        Ok(entry)
    }

    async fn ensure_history(&self) -> bool {
        match self.store.ensure_sheet(SheetKind::TransactionHistory).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Transaction history unavailable, entries will not be mirrored: {}", e);
                false
            }
        }
    }

    async fn mirror(&self, record: TransactionRecord) {
        let result: Result<(), StoreError> = self
            .store
            .append_row(SheetKind::TransactionHistory, record.to_row())
            .await;
        if let Err(e) = result {
            tracing::warn!(
                "{} entry for {:?} at {} has no history row: {}",
                record.transaction_type,
                record.item_name,
                record.timestamp,
                e
            );
        }
    }
}
