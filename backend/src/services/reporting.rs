//! Reporting service: PO summary, live stock and chronological listings
//!
//! Every report re-reads the full sheets it depends on. Aggregation itself is
//! done by the pure functions below so it can be tested without a store.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    decode_sheet, parse_timestamp, InwardEntry, LiveStockRow, PoEntry, PoItemQuantity, PoSummary,
    QuantityOverflow, SheetRecord, TransactionRecord,
};

use crate::error::{AppError, AppResult};
use crate::store::SharedStore;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: SharedStore,
}

impl ReportingService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Read and decode every record of one sheet, creating it if needed
    async fn load<T: SheetRecord>(&self) -> AppResult<Vec<T>> {
        self.store.ensure_sheet(T::KIND).await?;
        let rows = self.store.read_rows(T::KIND).await?;
        Ok(decode_sheet(&rows)?)
    }

    /// All PO entries, newest first
    pub async fn po_entries(&self) -> AppResult<Vec<PoEntry>> {
        let mut entries: Vec<PoEntry> = self.load().await?;
        sort_newest_first(&mut entries, |e| e.timestamp.as_str());
        tracing::debug!("Retrieved {} PO entries", entries.len());
        Ok(entries)
    }

    /// PO summary statistics
    pub async fn po_summary(&self) -> AppResult<PoSummary> {
        let entries: Vec<PoEntry> = self.load().await?;
        let summary = summarize_po(&entries)?;
        tracing::debug!(
            "PO summary: {} entries, {} unique items, {} groups",
            summary.total_entries,
            summary.unique_items,
            summary.item_quantities.len()
        );
        Ok(summary)
    }

    /// Unified Inward + PO history, newest first
    pub async fn transaction_history(&self) -> AppResult<Vec<TransactionRecord>> {
        let mut records: Vec<TransactionRecord> = self.load().await?;
        sort_newest_first(&mut records, |r| r.timestamp.as_str());
        tracing::debug!("Retrieved {} transactions", records.len());
        Ok(records)
    }

    /// Inward minus PO per (item, unit), sorted by item name
    pub async fn live_stock(&self) -> AppResult<Vec<LiveStockRow>> {
        let inward: Vec<InwardEntry> = self.load().await?;
        let po: Vec<PoEntry> = self.load().await?;
        let rows = compute_live_stock(&inward, &po)?;
        tracing::debug!("Calculated {} live stock entries", rows.len());
        Ok(rows)
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

/// Group PO entries by (item, unit, customer) in order of first appearance.
/// Fails if a group total leaves the `Decimal` range.
pub fn summarize_po(entries: &[PoEntry]) -> Result<PoSummary, QuantityOverflow> {
    let mut groups: Vec<PoItemQuantity> = Vec::new();
    let mut index: HashMap<(&str, &str, &str), usize> = HashMap::new();

    for entry in entries {
        let key = (
            entry.item_name.as_str(),
            entry.unit.as_str(),
            entry.customer_name.as_str(),
        );
        match index.get(&key) {
            Some(&i) => {
                let group = &mut groups[i];
                group.quantity = group
                    .quantity
                    .checked_add(entry.quantity)
                    .ok_or(QuantityOverflow)?;
            }
            None => {
                index.insert(key, groups.len());
                groups.push(PoItemQuantity {
                    item_name: entry.item_name.clone(),
                    unit: entry.unit.clone(),
                    quantity: entry.quantity,
                    customer_name: entry.customer_name.clone(),
                });
            }
        }
    }

    let unique_items = entries
        .iter()
        .map(|e| e.item_name.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len();

    Ok(PoSummary {
        total_entries: entries.len(),
        unique_items,
        item_quantities: groups,
    })
}

/// Inward and PO totals per (item, unit); keys present on either side appear
/// once with the missing side at zero. Fails if a total leaves the `Decimal`
/// range.
pub fn compute_live_stock(
    inward: &[InwardEntry],
    po: &[PoEntry],
) -> Result<Vec<LiveStockRow>, QuantityOverflow> {
    let mut totals: HashMap<(&str, &str), (Decimal, Decimal)> = HashMap::new();

    for entry in inward {
        let total = &mut totals
            .entry((entry.item_name.as_str(), entry.unit.as_str()))
            .or_default()
            .0;
        *total = total.checked_add(entry.quantity).ok_or(QuantityOverflow)?;
    }
    for entry in po {
        let total = &mut totals
            .entry((entry.item_name.as_str(), entry.unit.as_str()))
            .or_default()
            .1;
        *total = total.checked_add(entry.quantity).ok_or(QuantityOverflow)?;
    }

    let mut rows = totals
        .into_iter()
        .map(|((item, unit), (inward_qty, po_qty))| {
            LiveStockRow::new(item.to_string(), unit.to_string(), inward_qty, po_qty)
        })
        .collect::<Result<Vec<_>, _>>()?;

    rows.sort_by(|a, b| {
        compare_names(&a.item_name, &b.item_name).then_with(|| compare_names(&a.unit, &b.unit))
    });
    Ok(rows)
}

/// Locale-style ordering: case-insensitive first, exact text breaks ties
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sort by parsed timestamp, newest first. Unparsable or empty timestamps
/// count as oldest; equal timestamps keep their stored order.
pub fn sort_newest_first<T>(records: &mut [T], timestamp: impl Fn(&T) -> &str) {
    records.sort_by_cached_key(|r| std::cmp::Reverse(parse_timestamp(timestamp(r))));
}
