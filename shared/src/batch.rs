//! Client-side staging of multi-item batches before they are posted
//!
//! The inward page stages a list flushed as one `POST /push-data`; the PO
//! page stages a list plus one customer name, flushed as one
//! `POST /api/po-entry` per line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{CatalogItem, InwardItem};
use crate::types::QuantityOverflow;

/// Why a line could not be staged or a batch could not be flushed
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BatchError {
    #[error("Enter a quantity above zero and select a unit")]
    InvalidLine,

    #[error("Please provide a customer name")]
    CustomerRequired,

    #[error(transparent)]
    Overflow(#[from] QuantityOverflow),
}

/// One staged line: a catalog item in a given unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedLine {
    pub id: Uuid,
    pub full_text: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
}

/// Staged lines, keyed by (item text, unit)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagedBatch {
    lines: Vec<StagedLine>,
}

impl StagedBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[StagedLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Stage `quantity` of `item` in `unit`. Adding the same item and unit
    /// again increases the existing line. The quantity must be positive and
    /// the unit non-blank; nothing changes on error.
    pub fn add(&mut self, item: &CatalogItem, unit: &str, quantity: Decimal) -> Result<(), BatchError> {
        if quantity <= Decimal::ZERO || unit.trim().is_empty() {
            return Err(BatchError::InvalidLine);
        }

        match self
            .lines
            .iter_mut()
            .find(|l| l.full_text == item.full_text && l.unit == unit)
        {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or(QuantityOverflow)?;
            }
            None => self.lines.push(StagedLine {
                id: item.id,
                full_text: item.full_text.clone(),
                quantity,
                unit: unit.to_string(),
            }),
        }
        Ok(())
    }

    /// Replace the quantity of a staged line. Returns false if no line matches.
    pub fn set_quantity(&mut self, id: Uuid, unit: &str, quantity: Decimal) -> bool {
        match self.lines.iter_mut().find(|l| l.id == id && l.unit == unit) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a staged line. Returns false if no line matches.
    pub fn remove(&mut self, id: Uuid, unit: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| !(l.id == id && l.unit == unit));
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Body for `POST /push-data`
    pub fn to_payload(&self) -> Vec<InwardItem> {
        self.lines
            .iter()
            .map(|l| InwardItem {
                full_text: l.full_text.clone(),
                quantity: l.quantity,
                unit: l.unit.clone(),
            })
            .collect()
    }
}

/// Body of one `POST /api/po-entry`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoRequest {
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
    pub customer_name: String,
}

/// Staged purchase order: lines merged like [`StagedBatch`], all for one
/// customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedPoBatch {
    customer_name: String,
    lines: StagedBatch,
}

impl StagedPoBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn lines(&self) -> &[StagedLine] {
        self.lines.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add(&mut self, item: &CatalogItem, unit: &str, quantity: Decimal) -> Result<(), BatchError> {
        self.lines.add(item, unit, quantity)
    }

    pub fn set_quantity(&mut self, id: Uuid, unit: &str, quantity: Decimal) -> bool {
        self.lines.set_quantity(id, unit, quantity)
    }

    pub fn remove(&mut self, id: Uuid, unit: &str) -> bool {
        self.lines.remove(id, unit)
    }

    /// Drop every line and the customer name
    pub fn clear(&mut self) {
        self.lines.clear();
        self.customer_name.clear();
    }

    /// One PO request per staged line, in staging order, each carrying the
    /// trimmed customer name
    pub fn to_requests(&self) -> Result<Vec<PoRequest>, BatchError> {
        let customer = self.customer_name.trim();
        if customer.is_empty() {
            return Err(BatchError::CustomerRequired);
        }

        Ok(self
            .lines
            .lines()
            .iter()
            .map(|l| PoRequest {
                item_name: l.full_text.clone(),
                quantity: l.quantity,
                unit: l.unit.clone(),
                customer_name: customer.to_string(),
            })
            .collect())
    }
}
