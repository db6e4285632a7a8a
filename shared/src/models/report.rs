//! Derived report views computed from the stored entries

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::QuantityOverflow;

/// PO totals for one (item, unit, customer) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoItemQuantity {
    pub item_name: String,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub customer_name: String,
}

/// Summary over every PO entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PoSummary {
    pub total_entries: usize,
    pub unique_items: usize,
    /// Groups in order of first appearance, not sorted
    pub item_quantities: Vec<PoItemQuantity>,
}

/// Stock position classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "Oversold")]
    Oversold,
}

impl StockStatus {
    /// Classify a live stock figure: positive, zero, or negative
    pub fn classify(live_stock: Decimal) -> Self {
        if live_stock > Decimal::ZERO {
            StockStatus::InStock
        } else if live_stock < Decimal::ZERO {
            StockStatus::Oversold
        } else {
            StockStatus::OutOfStock
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::Oversold => "Oversold",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inward minus PO for one (item, unit) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveStockRow {
    pub item_name: String,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub inward_quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub po_quantity: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub live_stock: Decimal,
    pub status: StockStatus,
}

impl LiveStockRow {
    /// Fails only when `inward - po` does not fit in a `Decimal`
    pub fn new(
        item_name: String,
        unit: String,
        inward_quantity: Decimal,
        po_quantity: Decimal,
    ) -> Result<Self, QuantityOverflow> {
        let live_stock = inward_quantity
            .checked_sub(po_quantity)
            .ok_or(QuantityOverflow)?;
        Ok(Self {
            item_name,
            unit,
            inward_quantity,
            po_quantity,
            live_stock,
            status: StockStatus::classify(live_stock),
        })
    }
}
