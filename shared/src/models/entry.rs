//! Stock movement entries as stored in the record store

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A receipt of stock into inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InwardEntry {
    pub timestamp: String,
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
}

/// A dispatch of stock to a customer against a purchase order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoEntry {
    pub timestamp: String,
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
    pub customer_name: String,
}

/// Kind of movement recorded in the transaction history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Inward,
    #[serde(rename = "PO")]
    Po,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Inward => "Inward",
            TransactionType::Po => "PO",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "Inward" => Some(TransactionType::Inward),
            "PO" => Some(TransactionType::Po),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Denormalized copy of an inward or PO entry in the unified history log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub unit: String,
    /// Empty for inward movements
    pub customer_name: String,
}

impl From<&InwardEntry> for TransactionRecord {
    fn from(entry: &InwardEntry) -> Self {
        Self {
            timestamp: entry.timestamp.clone(),
            transaction_type: TransactionType::Inward,
            item_name: entry.item_name.clone(),
            quantity: entry.quantity,
            unit: entry.unit.clone(),
            customer_name: String::new(),
        }
    }
}

impl From<&PoEntry> for TransactionRecord {
    fn from(entry: &PoEntry) -> Self {
        Self {
            timestamp: entry.timestamp.clone(),
            transaction_type: TransactionType::Po,
            item_name: entry.item_name.clone(),
            quantity: entry.quantity,
            unit: entry.unit.clone(),
            customer_name: entry.customer_name.clone(),
        }
    }
}

/// One line of an inward batch as posted by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InwardItem {
    #[serde(default)]
    pub full_text: String,
    #[serde(default, with = "crate::types::lenient_quantity")]
    pub quantity: Decimal,
    #[serde(default)]
    pub unit: String,
}
