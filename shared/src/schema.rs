//! Sheet layouts and the row <-> record mapping for each record kind
//!
//! Every sheet stores text cells only. The first row is the header and must
//! match the layout below exactly; each data row must have exactly as many
//! cells as the header.

use serde::Serialize;
use thiserror::Error;

use crate::models::{InwardEntry, PoEntry, TransactionRecord, TransactionType};
use crate::types::{quantity_cell, quantity_or_zero};

/// The record kinds kept in the store, one sheet each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SheetKind {
    Inward,
    Po,
    TransactionHistory,
}

impl SheetKind {
    pub const ALL: [SheetKind; 3] = [SheetKind::Inward, SheetKind::Po, SheetKind::TransactionHistory];

    /// Sheet (tab) title in the spreadsheet
    pub fn title(&self) -> &'static str {
        match self {
            SheetKind::Inward => "Inward",
            SheetKind::Po => "PO",
            SheetKind::TransactionHistory => "TransactionHistory",
        }
    }

    /// Header row seeded when the sheet is created
    pub fn header(&self) -> &'static [&'static str] {
        match self {
            SheetKind::Inward => &["Timestamp", "Item Name", "Quantity", "Unit"],
            SheetKind::Po => &["Timestamp", "Item Name", "Quantity", "Unit", "Customer Name"],
            SheetKind::TransactionHistory => &[
                "Timestamp",
                "Type",
                "Item Name",
                "Quantity",
                "Unit",
                "Customer Name",
            ],
        }
    }

    pub fn width(&self) -> usize {
        self.header().len()
    }

    pub fn header_row(&self) -> Vec<String> {
        self.header().iter().map(|h| h.to_string()).collect()
    }
}

impl std::fmt::Display for SheetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A stored row that does not fit its sheet layout
#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("{sheet} row {row}: expected {expected} cells, found {found}")]
    ColumnCount {
        sheet: SheetKind,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{sheet} header does not match layout: {found:?}")]
    Header { sheet: SheetKind, found: Vec<String> },

    #[error("{sheet} row {row}: unknown transaction type {value:?}")]
    UnknownType {
        sheet: SheetKind,
        row: usize,
        value: String,
    },
}

/// A record stored as one row of a sheet
pub trait SheetRecord: Sized {
    const KIND: SheetKind;

    fn to_row(&self) -> Vec<String>;

    /// Build a record from one data row. `row` is the 1-based sheet row
    /// number, used only for error reporting.
    fn from_row(row: usize, cells: &[String]) -> Result<Self, RowError>;
}

fn check_width(kind: SheetKind, row: usize, cells: &[String]) -> Result<(), RowError> {
    if cells.len() != kind.width() {
        return Err(RowError::ColumnCount {
            sheet: kind,
            row,
            expected: kind.width(),
            found: cells.len(),
        });
    }
    Ok(())
}

impl SheetRecord for InwardEntry {
    const KIND: SheetKind = SheetKind::Inward;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.item_name.clone(),
            quantity_cell(self.quantity),
            self.unit.clone(),
        ]
    }

    fn from_row(row: usize, cells: &[String]) -> Result<Self, RowError> {
        check_width(Self::KIND, row, cells)?;
        Ok(Self {
            timestamp: cells[0].clone(),
            item_name: cells[1].clone(),
            quantity: quantity_or_zero(&cells[2]),
            unit: cells[3].clone(),
        })
    }
}

impl SheetRecord for PoEntry {
    const KIND: SheetKind = SheetKind::Po;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.item_name.clone(),
            quantity_cell(self.quantity),
            self.unit.clone(),
            self.customer_name.clone(),
        ]
    }

    fn from_row(row: usize, cells: &[String]) -> Result<Self, RowError> {
        check_width(Self::KIND, row, cells)?;
        Ok(Self {
            timestamp: cells[0].clone(),
            item_name: cells[1].clone(),
            quantity: quantity_or_zero(&cells[2]),
            unit: cells[3].clone(),
            customer_name: cells[4].clone(),
        })
    }
}

impl SheetRecord for TransactionRecord {
    const KIND: SheetKind = SheetKind::TransactionHistory;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.transaction_type.as_str().to_string(),
            self.item_name.clone(),
            quantity_cell(self.quantity),
            self.unit.clone(),
            self.customer_name.clone(),
        ]
    }

    fn from_row(row: usize, cells: &[String]) -> Result<Self, RowError> {
        check_width(Self::KIND, row, cells)?;
        let transaction_type =
            TransactionType::parse(&cells[1]).ok_or_else(|| RowError::UnknownType {
                sheet: Self::KIND,
                row,
                value: cells[1].clone(),
            })?;
        Ok(Self {
            timestamp: cells[0].clone(),
            transaction_type,
            item_name: cells[2].clone(),
            quantity: quantity_or_zero(&cells[3]),
            unit: cells[4].clone(),
            customer_name: cells[5].clone(),
        })
    }
}

/// Decode a full sheet (header first) into records.
///
/// An empty sheet decodes to no records. Rows whose cells are all blank are
/// skipped.
pub fn decode_sheet<T: SheetRecord>(rows: &[Vec<String>]) -> Result<Vec<T>, RowError> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let expected = T::KIND.header();
    if header.len() != expected.len() || header.iter().zip(expected).any(|(h, e)| h != e) {
        return Err(RowError::Header {
            sheet: T::KIND,
            found: header.clone(),
        });
    }

    data.iter()
        .enumerate()
        .filter(|(_, cells)| cells.iter().any(|c| !c.trim().is_empty()))
        // Header is sheet row 1
        .map(|(i, cells)| T::from_row(i + 2, cells))
        .collect()
}
