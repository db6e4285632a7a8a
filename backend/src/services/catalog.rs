//! Item catalog import from an uploaded sheet (xlsx/xls workbook or CSV)

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::{ReaderBuilder, Trim};
use shared::CatalogItem;

use crate::error::{AppError, AppResult};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

/// Parse a catalog upload.
///
/// Workbooks (detected by their zip or OLE signature) are read from the
/// first worksheet; anything else is treated as CSV. The first row is the
/// header. Item text comes from the `item` column when that cell is filled,
/// otherwise from the first non-empty cell of the row. Rows with no text
/// are skipped.
pub fn parse_catalog(data: &[u8]) -> AppResult<Vec<CatalogItem>> {
    let rows = if is_workbook(data) {
        workbook_rows(data)?
    } else {
        csv_rows(data)?
    };

    let mut rows = rows.into_iter();
    let item_column = rows
        .next()
        .and_then(|header| header.iter().position(|h| h.eq_ignore_ascii_case("item")));

    let items: Vec<CatalogItem> = rows
        .filter_map(|row| item_text(&row, item_column).map(CatalogItem::new))
        .collect();

    tracing::info!("Parsed {} catalog items", items.len());
    Ok(items)
}

fn is_workbook(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC) || data.starts_with(OLE_MAGIC)
}

fn item_text(row: &[String], item_column: Option<usize>) -> Option<&str> {
    item_column
        .and_then(|col| row.get(col))
        .filter(|s| !s.is_empty())
        .or_else(|| row.iter().find(|s| !s.is_empty()))
        .map(String::as_str)
}

fn csv_rows(data: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(|e| AppError::BadRequest(format!("unreadable catalog row: {}", e)))
        })
        .collect()
}

fn workbook_rows(data: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let unreadable = |e: calamine::Error| AppError::BadRequest(format!("unreadable workbook: {}", e));

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data)).map_err(unreadable)?;
    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Ok(Vec::new());
    };
    let range = workbook.worksheet_range(&first).map_err(unreadable)?;

    tracing::debug!("Reading catalog from worksheet {:?}", first);
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    let text = match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() <= 9_007_199_254_740_992.0 => {
            format!("{:.0}", f)
        }
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::DateTime(serial) => serial.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) => String::new(),
    };
    text.trim().to_string()
}
