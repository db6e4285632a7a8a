//! WebAssembly module for the Inventory Tracker UI
//!
//! Provides client-side logic for:
//! - Staging a multi-item inward batch before it is posted
//! - Staging a purchase order for one customer, posted line by line
//! - Searching the uploaded item catalog
//! - Quantity parsing and stock status labels
//!
//! Structured values cross the boundary as JSON strings.

use rust_decimal::Decimal;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::batch::*;
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&"inventory tracker module loaded".into());
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

fn to_decimal(quantity: f64) -> Decimal {
    Decimal::try_from(quantity).unwrap_or(Decimal::ZERO)
}

/// Stock status label for a live stock value
#[wasm_bindgen]
pub fn classify_stock(live_stock: f64) -> String {
    StockStatus::classify(to_decimal(live_stock)).to_string()
}

/// Leading numeric value of a quantity field, `undefined` when there is none
#[wasm_bindgen]
pub fn parse_quantity(text: &str) -> Option<f64> {
    shared::types::parse_quantity(text).and_then(|q| q.to_string().parse().ok())
}

/// Uploaded catalog held on the page for searching
#[wasm_bindgen]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

#[wasm_bindgen]
impl Catalog {
    /// Build from the JSON array returned by the catalog upload
    #[wasm_bindgen(constructor)]
    pub fn new(items_json: &str) -> Result<Catalog, JsValue> {
        Catalog::from_json(items_json).map_err(js_error)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Matching items as a JSON array
    pub fn search(&self, query: &str) -> String {
        serde_json::to_string(&search_catalog(&self.items, query)).unwrap_or_else(|_| "[]".into())
    }
}

impl Catalog {
    fn from_json(items_json: &str) -> Result<Catalog, String> {
        let items = serde_json::from_str(items_json)
            .map_err(|e| format!("Invalid catalog JSON: {}", e))?;
        Ok(Catalog { items })
    }

    fn find(&self, item_id: &str) -> Result<&CatalogItem, String> {
        let id = Uuid::parse_str(item_id).map_err(|e| format!("Invalid item id: {}", e))?;
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| format!("Unknown catalog item: {}", item_id))
    }
}

/// Inward lines staged on the page
#[wasm_bindgen]
#[derive(Default)]
pub struct InwardBatch {
    inner: StagedBatch,
}

#[wasm_bindgen]
impl InwardBatch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> InwardBatch {
        InwardBatch::default()
    }

    /// Stage a catalog item; repeated item and unit pairs accumulate
    pub fn add(&mut self, catalog: &Catalog, item_id: &str, unit: &str, quantity: f64) -> Result<(), JsValue> {
        self.add_from(catalog, item_id, unit, quantity).map_err(js_error)
    }

    pub fn set_quantity(&mut self, item_id: &str, unit: &str, quantity: f64) -> bool {
        match Uuid::parse_str(item_id) {
            Ok(id) => self.inner.set_quantity(id, unit, to_decimal(quantity)),
            Err(_) => false,
        }
    }

    pub fn remove(&mut self, item_id: &str, unit: &str) -> bool {
        match Uuid::parse_str(item_id) {
            Ok(id) => self.inner.remove(id, unit),
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Staged lines as a JSON array
    pub fn lines(&self) -> String {
        serde_json::to_string(self.inner.lines()).unwrap_or_else(|_| "[]".into())
    }

    /// Request body for `POST /push-data`
    pub fn payload(&self) -> String {
        serde_json::to_string(&self.inner.to_payload()).unwrap_or_else(|_| "[]".into())
    }
}

impl InwardBatch {
    fn add_from(&mut self, catalog: &Catalog, item_id: &str, unit: &str, quantity: f64) -> Result<(), String> {
        let item = catalog.find(item_id)?;
        self.inner
            .add(item, unit, to_decimal(quantity))
            .map_err(|e| e.to_string())
    }
}

/// Purchase order lines staged on the page for a single customer
#[wasm_bindgen]
#[derive(Default)]
pub struct PoBatch {
    inner: StagedPoBatch,
}

#[wasm_bindgen]
impl PoBatch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PoBatch {
        PoBatch::default()
    }

    /// Stage a catalog item; repeated item and unit pairs accumulate
    pub fn add(&mut self, catalog: &Catalog, item_id: &str, unit: &str, quantity: f64) -> Result<(), JsValue> {
        self.add_from(catalog, item_id, unit, quantity).map_err(js_error)
    }

    pub fn set_customer_name(&mut self, name: &str) {
        self.inner.set_customer_name(name);
    }

    pub fn customer_name(&self) -> String {
        self.inner.customer_name().to_string()
    }

    pub fn set_quantity(&mut self, item_id: &str, unit: &str, quantity: f64) -> bool {
        match Uuid::parse_str(item_id) {
            Ok(id) => self.inner.set_quantity(id, unit, to_decimal(quantity)),
            Err(_) => false,
        }
    }

    pub fn remove(&mut self, item_id: &str, unit: &str) -> bool {
        match Uuid::parse_str(item_id) {
            Ok(id) => self.inner.remove(id, unit),
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Staged lines as a JSON array
    pub fn lines(&self) -> String {
        serde_json::to_string(self.inner.lines()).unwrap_or_else(|_| "[]".into())
    }

    /// JSON array of `POST /api/po-entry` bodies, one per line
    pub fn requests(&self) -> Result<String, JsValue> {
        self.requests_json().map_err(js_error)
    }
}

impl PoBatch {
    fn add_from(&mut self, catalog: &Catalog, item_id: &str, unit: &str, quantity: f64) -> Result<(), String> {
        let item = catalog.find(item_id)?;
        self.inner
            .add(item, unit, to_decimal(quantity))
            .map_err(|e| e.to_string())
    }

    fn requests_json(&self) -> Result<String, String> {
        let requests = self.inner.to_requests().map_err(|e| e.to_string())?;
        serde_json::to_string(&requests).map_err(|e| e.to_string())
    }
}
