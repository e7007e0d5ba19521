//! WASM bindings for rewriting column tables in the browser.
//!
//! Exposes the transformer to JavaScript via wasm-bindgen, e.g. for editor
//! previews that render the public markup client-side.

use wasm_bindgen::prelude::*;

use crate::columns::{ColumnTransformer, ColumnsConfig};

/// Initialize panic hook for better error messages in the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Rewrite column tables in `content`, numbering containers from 1.
#[wasm_bindgen]
pub fn transform_columns(content: &str) -> Result<String, JsValue> {
    transform_columns_from(content, 1)
}

/// Rewrite column tables in `content`, numbering containers from `start_id`.
///
/// Use distinct starting ids when several fragments end up on one page.
#[wasm_bindgen]
pub fn transform_columns_from(content: &str, start_id: u32) -> Result<String, JsValue> {
    let config = ColumnsConfig::default().with_initial_id(u64::from(start_id));
    ColumnTransformer::new(config)
        .and_then(|t| t.transform(content))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
