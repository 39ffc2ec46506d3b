//! WASM bindings for the Go import sorter
//!
//! This module provides WebAssembly bindings for the source-level
//! reformat operation, allowing it to be used in web applications.
//! Filesystem-backed operations (rewrite, directory scans) are not
//! exposed; callers pass source text directly.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Result envelope for WASM calls
#[derive(Serialize, Deserialize)]
pub struct WasmSortResult {
    pub success: bool,
    pub data: Option<String>,
    pub error: Option<String>,
}

impl WasmSortResult {
    fn ok(data: Option<String>) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }

    fn into_js(self) -> JsValue {
        serde_wasm_bindgen::to_value(&self).unwrap_or(JsValue::NULL)
    }
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Compute the canonical import block for Go source text and return
/// the change set as JSON
#[wasm_bindgen]
pub fn sort_source(source: &str, local_package: Option<String>) -> JsValue {
    match sortimports_core::reformat_source(source, local_package.as_deref()) {
        Ok(changes) => WasmSortResult::ok(serde_json::to_string(&changes).ok()).into_js(),
        Err(e) => WasmSortResult::err(e.to_string()).into_js(),
    }
}

/// Parse Go source text and return its import declarations as JSON
#[wasm_bindgen]
pub fn parse_imports(source: &str) -> JsValue {
    use sortimports_core::models::ImportDecl;
    use sortimports_core::parsers::{GoParser, ImportParser};

    let mut parser = match GoParser::new() {
        Ok(parser) => parser,
        Err(e) => return WasmSortResult::err(e.to_string()).into_js(),
    };

    match parser.parse(source) {
        Ok(imports) => {
            let decls: Vec<ImportDecl> = imports.into_iter().map(ImportDecl::from).collect();
            WasmSortResult::ok(serde_json::to_string(&decls).ok()).into_js()
        }
        Err(e) => WasmSortResult::err(e.to_string()).into_js(),
    }
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
