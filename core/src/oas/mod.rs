#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **shims**: Serde structures for the document subset the engine reads.
//! - **ref_utils**: Local `$ref` pointer parsing.
//! - **registry**: The component table and reference resolver.
//! - **models**: Intermediate Representation handed to emitters.
//! - **routes**: Walks `paths` into per-operation input shapes.

pub mod models;
pub mod ref_utils;
pub mod registry;
pub mod routes;
pub mod shims;

pub use models::{OperationInput, ParamSource};
pub use registry::{ComponentTable, ResolvedSchema};
pub use shims::{ShimOpenApi, ShimSchema};

use crate::error::{AppError, AppResult};
use serde_json::Value as JsonValue;

/// Parses a YAML or JSON OpenAPI document.
///
/// The text is read through `serde_yaml` (a superset of JSON) into an order-preserving
/// JSON value first, so every map in the result keeps document order.
pub fn parse_document(content: &str) -> AppResult<ShimOpenApi> {
    let raw: JsonValue = serde_yaml::from_str(content)
        .map_err(|e| AppError::Parse(format!("Failed to parse OpenAPI document: {}", e)))?;
    parse_document_value(raw)
}

/// Converts an already parsed JSON value into the document shim.
pub fn parse_document_value(raw: JsonValue) -> AppResult<ShimOpenApi> {
    if !raw.is_object() {
        return Err(AppError::Structure(
            "OpenAPI document root must be a map".into(),
        ));
    }
    serde_json::from_value(raw)
        .map_err(|e| AppError::Parse(format!("Failed to read OpenAPI document: {}", e)))
}

impl ShimOpenApi {
    /// Builds the component table for this document.
    pub fn component_table(&self) -> ComponentTable {
        self.components
            .clone()
            .map(ComponentTable::from)
            .unwrap_or_default()
    }
}
