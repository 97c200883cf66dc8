#![deny(missing_docs)]

//! # Synthesis Options
//!
//! The rendering vocabulary of the type synthesizer. Defaults target TypeScript.

use crate::error::{AppError, AppResult};
use serde::Deserialize;

/// Names used for the few target types that are not fixed by the schema itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SynthOptions {
    /// Opaque type for unresolvable or cyclic references.
    pub unknown_type: String,
    /// Arbitrary-precision integer type for `format: int64`.
    pub int64_type: String,
    /// Binary payload type for `format: binary` strings.
    pub binary_type: String,
    /// Parameter name used inside index signatures.
    pub index_key: String,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            unknown_type: "unknown".to_string(),
            int64_type: "bigint".to_string(),
            binary_type: "File".to_string(),
            index_key: "key".to_string(),
        }
    }
}

impl SynthOptions {
    /// Loads options from a YAML or JSON string. Missing keys keep their defaults.
    pub fn from_yaml_str(content: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::Parse(format!("Failed to parse synthesis options: {}", e)))
    }
}
