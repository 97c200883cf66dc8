#![deny(missing_docs)]

//! # Input Loading
//!
//! Reads the OpenAPI document and the optional synthesis options file.

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tsgen_core::{parse_document, ShimOpenApi, SynthOptions};

/// Arguments shared by every command that reads a document.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, short = 'i', env = "TSGEN_INPUT")]
    pub input: PathBuf,

    /// Optional synthesis options file (YAML or JSON).
    /// Keys: `unknownType`, `int64Type`, `binaryType`, `indexKey`.
    #[clap(long, env = "TSGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

impl InputArgs {
    /// Loads the document and options.
    pub fn load(&self) -> CliResult<(ShimOpenApi, SynthOptions)> {
        Ok((load_document(&self.input)?, load_options(self.config.as_deref())?))
    }
}

/// Reads and parses an OpenAPI document.
pub fn load_document(path: &Path) -> CliResult<ShimOpenApi> {
    if !path.exists() {
        return Err(CliError::General(format!(
            "OpenAPI file not found: {:?}",
            path
        )));
    }
    info!(path = %path.display(), "reading OpenAPI document");
    let content = fs::read_to_string(path)?;
    Ok(parse_document(&content)?)
}

/// Reads synthesis options, falling back to defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> CliResult<SynthOptions> {
    let Some(path) = path else {
        debug!("using default synthesis options");
        return Ok(SynthOptions::default());
    };
    let content = fs::read_to_string(path)?;
    Ok(SynthOptions::from_yaml_str(&content)?)
}
