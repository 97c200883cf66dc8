#![deny(missing_docs)]

//! # Inputs Command
//!
//! Prints the composed input shape of every operation, one per line, preceded by
//! its summary as a comment when one is declared.

use crate::config::InputArgs;
use crate::error::CliResult;
use tsgen_core::{collect_operation_inputs, AppResult, ShimOpenApi, SynthOptions};

/// Arguments for the inputs command.
#[derive(clap::Args, Debug, Clone)]
pub struct InputsArgs {
    /// Document and options.
    #[clap(flatten)]
    pub input: InputArgs,
}

/// Renders the input shapes of a document.
pub fn render(doc: &ShimOpenApi, options: &SynthOptions) -> AppResult<String> {
    let mut out = String::new();
    for op in collect_operation_inputs(doc, options)? {
        if let Some(summary) = &op.summary {
            out.push_str(&format!("// {}\n", summary));
        }
        out.push_str(&format!("{} {} {}\n", op.method, op.path, op.input_type));
    }
    Ok(out)
}

/// Executes the inputs command.
pub fn execute(args: &InputsArgs) -> CliResult<()> {
    let (doc, options) = args.input.load()?;
    print!("{}", render(&doc, &options)?);
    Ok(())
}
