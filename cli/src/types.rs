#![deny(missing_docs)]

//! # Types Command
//!
//! Prints one type alias per component schema.

use crate::config::InputArgs;
use crate::error::CliResult;
use tsgen_core::{ShimOpenApi, SynthOptions, TypeSynthesizer};

/// Arguments for the types command.
#[derive(clap::Args, Debug, Clone)]
pub struct TypesArgs {
    /// Document and options.
    #[clap(flatten)]
    pub input: InputArgs,

    /// Prefix `export` to every alias.
    #[clap(long)]
    pub export: bool,
}

/// Renders the component aliases of a document.
pub fn render(doc: &ShimOpenApi, options: &SynthOptions, export: bool) -> String {
    let table = doc.component_table();
    let synth = TypeSynthesizer::new(&table, options);
    let prefix = if export { "export " } else { "" };
    synth
        .component_types()
        .into_iter()
        .map(|(name, ty)| format!("{}type {} = {};\n", prefix, name, ty))
        .collect()
}

/// Executes the types command.
pub fn execute(args: &TypesArgs) -> CliResult<()> {
    let (doc, options) = args.input.load()?;
    print!("{}", render(&doc, &options, args.export));
    Ok(())
}
