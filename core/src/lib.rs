#![deny(missing_docs)]

//! # TSGen Core
//!
//! Schema type synthesis for OpenAPI documents.
//!
//! Walks a possibly self-referential schema graph and produces TypeScript type
//! expressions, plus one composite input-shape type per operation for client
//! wrappers and data-fetching hooks.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) document shims, component table and operation walker.
pub mod oas;

/// Schema -> type expression synthesis.
pub mod synth;

/// Parameter projection and input-shape composition.
pub mod params;

pub use error::{AppError, AppResult};
pub use oas::routes::collect_operation_inputs;
pub use oas::{
    parse_document, ComponentTable, OperationInput, ParamSource, ShimOpenApi, ShimSchema,
};
pub use params::{compose, project, request_body_section, InputShape, PlacementGroups};
pub use synth::{PropertyBag, SynthOptions, TypeSynthesizer, Visited};
