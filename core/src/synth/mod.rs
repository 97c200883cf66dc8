#![deny(missing_docs)]

//! # Schema Type Synthesis
//!
//! - **kind**: Which keyword governs a node (fixed precedence).
//! - **types**: The recursive node -> type-expression walk with its cycle guard.
//! - **merge**: `allOf` property-bag merging.
//! - **render**: Shared string builders.
//! - **options**: Rendering vocabulary.

pub mod kind;
pub mod merge;
pub mod options;
pub mod render;
pub mod types;

pub use kind::{classify, SchemaKind, TypeTag};
pub use merge::{PropertyBag, PropertySlot};
pub use options::SynthOptions;
pub use types::{TypeSynthesizer, Visited};
