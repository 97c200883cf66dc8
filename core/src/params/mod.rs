#![deny(missing_docs)]

//! # Operation Inputs
//!
//! - **projector**: Groups parameters by placement.
//! - **composer**: Renders the groups (and a body) into one argument type.
//! - **body**: Selects and renders the request body section.

pub mod body;
pub mod composer;
pub mod projector;

pub use body::{request_body_section, BodyFormat};
pub use composer::{compose, InputField, InputSection, InputShape};
pub use projector::{project, ParameterDescriptor, PlacementGroups};
