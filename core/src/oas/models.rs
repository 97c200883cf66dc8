#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Intermediate Representation (IR) structures produced from a parsed document
//! and handed to the surrounding emitters (client wrappers, hooks, routes).

use std::fmt;

/// The binding location of a request parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSource {
    /// Path template variable.
    Path,
    /// Query string.
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParamSource {
    /// Placements in the order their sections are composed.
    pub const ORDER: [ParamSource; 4] = [
        ParamSource::Path,
        ParamSource::Query,
        ParamSource::Header,
        ParamSource::Cookie,
    ];

    /// Parses the `in` field of a Parameter Object.
    ///
    /// Returns `None` for locations this engine does not project (e.g. `querystring`).
    pub fn from_location(location: &str) -> Option<Self> {
        match location {
            "path" => Some(ParamSource::Path),
            "query" => Some(ParamSource::Query),
            "header" => Some(ParamSource::Header),
            "cookie" => Some(ParamSource::Cookie),
            _ => None,
        }
    }

    /// The key of this placement's section in the composed input shape.
    pub fn section_name(self) -> &'static str {
        match self {
            ParamSource::Path => "param",
            ParamSource::Query => "query",
            ParamSource::Header => "header",
            ParamSource::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParamSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamSource::Path => "path",
            ParamSource::Query => "query",
            ParamSource::Header => "header",
            ParamSource::Cookie => "cookie",
        };
        write!(f, "{}", s)
    }
}

/// The composed argument type of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationInput {
    /// The URL path template, e.g. `/users/{id}`.
    pub path: String,
    /// HTTP Method in upper case: "GET", "POST", etc.
    pub method: String,
    /// `operationId`, if declared.
    pub operation_id: Option<String>,
    /// Operation summary, carried for documentation strings.
    pub summary: Option<String>,
    /// Operation description, carried for documentation strings.
    pub description: Option<String>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
    /// The composite input-shape type expression.
    pub input_type: String,
}
