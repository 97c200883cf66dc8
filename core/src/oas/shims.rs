#![deny(missing_docs)]

//! # Document Shims
//!
//! Structures acting as an Intermediate Deserialization Layer.
//! These structs map the subset of OpenAPI objects the type engine reads.
//!
//! Decoding is tolerant below the document root. A schema keyword with the wrong shape
//! marks its node as malformed (rendered as the opaque type), a parameter or request body
//! with the wrong shape is kept as [`RefOr::Malformed`], and any other ill-typed field
//! falls back to its default. Each case logs a warning and the rest of the document loads.
//! Maps use `IndexMap` so property and media-type order follows the document.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::warn;

/// A `$ref` object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reference {
    /// The pointer string, e.g. `#/components/parameters/Limit`.
    #[serde(rename = "$ref")]
    pub ref_location: String,
}

/// Either a `$ref` object, an inline definition, or a value matching neither.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A reference to a reusable component.
    Ref(Reference),
    /// An inline definition.
    T(T),
    /// An entry with the wrong shape, kept raw so it can be reported and skipped.
    Malformed(Value),
}

/// The `type` keyword: a single tag (OAS 3.0) or a list of tags (OAS 3.1).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypeSet {
    /// `type: string`
    Single(String),
    /// `type: [string, "null"]`
    Many(Vec<String>),
}

impl TypeSet {
    /// Returns the declared tags in document order.
    pub fn tags(&self) -> Vec<&str> {
        match self {
            TypeSet::Single(t) => vec![t.as_str()],
            TypeSet::Many(ts) => ts.iter().map(String::as_str).collect(),
        }
    }

    /// Returns true when `null` is one of the declared tags.
    pub fn contains_null(&self) -> bool {
        self.tags().contains(&"null")
    }
}

/// The `items` keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ShimItems {
    /// Boolean schema (`items: false` closes a `prefixItems` tuple).
    Flag(bool),
    /// Legacy positional tuple form.
    Tuple(Vec<ShimSchema>),
    /// A single item schema.
    Single(Box<ShimSchema>),
}

/// The `additionalProperties` keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` permits unknown keys, `false` forbids them.
    Flag(bool),
    /// Unknown keys are allowed and typed by this schema.
    Schema(Box<ShimSchema>),
}

/// A Schema Object.
///
/// Every keyword is optional; which one governs rendering is decided by
/// [`crate::synth::kind::classify`]. Decoding never fails: boolean schemas load as the
/// empty schema, and any other shape problem sets `malformed`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct ShimSchema {
    /// `$ref` pointer.
    pub reference: Option<String>,
    /// Exclusive union.
    pub one_of: Option<Vec<ShimSchema>>,
    /// Inclusive union.
    pub any_of: Option<Vec<ShimSchema>>,
    /// Intersection.
    pub all_of: Option<Vec<ShimSchema>>,
    /// Literal alternatives.
    pub enum_values: Option<Vec<Value>>,
    /// Single literal. `const: null` is kept as `Some(Value::Null)`.
    pub const_value: Option<Value>,
    /// Primitive or structural type tag(s).
    pub schema_type: Option<TypeSet>,
    /// Format modifier (e.g. `int64`, `binary`).
    pub format: Option<String>,
    /// Array item schema.
    pub items: Option<ShimItems>,
    /// Positional tuple items (OAS 3.1).
    pub prefix_items: Option<Vec<ShimSchema>>,
    /// Declared object properties.
    pub properties: Option<IndexMap<String, ShimSchema>>,
    /// Names of required properties.
    pub required: Vec<String>,
    /// Policy for undeclared object keys.
    pub additional_properties: Option<AdditionalProperties>,
    /// OAS 3.0 nullability flag.
    pub nullable: Option<bool>,
    /// Swagger 2.0 vendor nullability flag.
    pub x_nullable: Option<bool>,
    /// Human readable description.
    pub description: Option<String>,
    /// Set when the node, or one of its own keywords, had the wrong shape.
    pub malformed: bool,
}

impl ShimSchema {
    /// Returns true when the node is nullable through `nullable`, `x-nullable`
    /// or a `type` list containing `null`.
    pub fn is_nullable(&self) -> bool {
        self.nullable == Some(true)
            || self.x_nullable == Some(true)
            || self
                .schema_type
                .as_ref()
                .is_some_and(|t| t.contains_null())
    }

    /// Returns true when `name` is listed in `required`.
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    fn from_keywords(map: Map<String, Value>) -> Self {
        let mut reader = KeywordReader {
            map,
            malformed: false,
        };
        let mut schema = Self {
            reference: reader.take("$ref"),
            one_of: reader.take("oneOf"),
            any_of: reader.take("anyOf"),
            all_of: reader.take("allOf"),
            enum_values: reader.take("enum"),
            const_value: reader.map.remove("const"),
            schema_type: reader.take("type"),
            format: reader.take("format"),
            items: reader.take("items"),
            prefix_items: reader.take("prefixItems"),
            properties: reader.take("properties"),
            required: reader.take("required").unwrap_or_default(),
            additional_properties: reader.take("additionalProperties"),
            nullable: reader.take("nullable"),
            x_nullable: reader.take("x-nullable"),
            description: reader.take("description"),
            malformed: false,
        };
        schema.malformed = reader.malformed;
        schema
    }
}

impl From<Value> for ShimSchema {
    fn from(raw: Value) -> Self {
        match raw {
            Value::Object(map) => Self::from_keywords(map),
            Value::Bool(_) => Self::default(),
            other => {
                warn!(schema = %other, "schema is not an object");
                Self {
                    malformed: true,
                    ..Self::default()
                }
            }
        }
    }
}

/// Takes keywords out of a raw schema object, remembering whether any had the wrong shape.
struct KeywordReader {
    map: Map<String, Value>,
    malformed: bool,
}

impl KeywordReader {
    fn take<T: DeserializeOwned>(&mut self, keyword: &str) -> Option<T> {
        let raw = self.map.remove(keyword)?;
        match serde_json::from_value(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(keyword, error = %e, "malformed schema keyword");
                self.malformed = true;
                None
            }
        }
    }
}

/// Decodes a field, falling back to its default when the value has the wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_else(|e| {
        warn!(error = %e, "malformed field replaced by its default");
        T::default()
    }))
}

/// A Media Type Object (only the schema is read).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShimMediaType {
    /// Schema of the payload.
    pub schema: Option<ShimSchema>,
}

/// A Parameter Object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShimParameter {
    /// Name of the parameter.
    pub name: String,
    /// Location of the parameter (path, query, header, cookie).
    #[serde(rename = "in")]
    pub parameter_in: String,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// A brief description of the parameter.
    #[serde(default)]
    pub description: Option<String>,
    /// Schema definition.
    #[serde(default)]
    pub schema: Option<ShimSchema>,
    /// Content map (complex parameter serialization).
    /// Mutually exclusive with `schema`.
    #[serde(default)]
    pub content: Option<IndexMap<String, ShimMediaType>>,
}

/// A Request Body Object.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShimRequestBody {
    /// Payload schemas keyed by media type.
    pub content: IndexMap<String, ShimMediaType>,
    /// Whether the body is mandatory.
    pub required: bool,
    /// Human readable description.
    pub description: Option<String>,
}

/// An Operation Object.
///
/// Summary, description and security are opaque to the type engine and are only
/// carried through for surrounding documentation strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShimOperation {
    /// Unique operation identifier.
    #[serde(rename = "operationId", deserialize_with = "lenient")]
    pub operation_id: Option<String>,
    /// Short summary.
    #[serde(deserialize_with = "lenient")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Operation tags.
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,
    /// Operation-level parameters.
    #[serde(deserialize_with = "lenient")]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// Request body.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RefOr<ShimRequestBody>>,
    /// Deprecation marker.
    #[serde(deserialize_with = "lenient")]
    pub deprecated: bool,
    /// Security requirements, kept raw.
    #[serde(deserialize_with = "lenient")]
    pub security: Option<Vec<Value>>,
}

/// Components object holding reusable definitions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShimComponents {
    /// Named schemas.
    #[serde(deserialize_with = "lenient")]
    pub schemas: IndexMap<String, ShimSchema>,
    /// Named parameters.
    #[serde(deserialize_with = "lenient")]
    pub parameters: IndexMap<String, RefOr<ShimParameter>>,
    /// Named request bodies.
    #[serde(rename = "requestBodies", deserialize_with = "lenient")]
    pub request_bodies: IndexMap<String, RefOr<ShimRequestBody>>,
}

/// Schema for the root document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShimOpenApi {
    /// OpenAPI version (e.g. "3.1.0").
    #[serde(deserialize_with = "lenient")]
    pub openapi: Option<String>,
    /// Metadata about the API, kept raw.
    pub info: Option<Value>,
    /// Components section used for reference resolution.
    #[serde(deserialize_with = "lenient")]
    pub components: Option<ShimComponents>,
    /// Path items, kept raw so that their shape can be validated by the operation walker.
    pub paths: Option<Value>,
}
