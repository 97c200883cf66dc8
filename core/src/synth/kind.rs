#![deny(missing_docs)]

//! # Schema Classification
//!
//! Decides which keyword of a schema node governs its rendering.
//!
//! Precedence is fixed: `$ref` > `oneOf` > `anyOf` > `allOf` > `enum` > `const` > typed.
//! Empty combinator lists do not count as present. Malformed nodes are classified before
//! anything else.

use crate::oas::shims::ShimSchema;
use serde_json::Value;

/// A single `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `array`
    Array,
    /// `object`
    Object,
    /// Swagger 2.0 `file`
    File,
    /// Any unrecognised tag.
    Unknown,
}

impl TypeTag {
    /// Maps a `type` keyword value to a tag.
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => TypeTag::String,
            "number" => TypeTag::Number,
            "integer" => TypeTag::Integer,
            "boolean" => TypeTag::Boolean,
            "null" => TypeTag::Null,
            "array" => TypeTag::Array,
            "object" => TypeTag::Object,
            "file" => TypeTag::File,
            _ => TypeTag::Unknown,
        }
    }
}

/// The governing keyword of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind<'a> {
    /// `$ref`
    Reference(&'a str),
    /// `oneOf` with at least one member.
    OneOf(&'a [ShimSchema]),
    /// `anyOf` with at least one member.
    AnyOf(&'a [ShimSchema]),
    /// `allOf` with at least one member.
    AllOf(&'a [ShimSchema]),
    /// `enum` literals.
    Enum(&'a [Value]),
    /// `const` literal.
    Const(&'a Value),
    /// A node whose own keywords had the wrong shape.
    Malformed,
    /// Type tags, with `null` removed unless it is the only one.
    /// Empty when nothing at all can be inferred.
    Typed(Vec<TypeTag>),
}

/// Classifies a node.
pub fn classify(node: &ShimSchema) -> SchemaKind<'_> {
    if node.malformed {
        return SchemaKind::Malformed;
    }
    if let Some(r) = node.reference.as_deref() {
        return SchemaKind::Reference(r);
    }
    if let Some(members) = non_empty(&node.one_of) {
        return SchemaKind::OneOf(members);
    }
    if let Some(members) = non_empty(&node.any_of) {
        return SchemaKind::AnyOf(members);
    }
    if let Some(members) = non_empty(&node.all_of) {
        return SchemaKind::AllOf(members);
    }
    if let Some(values) = node.enum_values.as_deref() {
        return SchemaKind::Enum(values);
    }
    if let Some(value) = node.const_value.as_ref() {
        return SchemaKind::Const(value);
    }
    SchemaKind::Typed(type_tags(node))
}

fn non_empty(list: &Option<Vec<ShimSchema>>) -> Option<&[ShimSchema]> {
    list.as_deref().filter(|l| !l.is_empty())
}

/// Returns the effective type tags of a node.
///
/// `null` folds into nullability and is dropped unless it is the only tag. Without a
/// `type` keyword, object keywords imply `object` and item keywords imply `array`.
pub fn type_tags(node: &ShimSchema) -> Vec<TypeTag> {
    if let Some(set) = &node.schema_type {
        let all: Vec<TypeTag> = set.tags().into_iter().map(TypeTag::from_name).collect();
        let non_null: Vec<TypeTag> = all
            .iter()
            .copied()
            .filter(|t| *t != TypeTag::Null)
            .collect();
        if non_null.is_empty() && !all.is_empty() {
            return vec![TypeTag::Null];
        }
        return non_null;
    }

    if node.properties.is_some() || node.additional_properties.is_some() {
        vec![TypeTag::Object]
    } else if node.items.is_some() || node.prefix_items.is_some() {
        vec![TypeTag::Array]
    } else {
        Vec::new()
    }
}

/// Returns true when the node renders through the object path.
pub fn is_object_like(node: &ShimSchema) -> bool {
    matches!(classify(node), SchemaKind::Typed(tags) if tags.contains(&TypeTag::Object))
}
