#![deny(missing_docs)]

//! # Type Synthesis
//!
//! Walks a schema graph and produces a TypeScript type expression.
//!
//! Self-referential graphs are handled with a path-local `visited` set of component
//! names threaded through every recursive call: re-entering a component already on the
//! current resolution path renders the opaque type instead of recursing. Recursion depth
//! is therefore bounded by the number of distinct components on one path.

use crate::oas::registry::ComponentTable;
use crate::oas::shims::{AdditionalProperties, ShimItems, ShimSchema};
use crate::synth::kind::{classify, SchemaKind, TypeTag};
use crate::synth::merge::PropertyBag;
use crate::synth::options::SynthOptions;
use crate::synth::render;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// Component names on the current resolution path.
pub type Visited = HashSet<String>;

/// A rendered expression plus whether `null` is already one of its union members.
struct Rendered {
    text: String,
    folds_null: bool,
}

impl Rendered {
    fn plain(text: String) -> Self {
        Self {
            text,
            folds_null: false,
        }
    }
}

/// Renders schema nodes against a component table.
///
/// Holds only shared references, so one synthesizer (or many) can be used from
/// several threads at once; each call owns its `visited` set.
#[derive(Debug, Clone, Copy)]
pub struct TypeSynthesizer<'a> {
    table: &'a ComponentTable,
    options: &'a SynthOptions,
}

impl<'a> TypeSynthesizer<'a> {
    /// Creates a synthesizer over `table`.
    pub fn new(table: &'a ComponentTable, options: &'a SynthOptions) -> Self {
        Self { table, options }
    }

    /// The component table this synthesizer resolves against.
    pub fn table(&self) -> &'a ComponentTable {
        self.table
    }

    /// The rendering options in use.
    pub fn options(&self) -> &'a SynthOptions {
        self.options
    }

    /// The opaque type expression.
    pub fn unknown(&self) -> &'a str {
        &self.options.unknown_type
    }

    /// Synthesizes the type expression of `node`.
    ///
    /// Pass an empty set for a fresh walk. Degenerate input (unresolvable references,
    /// cycles, missing item schemas) renders the opaque type rather than failing.
    pub fn synthesize(&self, node: &ShimSchema, visited: &Visited) -> String {
        self.render_node(node, visited).text
    }

    /// Synthesizes a named component, seeding `visited` with its own name.
    ///
    /// Returns `None` if the table has no schema of that name.
    pub fn synthesize_component(&self, name: &str) -> Option<String> {
        let resolved = self.table.schema(name)?;
        let visited = Visited::from([resolved.name.to_string()]);
        Some(self.synthesize(resolved.schema, &visited))
    }

    /// Synthesizes every component schema, in document order.
    pub fn component_types(&self) -> Vec<(String, String)> {
        self.table
            .schemas()
            .map(|(name, schema)| {
                let visited = Visited::from([name.to_string()]);
                (name.to_string(), self.synthesize(schema, &visited))
            })
            .collect()
    }

    /// Follows a `$ref` with the cycle guard applied.
    ///
    /// Returns the target node and the extended visited set, or `None` when the
    /// reference is unresolvable or already on the current path.
    pub(crate) fn enter_reference(
        &self,
        ref_str: &str,
        visited: &Visited,
    ) -> Option<(&'a ShimSchema, Visited)> {
        let resolved = self.table.resolve_schema(ref_str)?;
        if visited.contains(resolved.name) {
            debug!(reference = ref_str, "cyclic reference cut");
            return None;
        }
        let mut next = visited.clone();
        next.insert(resolved.name.to_string());
        Some((resolved.schema, next))
    }

    fn render_node(&self, node: &ShimSchema, visited: &Visited) -> Rendered {
        let rendered = match classify(node) {
            SchemaKind::Malformed => return Rendered::plain(self.unknown().to_string()),
            SchemaKind::Reference(r) => match self.enter_reference(r, visited) {
                Some((target, next)) => self.render_node(target, &next),
                None => Rendered::plain(self.unknown().to_string()),
            },
            SchemaKind::OneOf(members) | SchemaKind::AnyOf(members) => {
                self.render_union(members, visited)
            }
            SchemaKind::AllOf(members) => {
                Rendered::plain(self.merge_all_of(members, visited).render(self.unknown()))
            }
            SchemaKind::Enum(values) => self.render_literals(values, node.is_nullable()),
            SchemaKind::Const(value) => {
                self.render_literals(std::slice::from_ref(value), node.is_nullable())
            }
            SchemaKind::Typed(tags) => self.render_typed(&tags, node, visited),
        };

        if node.is_nullable() && !rendered.folds_null {
            Rendered {
                text: render::with_null(&rendered.text),
                folds_null: true,
            }
        } else {
            rendered
        }
    }

    fn render_union(&self, members: &[ShimSchema], visited: &Visited) -> Rendered {
        let parts: Vec<Rendered> = members
            .iter()
            .map(|m| self.render_node(m, visited))
            .collect();
        Rendered {
            folds_null: parts.iter().any(|p| p.folds_null),
            text: parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("|"),
        }
    }

    fn render_literals(&self, values: &[Value], nullable: bool) -> Rendered {
        let mut parts: Vec<String> = values
            .iter()
            .map(|v| render::literal(v, self.unknown()))
            .collect();
        let has_null = values.iter().any(Value::is_null);
        if nullable && !has_null {
            parts.push("null".to_string());
        }
        if parts.is_empty() {
            return Rendered::plain(self.unknown().to_string());
        }
        Rendered {
            text: parts.join("|"),
            folds_null: nullable || has_null,
        }
    }

    fn render_typed(&self, tags: &[TypeTag], node: &ShimSchema, visited: &Visited) -> Rendered {
        if tags.is_empty() {
            return Rendered::plain(self.unknown().to_string());
        }
        let parts: Vec<String> = tags
            .iter()
            .map(|tag| self.render_tag(*tag, node, visited))
            .collect();
        Rendered {
            text: parts.join("|"),
            folds_null: tags == [TypeTag::Null],
        }
    }

    fn render_tag(&self, tag: TypeTag, node: &ShimSchema, visited: &Visited) -> String {
        match tag {
            TypeTag::Array => self.render_array(node, visited),
            TypeTag::Object => self.render_object(node, visited),
            TypeTag::String => match node.format.as_deref() {
                Some("binary") => self.options.binary_type.clone(),
                _ => "string".to_string(),
            },
            TypeTag::Integer => match node.format.as_deref() {
                Some("int64") => self.options.int64_type.clone(),
                _ => "number".to_string(),
            },
            TypeTag::Number => "number".to_string(),
            TypeTag::Boolean => "boolean".to_string(),
            TypeTag::Null => "null".to_string(),
            TypeTag::File => self.options.binary_type.clone(),
            TypeTag::Unknown => self.unknown().to_string(),
        }
    }

    fn render_array(&self, node: &ShimSchema, visited: &Visited) -> String {
        if let Some(prefix) = &node.prefix_items {
            return self.render_tuple(prefix, visited);
        }
        match &node.items {
            Some(ShimItems::Single(item)) => render::array_of(&self.synthesize(item, visited)),
            Some(ShimItems::Tuple(items)) => self.render_tuple(items, visited),
            Some(ShimItems::Flag(false)) => "[]".to_string(),
            Some(ShimItems::Flag(true)) | None => render::array_of(self.unknown()),
        }
    }

    fn render_tuple(&self, items: &[ShimSchema], visited: &Visited) -> String {
        let parts: Vec<String> = items.iter().map(|i| self.synthesize(i, visited)).collect();
        format!("[{}]", parts.join(","))
    }

    fn render_object(&self, node: &ShimSchema, visited: &Visited) -> String {
        let has_properties = node.properties.as_ref().is_some_and(|p| !p.is_empty());
        if has_properties {
            return self.object_bag(node, visited).render(self.unknown());
        }
        match &node.additional_properties {
            Some(AdditionalProperties::Flag(false)) => "{}".to_string(),
            Some(AdditionalProperties::Flag(true)) | None => {
                render::index_signature(&self.options.index_key, self.unknown())
            }
            Some(AdditionalProperties::Schema(value)) => render::index_signature(
                &self.options.index_key,
                &self.synthesize(value, visited),
            ),
        }
    }

    /// Builds the property bag of a plain object node from its declared properties.
    pub(crate) fn object_bag(&self, node: &ShimSchema, visited: &Visited) -> PropertyBag {
        let mut bag = PropertyBag::new();
        if let Some(properties) = &node.properties {
            for (name, schema) in properties {
                bag.declare(
                    name.clone(),
                    self.synthesize(schema, visited),
                    node.is_required(name),
                );
            }
        }
        bag
    }
}
