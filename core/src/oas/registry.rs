#![deny(missing_docs)]

//! # Component Table
//!
//! Flat name -> definition maps for the reusable sections of a document, and the
//! reference resolver built on top of them.
//!
//! The table is built once per generation run and only read afterwards, so it can be
//! shared by any number of concurrent synthesis passes.

use crate::oas::ref_utils::{parse_component_ref, ComponentCategory};
use crate::oas::shims::{RefOr, ShimComponents, ShimParameter, ShimRequestBody, ShimSchema};
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// A schema found through the table, together with its component name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSchema<'a> {
    /// Component name, used as the cycle-guard identifier.
    pub name: &'a str,
    /// The component's schema node.
    pub schema: &'a ShimSchema,
}

/// Registry of named schemas, parameters and request bodies.
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    schemas: IndexMap<String, ShimSchema>,
    parameters: IndexMap<String, RefOr<ShimParameter>>,
    request_bodies: IndexMap<String, RefOr<ShimRequestBody>>,
}

impl From<ShimComponents> for ComponentTable {
    fn from(components: ShimComponents) -> Self {
        Self {
            schemas: components.schemas,
            parameters: components.parameters,
            request_bodies: components.request_bodies,
        }
    }
}

impl ComponentTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a named schema.
    pub fn with_schema(mut self, name: impl Into<String>, schema: ShimSchema) -> Self {
        self.schemas.insert(name.into(), schema);
        self
    }

    /// Adds (or replaces) a named parameter.
    pub fn with_parameter(mut self, name: impl Into<String>, param: RefOr<ShimParameter>) -> Self {
        self.parameters.insert(name.into(), param);
        self
    }

    /// Adds (or replaces) a named request body.
    pub fn with_request_body(
        mut self,
        name: impl Into<String>,
        body: RefOr<ShimRequestBody>,
    ) -> Self {
        self.request_bodies.insert(name.into(), body);
        self
    }

    /// Iterates named schemas in document order.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &ShimSchema)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Looks up a schema by bare component name.
    pub fn schema(&self, name: &str) -> Option<ResolvedSchema<'_>> {
        self.schemas
            .get_key_value(name)
            .map(|(name, schema)| ResolvedSchema {
                name: name.as_str(),
                schema,
            })
    }

    /// Resolves a schema `$ref`.
    ///
    /// Only `#/components/schemas/{name}` participates. Other categories, external
    /// references and absent names resolve to `None`, which callers render as the
    /// opaque type. The returned node may itself be a reference; following it is the
    /// caller's job so that the caller's cycle guard covers the whole chain.
    pub fn resolve_schema(&self, ref_str: &str) -> Option<ResolvedSchema<'_>> {
        let Some(target) = parse_component_ref(ref_str) else {
            debug!(reference = ref_str, "schema reference is not a local component pointer");
            return None;
        };
        if target.category != ComponentCategory::Schemas {
            debug!(reference = ref_str, "reference does not point at a schema component");
            return None;
        }
        let resolved = self.schema(&target.name);
        if resolved.is_none() {
            debug!(reference = ref_str, "schema component not found");
        }
        resolved
    }

    /// Resolves a parameter `$ref` through `#/components/parameters`, following
    /// reference chains until an inline definition is reached.
    pub fn resolve_parameter(&self, ref_str: &str) -> Option<&ShimParameter> {
        resolve_chain(&self.parameters, ComponentCategory::Parameters, ref_str)
    }

    /// Resolves a request body `$ref` through `#/components/requestBodies`, following
    /// reference chains until an inline definition is reached.
    pub fn resolve_request_body(&self, ref_str: &str) -> Option<&ShimRequestBody> {
        resolve_chain(
            &self.request_bodies,
            ComponentCategory::RequestBodies,
            ref_str,
        )
    }
}

fn resolve_chain<'a, T>(
    section: &'a IndexMap<String, RefOr<T>>,
    category: ComponentCategory,
    ref_str: &str,
) -> Option<&'a T> {
    let mut seen = HashSet::new();
    let mut current = ref_str.to_string();
    loop {
        let target = parse_component_ref(&current)?;
        if target.category != category || !seen.insert(target.name.clone()) {
            return None;
        }
        match section.get(&target.name)? {
            RefOr::T(item) => return Some(item),
            RefOr::Ref(next) => current = next.ref_location.clone(),
            RefOr::Malformed(_) => {
                debug!(reference = ref_str, "reference target is malformed");
                return None;
            }
        }
    }
}
