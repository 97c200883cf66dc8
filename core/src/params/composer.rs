#![deny(missing_docs)]

//! # Input-Shape Composition
//!
//! Combines the placement groups and an optional body section into the single argument
//! type of one generated call-site function, e.g.
//! `{param:{id:string}}&{query:{limit?:number}}&{json:User}`.

use crate::oas::models::ParamSource;
use crate::params::projector::{ParameterDescriptor, PlacementGroups};
use crate::synth::render;
use crate::synth::types::{TypeSynthesizer, Visited};

/// One rendered field of a placement section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    /// Parameter name.
    pub name: String,
    /// Synthesized type expression.
    pub ty: String,
    /// Effective requiredness (always true for path parameters).
    pub required: bool,
}

/// A named placement section (`param`, `query`, `header`, `cookie`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSection {
    /// Section key in the composed shape.
    pub name: &'static str,
    /// Fields in projection order.
    pub fields: Vec<InputField>,
}

impl InputSection {
    fn render(&self) -> String {
        let inner = render::record(
            self.fields
                .iter()
                .map(|f| (f.name.as_str(), f.ty.as_str(), f.required)),
        );
        format!("{{{}:{}}}", self.name, inner)
    }
}

/// The composed argument type of one operation.
///
/// Only non-empty placement sections are kept, in path, query, header, cookie order,
/// followed by the body section when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputShape {
    /// Non-empty placement sections.
    pub sections: Vec<InputSection>,
    /// Pre-rendered body section, e.g. `{json:User}`.
    pub body: Option<String>,
}

impl InputShape {
    /// Synthesizes field types for every projected parameter.
    pub fn from_groups(synth: &TypeSynthesizer<'_>, groups: &PlacementGroups<'_>) -> Self {
        let sections = ParamSource::ORDER
            .iter()
            .filter_map(|placement| {
                let group = groups.group(*placement);
                if group.is_empty() {
                    return None;
                }
                Some(InputSection {
                    name: placement.section_name(),
                    fields: group.iter().map(|p| input_field(synth, p)).collect(),
                })
            })
            .collect();
        Self {
            sections,
            body: None,
        }
    }

    /// Attaches a body section.
    pub fn with_body(mut self, body: Option<String>) -> Self {
        self.body = body;
        self
    }

    /// Renders the sections intersected with `&`. Empty input renders `{}`.
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = self.sections.iter().map(InputSection::render).collect();
        if let Some(body) = &self.body {
            parts.push(body.clone());
        }
        if parts.is_empty() {
            "{}".to_string()
        } else {
            parts.join("&")
        }
    }
}

fn input_field(synth: &TypeSynthesizer<'_>, param: &ParameterDescriptor<'_>) -> InputField {
    let ty = match param.schema {
        Some(schema) => synth.synthesize(schema, &Visited::new()),
        None => synth.unknown().to_string(),
    };
    InputField {
        name: param.name.to_string(),
        ty,
        required: param.placement == ParamSource::Path || param.required,
    }
}

/// Composes placement groups and an optional body section into one type expression.
pub fn compose(
    synth: &TypeSynthesizer<'_>,
    groups: &PlacementGroups<'_>,
    body: Option<&str>,
) -> String {
    InputShape::from_groups(synth, groups)
        .with_body(body.map(str::to_string))
        .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::registry::ComponentTable;
    use crate::oas::shims::{RefOr, ShimParameter};
    use crate::params::projector::project;
    use crate::synth::options::SynthOptions;
    use pretty_assertions::assert_eq;

    fn compose_yaml(op_yaml: &str, path_yaml: &str, body: Option<&str>) -> String {
        let op: Vec<RefOr<ShimParameter>> = serde_yaml::from_str(op_yaml).unwrap();
        let inherited: Vec<RefOr<ShimParameter>> = serde_yaml::from_str(path_yaml).unwrap();
        let table = ComponentTable::new();
        let options = SynthOptions::default();
        let synth = TypeSynthesizer::new(&table, &options);
        let groups = project(&op, &inherited, |r| table.resolve_parameter(r));
        compose(&synth, &groups, body)
    }

    #[test]
    fn test_path_then_query() {
        let op = r#"
- {name: limit, in: query, schema: {type: integer}}
- {name: id, in: path, required: true, schema: {type: string}}
"#;
        assert_eq!(
            compose_yaml(op, "[]", None),
            "{param:{id:string}}&{query:{limit?:number}}"
        );
    }

    #[test]
    fn test_path_always_required() {
        let op = "- {name: id, in: path, schema: {type: string}}";
        assert_eq!(compose_yaml(op, "[]", None), "{param:{id:string}}");
    }

    #[test]
    fn test_all_placements_and_body() {
        let op = r#"
- {name: X-Request-Id, in: header, required: true, schema: {type: string}}
- {name: sid, in: cookie, schema: {type: string}}
- {name: q, in: query, required: true, schema: {type: string}}
"#;
        assert_eq!(
            compose_yaml(op, "[]", Some("{json:{a:string}}")),
            "{query:{q:string}}&{header:{'X-Request-Id':string}}&{cookie:{sid?:string}}&{json:{a:string}}"
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(compose_yaml("[]", "[]", None), "{}");
    }

    #[test]
    fn test_body_only() {
        assert_eq!(compose_yaml("[]", "[]", Some("{form:{f:File}}")), "{form:{f:File}}");
    }

    #[test]
    fn test_missing_schema_is_unknown() {
        assert_eq!(
            compose_yaml("- {name: raw, in: query}", "[]", None),
            "{query:{raw?:unknown}}"
        );
    }

    #[test]
    fn test_inherited_duplicates_are_appended() {
        let op = "- {name: v, in: query, schema: {type: integer}}";
        let inherited = "- {name: v, in: query, schema: {type: string}}";
        assert_eq!(
            compose_yaml(op, inherited, None),
            "{query:{v?:number;v?:string}}"
        );
    }
}
