#![deny(missing_docs)]

//! # Parameter Projection
//!
//! Groups an operation's parameters by placement.
//!
//! Operation-level parameters come first and path-item-level parameters are appended
//! after them. Parameters sharing a name across the two levels are kept as they are,
//! not de-duplicated: the operation-level entry is simply rendered first.

use crate::oas::models::ParamSource;
use crate::oas::shims::{RefOr, ShimParameter, ShimSchema};
use tracing::warn;

/// One request parameter after reference resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDescriptor<'a> {
    /// Parameter name.
    pub name: &'a str,
    /// Binding location.
    pub placement: ParamSource,
    /// The declared `required` flag.
    pub required: bool,
    /// The direct schema, or the schema of the first declared media type.
    /// `None` when neither is present.
    pub schema: Option<&'a ShimSchema>,
}

impl<'a> ParameterDescriptor<'a> {
    /// Builds a descriptor from an inline parameter.
    ///
    /// Returns `None` for locations outside path/query/header/cookie.
    pub fn from_shim(param: &'a ShimParameter) -> Option<Self> {
        let placement = ParamSource::from_location(&param.parameter_in)?;
        let schema = param.schema.as_ref().or_else(|| {
            param
                .content
                .as_ref()
                .and_then(|content| content.values().next())
                .and_then(|media| media.schema.as_ref())
        });
        Some(Self {
            name: &param.name,
            placement,
            required: param.required,
            schema,
        })
    }
}

/// Parameters grouped by placement, each group in projection order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacementGroups<'a> {
    /// Path parameters.
    pub path: Vec<ParameterDescriptor<'a>>,
    /// Query parameters.
    pub query: Vec<ParameterDescriptor<'a>>,
    /// Header parameters.
    pub header: Vec<ParameterDescriptor<'a>>,
    /// Cookie parameters.
    pub cookie: Vec<ParameterDescriptor<'a>>,
}

impl<'a> PlacementGroups<'a> {
    /// Returns the group for a placement.
    pub fn group(&self, placement: ParamSource) -> &[ParameterDescriptor<'a>] {
        match placement {
            ParamSource::Path => &self.path,
            ParamSource::Query => &self.query,
            ParamSource::Header => &self.header,
            ParamSource::Cookie => &self.cookie,
        }
    }

    /// Returns true when no parameter was projected.
    pub fn is_empty(&self) -> bool {
        ParamSource::ORDER.iter().all(|p| self.group(*p).is_empty())
    }

    fn push(&mut self, descriptor: ParameterDescriptor<'a>) {
        match descriptor.placement {
            ParamSource::Path => self.path.push(descriptor),
            ParamSource::Query => self.query.push(descriptor),
            ParamSource::Header => self.header.push(descriptor),
            ParamSource::Cookie => self.cookie.push(descriptor),
        }
    }
}

/// Projects operation-level and path-item-level parameters into placement groups.
///
/// `resolve_param_ref` looks up `$ref` parameters in the parameters section of the
/// components (not the schema table). Malformed entries, unresolvable references and
/// unsupported locations are skipped with a warning.
pub fn project<'a, F>(
    operation_params: &'a [RefOr<ShimParameter>],
    path_params: &'a [RefOr<ShimParameter>],
    resolve_param_ref: F,
) -> PlacementGroups<'a>
where
    F: Fn(&str) -> Option<&'a ShimParameter>,
{
    let mut groups = PlacementGroups::default();

    for param_or_ref in operation_params.iter().chain(path_params) {
        let param = match param_or_ref {
            RefOr::T(param) => param,
            RefOr::Ref(r) => match resolve_param_ref(&r.ref_location) {
                Some(param) => param,
                None => {
                    warn!(reference = %r.ref_location, "unresolvable parameter reference skipped");
                    continue;
                }
            },
            RefOr::Malformed(raw) => {
                warn!(parameter = %raw, "malformed parameter skipped");
                continue;
            }
        };

        match ParameterDescriptor::from_shim(param) {
            Some(descriptor) => groups.push(descriptor),
            None => warn!(
                name = %param.name,
                location = %param.parameter_in,
                "parameter location not projected"
            ),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::registry::ComponentTable;

    fn params(yaml: &str) -> Vec<RefOr<ShimParameter>> {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_groups_by_placement() {
        let op = params(
            r#"
- {name: id, in: path, required: true, schema: {type: string}}
- {name: limit, in: query, schema: {type: integer}}
- {name: X-Trace, in: header, schema: {type: string}}
- {name: session, in: cookie, schema: {type: string}}
"#,
        );
        let table = ComponentTable::new();
        let groups = project(&op, &[], |r| table.resolve_parameter(r));
        assert_eq!(groups.path.len(), 1);
        assert_eq!(groups.query[0].name, "limit");
        assert!(!groups.query[0].required);
        assert_eq!(groups.header[0].name, "X-Trace");
        assert_eq!(groups.cookie[0].placement, ParamSource::Cookie);
    }

    #[test]
    fn test_operation_params_first_no_dedup() {
        let op = params("- {name: page, in: query, required: true, schema: {type: integer}}");
        let inherited = params(
            r#"
- {name: page, in: query, schema: {type: string}}
- {name: tenant, in: query, schema: {type: string}}
"#,
        );
        let table = ComponentTable::new();
        let groups = project(&op, &inherited, |r| table.resolve_parameter(r));
        let names: Vec<_> = groups.query.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["page", "page", "tenant"]);
        assert!(groups.query[0].required);
        assert!(!groups.query[1].required);
    }

    #[test]
    fn test_reference_resolved_through_parameters_section() {
        let table = ComponentTable::new().with_parameter(
            "Limit",
            RefOr::T(serde_yaml::from_str("{name: limit, in: query, schema: {type: integer}}").unwrap()),
        );
        let op = params(
            r#"
- $ref: '#/components/parameters/Limit'
- $ref: '#/components/parameters/Missing'
"#,
        );
        let groups = project(&op, &[], |r| table.resolve_parameter(r));
        assert_eq!(groups.query.len(), 1);
        assert_eq!(groups.query[0].name, "limit");
    }

    #[test]
    fn test_content_negotiated_uses_first_media_type() {
        let op = params(
            r#"
- name: filter
  in: query
  content:
    application/json:
      schema: {type: object}
    text/plain:
      schema: {type: string}
"#,
        );
        let groups = project(&op, &[], |_| None);
        let schema = groups.query[0].schema.unwrap();
        assert!(schema.schema_type.as_ref().unwrap().tags() == vec!["object"]);
    }

    #[test]
    fn test_malformed_parameter_skipped() {
        let op = params(
            r#"
- {name: broken}
- {name: limit, in: query, schema: {type: integer}}
"#,
        );
        let groups = project(&op, &[], |_| None);
        assert_eq!(groups.query.len(), 1);
        assert_eq!(groups.query[0].name, "limit");
    }

    #[test]
    fn test_unsupported_location_skipped() {
        let op = params("- {name: q, in: querystring, content: {application/json: {schema: {type: object}}}}");
        let groups = project(&op, &[], |_| None);
        assert!(groups.is_empty());
    }
}
