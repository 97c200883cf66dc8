#![deny(missing_docs)]

//! # Operation Walker
//!
//! Walks `paths` and produces one composed input shape per operation.
//!
//! `paths` must be a map of maps; anything else aborts the run with a structural
//! error. Inside a path item, only HTTP method keys are treated as operations and
//! the item's own `parameters` are inherited by each of them. An operation that is not
//! an object is skipped with a warning.

use crate::error::{AppError, AppResult};
use crate::oas::models::OperationInput;
use crate::oas::shims::{RefOr, ShimOpenApi, ShimOperation, ShimParameter};
use crate::params::{compose, project, request_body_section};
use crate::synth::{SynthOptions, TypeSynthesizer};
use serde_json::{Map, Value as JsonValue};
use tracing::{trace, warn};

/// HTTP methods recognised as operation keys of a Path Item.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Walks every operation of `doc`, in document order.
pub fn collect_operation_inputs(
    doc: &ShimOpenApi,
    options: &SynthOptions,
) -> AppResult<Vec<OperationInput>> {
    let table = doc.component_table();
    let synth = TypeSynthesizer::new(&table, options);

    let paths = match &doc.paths {
        None | Some(JsonValue::Null) => return Ok(Vec::new()),
        Some(JsonValue::Object(paths)) => paths,
        Some(_) => {
            return Err(AppError::Structure(
                "'paths' must be a map of path items".into(),
            ))
        }
    };

    let mut inputs = Vec::new();
    for (path, item) in paths {
        if path.starts_with("x-") {
            continue;
        }
        let JsonValue::Object(item) = item else {
            return Err(AppError::Structure(format!(
                "Path item '{}' must be a map of operations",
                path
            )));
        };
        collect_path_item(&synth, path, item, &mut inputs);
    }
    Ok(inputs)
}

fn collect_path_item(
    synth: &TypeSynthesizer<'_>,
    path: &str,
    item: &Map<String, JsonValue>,
    inputs: &mut Vec<OperationInput>,
) {
    let inherited: Vec<RefOr<ShimParameter>> = match item.get("parameters") {
        Some(raw) => serde_json::from_value(raw.clone()).unwrap_or_else(|e| {
            warn!(path, error = %e, "path item parameters ignored");
            Vec::new()
        }),
        None => Vec::new(),
    };

    for (key, raw_op) in item {
        let method = key.to_ascii_lowercase();
        if !HTTP_METHODS.contains(&method.as_str()) {
            continue;
        }
        match serde_json::from_value::<ShimOperation>(raw_op.clone()) {
            Ok(op) => inputs.push(operation_input(synth, path, &method, &op, &inherited)),
            Err(e) => warn!(path, method = %method, error = %e, "malformed operation skipped"),
        }
    }
}

/// Builds the input shape of a single operation.
pub fn operation_input(
    synth: &TypeSynthesizer<'_>,
    path: &str,
    method: &str,
    op: &ShimOperation,
    inherited: &[RefOr<ShimParameter>],
) -> OperationInput {
    let table = synth.table();
    let groups = project(&op.parameters, inherited, |r| table.resolve_parameter(r));
    let body = op
        .request_body
        .as_ref()
        .and_then(|b| request_body_section(synth, b));
    let input_type = compose(synth, &groups, body.as_deref());
    trace!(path, method, input = %input_type, "composed operation input");

    OperationInput {
        path: path.to_string(),
        method: method.to_ascii_uppercase(),
        operation_id: op.operation_id.clone(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        deprecated: op.deprecated,
        input_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::parse_document;
    use pretty_assertions::assert_eq;

    fn inputs(yaml: &str) -> AppResult<Vec<OperationInput>> {
        let doc = parse_document(yaml)?;
        collect_operation_inputs(&doc, &SynthOptions::default())
    }

    #[test]
    fn test_walks_operations_in_document_order() {
        let yaml = r#"
openapi: 3.1.0
paths:
  /users:
    post:
      operationId: createUser
      requestBody:
        content:
          application/json:
            schema: {type: object, required: [name], properties: {name: {type: string}}}
    get:
      operationId: listUsers
      summary: List users
"#;
        let ops = inputs(yaml).unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].method, "POST");
        assert_eq!(ops[0].input_type, "{json:{name:string}}");
        assert_eq!(ops[1].operation_id.as_deref(), Some("listUsers"));
        assert_eq!(ops[1].summary.as_deref(), Some("List users"));
        assert_eq!(ops[1].input_type, "{}");
    }

    #[test]
    fn test_path_item_parameters_are_inherited() {
        let yaml = r#"
openapi: 3.1.0
paths:
  /items/{id}:
    summary: not an operation
    parameters:
      - {name: id, in: path, required: true, schema: {type: string}}
    get:
      parameters:
        - {name: limit, in: query, schema: {type: integer}}
    delete: {}
"#;
        let ops = inputs(yaml).unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].input_type, "{param:{id:string}}&{query:{limit?:number}}");
        assert_eq!(ops[1].method, "DELETE");
        assert_eq!(ops[1].input_type, "{param:{id:string}}");
    }

    #[test]
    fn test_paths_must_be_a_map() {
        let err = inputs("openapi: 3.1.0\npaths: [a, b]").unwrap_err();
        assert!(matches!(err, AppError::Structure(_)));
    }

    #[test]
    fn test_path_item_must_be_a_map() {
        let err = inputs("openapi: 3.1.0\npaths:\n  /a: 42").unwrap_err();
        assert!(matches!(err, AppError::Structure(_)));
    }

    #[test]
    fn test_malformed_operation_skipped() {
        let yaml = r#"
openapi: 3.1.0
paths:
  /a:
    get:
      parameters:
        - {name: id, in: query, schema: {type: string}}
  /b:
    get: 5
    post:
      parameters:
        - {name: broken}
        - {name: q, in: query, required: true, schema: {type: string}}
"#;
        let ops = inputs(yaml).unwrap();
        let shapes: Vec<_> = ops
            .iter()
            .map(|o| (o.method.as_str(), o.path.as_str(), o.input_type.as_str()))
            .collect();
        assert_eq!(
            shapes,
            vec![
                ("GET", "/a", "{query:{id?:string}}"),
                ("POST", "/b", "{query:{q:string}}"),
            ]
        );
    }

    #[test]
    fn test_malformed_path_parameters_ignored() {
        let yaml = r#"
openapi: 3.1.0
paths:
  /c:
    parameters: not-a-list
    get: {}
"#;
        let ops = inputs(yaml).unwrap();
        assert_eq!(ops[0].input_type, "{}");
    }

    #[test]
    fn test_missing_paths_is_empty() {
        assert!(inputs("openapi: 3.1.0").unwrap().is_empty());
    }

    #[test]
    fn test_extension_keys_ignored() {
        let yaml = r#"
openapi: 3.1.0
paths:
  x-internal: true
  /ping:
    x-rate-limit: 5
    get: {}
"#;
        let ops = inputs(yaml).unwrap();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].path, "/ping");
    }
}
