#![deny(missing_docs)]

//! # Request Body Section
//!
//! Picks the body payload of an operation and renders it as an input-shape section.
//!
//! JSON media types (`application/json` or any `+json` suffix) become `{json:T}`.
//! Form media types (`multipart/form-data`, `application/x-www-form-urlencoded`) become
//! `{form:T}`. JSON wins when both are declared. Other media types produce no section.

use crate::oas::shims::{RefOr, ShimMediaType, ShimRequestBody};
use crate::synth::types::{TypeSynthesizer, Visited};
use tracing::{debug, warn};

/// The section key a media type binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// `json`
    Json,
    /// `form`
    Form,
}

impl BodyFormat {
    /// Classifies a media type, ignoring parameters such as `; charset=utf-8`.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence == "application/json" || essence.ends_with("+json") {
            Some(BodyFormat::Json)
        } else if essence == "multipart/form-data"
            || essence == "application/x-www-form-urlencoded"
        {
            Some(BodyFormat::Form)
        } else {
            None
        }
    }

    /// Section key.
    pub fn section_name(self) -> &'static str {
        match self {
            BodyFormat::Json => "json",
            BodyFormat::Form => "form",
        }
    }
}

fn pick_media(body: &ShimRequestBody) -> Option<(BodyFormat, &ShimMediaType)> {
    let classified = || {
        body.content
            .iter()
            .filter_map(|(mt, media)| BodyFormat::from_media_type(mt).map(|f| (f, media)))
    };
    classified()
        .find(|(f, _)| *f == BodyFormat::Json)
        .or_else(|| classified().next())
}

/// Renders the body section of an operation, or `None` when the body is absent, cannot
/// be resolved, or has no JSON/form media type.
pub fn request_body_section(
    synth: &TypeSynthesizer<'_>,
    body: &RefOr<ShimRequestBody>,
) -> Option<String> {
    let body = match body {
        RefOr::T(body) => body,
        RefOr::Ref(r) => match synth.table().resolve_request_body(&r.ref_location) {
            Some(body) => body,
            None => {
                debug!(reference = %r.ref_location, "unresolvable request body reference");
                return None;
            }
        },
        RefOr::Malformed(raw) => {
            warn!(body = %raw, "malformed request body ignored");
            return None;
        }
    };

    let Some((format, media)) = pick_media(body) else {
        debug!("request body has no json or form media type");
        return None;
    };
    let ty = match &media.schema {
        Some(schema) => synth.synthesize(schema, &Visited::new()),
        None => synth.unknown().to_string(),
    };
    Some(format!("{{{}:{}}}", format.section_name(), ty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::registry::ComponentTable;
    use crate::synth::options::SynthOptions;

    fn section(table: &ComponentTable, yaml: &str) -> Option<String> {
        let options = SynthOptions::default();
        let synth = TypeSynthesizer::new(table, &options);
        let body: RefOr<ShimRequestBody> = serde_yaml::from_str(yaml).unwrap();
        request_body_section(&synth, &body)
    }

    #[test]
    fn test_media_type_classification() {
        assert_eq!(
            BodyFormat::from_media_type("application/json; charset=utf-8"),
            Some(BodyFormat::Json)
        );
        assert_eq!(
            BodyFormat::from_media_type("application/merge-patch+json"),
            Some(BodyFormat::Json)
        );
        assert_eq!(
            BodyFormat::from_media_type("multipart/form-data"),
            Some(BodyFormat::Form)
        );
        assert_eq!(BodyFormat::from_media_type("text/plain"), None);
    }

    #[test]
    fn test_json_body() {
        let table = ComponentTable::new()
            .with_schema("User", serde_yaml::from_str("properties: {name: {type: string}}").unwrap());
        let yaml = r#"
content:
  application/json:
    schema: {$ref: '#/components/schemas/User'}
"#;
        assert_eq!(section(&table, yaml).as_deref(), Some("{json:{name?:string}}"));
    }

    #[test]
    fn test_json_preferred_over_form() {
        let yaml = r#"
content:
  multipart/form-data:
    schema: {properties: {file: {type: string, format: binary}}}
  application/json:
    schema: {type: string}
"#;
        assert_eq!(section(&ComponentTable::new(), yaml).as_deref(), Some("{json:string}"));
    }

    #[test]
    fn test_form_body() {
        let yaml = r#"
content:
  multipart/form-data:
    schema: {properties: {file: {type: string, format: binary}}}
"#;
        assert_eq!(
            section(&ComponentTable::new(), yaml).as_deref(),
            Some("{form:{file?:File}}")
        );
    }

    #[test]
    fn test_referenced_body() {
        let table = ComponentTable::new().with_request_body(
            "Upload",
            serde_yaml::from_str("content: {application/json: {schema: {type: boolean}}}").unwrap(),
        );
        assert_eq!(
            section(&table, "$ref: '#/components/requestBodies/Upload'").as_deref(),
            Some("{json:boolean}")
        );
        assert_eq!(section(&table, "$ref: '#/components/requestBodies/Nope'"), None);
    }

    #[test]
    fn test_malformed_body() {
        assert_eq!(section(&ComponentTable::new(), "content: 5"), None);
    }

    #[test]
    fn test_unsupported_media_type() {
        let yaml = "content: {text/plain: {schema: {type: string}}}";
        assert_eq!(section(&ComponentTable::new(), yaml), None);
    }
}
