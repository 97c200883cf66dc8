#![deny(missing_docs)]

//! # Reference Utilities
//!
//! Parses local `$ref` pointers of the form `#/components/{category}/{name}`.
//!
//! These utilities never fetch external documents: anything that is not a local
//! component pointer is reported as `None` and rendered as the opaque type upstream.

use percent_encoding::percent_decode_str;

/// The component section a reference points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentCategory {
    /// `#/components/schemas/...`
    Schemas,
    /// `#/components/parameters/...`
    Parameters,
    /// `#/components/requestBodies/...`
    RequestBodies,
    /// Any other section (responses, headers, ...). Never resolved by this crate.
    Other(String),
}

impl ComponentCategory {
    fn from_segment(segment: &str) -> Self {
        match segment {
            "schemas" => ComponentCategory::Schemas,
            "parameters" => ComponentCategory::Parameters,
            "requestBodies" => ComponentCategory::RequestBodies,
            other => ComponentCategory::Other(other.to_string()),
        }
    }
}

/// A parsed local component reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef {
    /// Section of `components`.
    pub category: ComponentCategory,
    /// Decoded component name.
    pub name: String,
}

/// Parses a `$ref` string into its category and final name.
///
/// Returns `None` for external references, pointers outside `components`,
/// and pointers that go deeper than `#/components/{category}/{name}`.
pub fn parse_component_ref(ref_str: &str) -> Option<ComponentRef> {
    let pointer = ref_str.strip_prefix("#/")?;
    let segments: Vec<&str> = pointer.split('/').collect();

    if segments.len() != 3 || segments[0] != "components" {
        return None;
    }

    let name = decode_pointer_segment(segments[2]);
    if name.is_empty() {
        return None;
    }

    Some(ComponentRef {
        category: ComponentCategory::from_segment(segments[1]),
        name,
    })
}

/// Decodes a JSON Pointer segment (handles `~1`, `~0` and percent-encoding).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    let decoded = segment.replace("~1", "/").replace("~0", "~");
    percent_decode_str(&decoded)
        .decode_utf8_lossy()
        .into_owned()
}
