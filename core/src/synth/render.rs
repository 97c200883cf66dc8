//! # Rendering Helpers
//!
//! Small string builders shared by the synthesizer, the merger and the input-shape
//! composer. Output is compact TypeScript with no insignificant whitespace.

use regex::Regex;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Renders a property key, quoting it when it is not a valid identifier.
pub fn property_key(name: &str) -> Cow<'_, str> {
    static IDENT_RE: OnceLock<Regex> = OnceLock::new();
    let ident_re =
        IDENT_RE.get_or_init(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("Invalid regex"));
    if ident_re.is_match(name) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(string_literal(name))
    }
}

/// Renders a single-quoted string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Renders an enum/const literal. Non-scalar literals have no literal type and fall back
/// to `unknown`.
pub fn literal(value: &Value, unknown: &str) -> String {
    match value {
        Value::String(s) => string_literal(s),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(_) | Value::Object(_) => unknown.to_string(),
    }
}

/// Renders a structural record from `(key, type, required)` triples in the given order.
///
/// Keys are not de-duplicated.
pub fn record<'a, I>(fields: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str, bool)>,
{
    let body: Vec<String> = fields
        .into_iter()
        .map(|(key, ty, required)| {
            let marker = if required { "" } else { "?" };
            format!("{}{}:{}", property_key(key), marker, ty)
        })
        .collect();
    format!("{{{}}}", body.join(";"))
}

/// Renders an index signature `{[key:string]:T}`.
pub fn index_signature(key: &str, value_ty: &str) -> String {
    format!("{{[{}:string]:{}}}", key, value_ty)
}

/// Wraps an expression as `(T|null)`.
pub fn with_null(expr: &str) -> String {
    format!("({}|null)", expr)
}

/// Renders `T[]`, parenthesizing `T` when it is a bare union or intersection.
pub fn array_of(item: &str) -> String {
    if has_top_level_operator(item) {
        format!("({})[]", item)
    } else {
        format!("{}[]", item)
    }
}

/// Returns true when `expr` contains `|` or `&` outside brackets and string literals.
pub fn has_top_level_operator(expr: &str) -> bool {
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;
    for c in expr.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '\'' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '\'' => in_string = true,
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth -= 1,
            '|' | '&' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_key_quoting() {
        assert_eq!(property_key("id"), "id");
        assert_eq!(property_key("$meta"), "$meta");
        assert_eq!(property_key("x-request-id"), "'x-request-id'");
        assert_eq!(property_key("2fa"), "'2fa'");
        assert_eq!(property_key("it's"), "'it\\'s'");
    }

    #[test]
    fn test_literals() {
        assert_eq!(literal(&json!("a"), "unknown"), "'a'");
        assert_eq!(literal(&json!(42), "unknown"), "42");
        assert_eq!(literal(&json!(1.5), "unknown"), "1.5");
        assert_eq!(literal(&json!(false), "unknown"), "false");
        assert_eq!(literal(&json!(null), "unknown"), "null");
        assert_eq!(literal(&json!({"a": 1}), "unknown"), "unknown");
    }

    #[test]
    fn test_record() {
        assert_eq!(record(Vec::new()), "{}");
        assert_eq!(
            record(vec![("a", "string", true), ("b", "number", false)]),
            "{a:string;b?:number}"
        );
    }

    #[test]
    fn test_array_wrapping() {
        assert_eq!(array_of("string"), "string[]");
        assert_eq!(array_of("string|number"), "(string|number)[]");
        assert_eq!(array_of("(string|null)"), "(string|null)[]");
        assert_eq!(array_of("{a:string|number}"), "{a:string|number}[]");
        assert_eq!(array_of("'a|b'"), "'a|b'[]");
    }
}
