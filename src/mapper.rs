//! Field mapping between the API payloads and the storage columns.
//!
//! API payloads speak lower camelCase and allow nested structures
//! (experience entries, education entries, language/proficiency pairs,
//! certifications) either as free text or as JSON values. Storage keeps
//! snake_case columns and flattens every nested structure into a
//! JSON-encoded TEXT column; skills land in a native array column. The
//! camelCase edge itself is handled by `#[serde(rename_all = "camelCase")]`
//! on the DTOs; everything that is not a pure rename lives here so no
//! handler re-derives the translation on its own.

use serde_json::Value;

/// Encode a nested payload field for a JSON-text column.
///
/// A value that already arrived as a JSON string is stored verbatim —
/// serializing it again would double-encode it. Absent fields collapse to
/// the empty string.
pub fn nested_to_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Partial-update variant of [`nested_to_text`]: `None` stays `None` so a
/// COALESCE update leaves the stored column untouched.
pub fn nested_patch(value: Option<&Value>) -> Option<String> {
    value.map(|v| nested_to_text(Some(v)))
}

/// Normalize a skills field to an order-preserving list.
///
/// Accepts a JSON array of strings or a comma-separated string
/// (`"JS,SQL"` becomes `["JS", "SQL"]`). Non-string array entries are
/// stringified rather than dropped silently; anything else maps to an
/// empty list.
pub fn skills_to_vec(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(raw)) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

pub fn skills_patch(value: Option<&Value>) -> Option<Vec<String>> {
    value.map(|v| skills_to_vec(Some(v)))
}

/// Availability is a yes/no flag in storage; absent or unrecognized input
/// defaults to `no`.
pub fn availability_or_default(value: Option<&str>) -> String {
    match value {
        Some(v) if v.eq_ignore_ascii_case("yes") => "yes".to_string(),
        _ => "no".to_string(),
    }
}

pub fn availability_patch(value: Option<&str>) -> Option<String> {
    value.map(|v| availability_or_default(Some(v)))
}

/// Plain optional text fields default to the empty string in storage.
pub fn text_or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_object_is_json_encoded() {
        let value = json!([{ "school": "TU Wien", "degree": "BSc" }]);
        let text = nested_to_text(Some(&value));
        assert!(text.starts_with('['));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn nested_string_is_not_double_encoded() {
        let value = json!(r#"[{"role":"Tester"}]"#);
        assert_eq!(nested_to_text(Some(&value)), r#"[{"role":"Tester"}]"#);

        let free_text = json!("Five years of QA work");
        assert_eq!(nested_to_text(Some(&free_text)), "Five years of QA work");
    }

    #[test]
    fn nested_absent_becomes_empty_string() {
        assert_eq!(nested_to_text(None), "");
        assert_eq!(nested_to_text(Some(&Value::Null)), "");
    }

    #[test]
    fn nested_patch_preserves_none() {
        assert_eq!(nested_patch(None), None);
        assert_eq!(
            nested_patch(Some(&json!({"a": 1}))),
            Some(r#"{"a":1}"#.to_string())
        );
    }

    #[test]
    fn skills_from_array_preserve_order() {
        let value = json!(["Rust", "SQL", "Playwright"]);
        assert_eq!(
            skills_to_vec(Some(&value)),
            vec!["Rust", "SQL", "Playwright"]
        );
    }

    #[test]
    fn skills_from_comma_separated_string() {
        let value = json!("JS, SQL , ,Selenium");
        assert_eq!(skills_to_vec(Some(&value)), vec!["JS", "SQL", "Selenium"]);
    }

    #[test]
    fn skills_from_garbage_is_empty() {
        assert_eq!(skills_to_vec(None), Vec::<String>::new());
        assert_eq!(skills_to_vec(Some(&json!(42))), Vec::<String>::new());
    }

    #[test]
    fn availability_defaults_to_no() {
        assert_eq!(availability_or_default(None), "no");
        assert_eq!(availability_or_default(Some("maybe")), "no");
        assert_eq!(availability_or_default(Some("YES")), "yes");
        assert_eq!(availability_or_default(Some("yes")), "yes");
    }

    #[test]
    fn availability_patch_preserves_none() {
        assert_eq!(availability_patch(None), None);
        assert_eq!(availability_patch(Some("Yes")), Some("yes".to_string()));
    }
}
