//! Key-case conversion between the camelCase wire format and snake_case.
//!
//! The API speaks camelCase; everything in this crate speaks snake_case.
//! Conversion happens once per request/response at the JSON boundary: only
//! object keys are rewritten, values and array elements are visited
//! recursively, scalars pass through untouched.
//!
//! Acronym runs do not round-trip: `TestHTTPResponse` becomes
//! `test_http_response`, which converts back as `testHttpResponse`. Wire
//! keys never contain acronym runs, so the loss is accepted.

use serde_json::Value;

/// Convert a camelCase identifier to snake_case.
///
/// An underscore is inserted before an uppercase letter when the previous
/// character is a lowercase letter or digit, or when the uppercase letter
/// starts a new lowercase run after any character. Everything is then
/// lowercased.
pub fn camel_to_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next = chars.get(i + 1);
            let after_word = prev.is_ascii_lowercase() || prev.is_ascii_digit();
            let starts_word = next.is_some_and(|n| n.is_ascii_lowercase() || n.is_ascii_digit());
            if after_word || starts_word {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

/// Convert a snake_case identifier to camelCase.
///
/// The first segment is kept verbatim; every later segment gets its first
/// letter uppercased. A name without underscores comes back unchanged.
pub fn snake_to_camel(name: &str) -> String {
    let mut segments = name.split('_');
    let mut out = String::with_capacity(name.len());
    if let Some(first) = segments.next() {
        out.push_str(first);
    }
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Rewrite every object key in `value` to snake_case, recursively.
pub fn keys_to_snake(value: Value) -> Value {
    convert_keys(value, &camel_to_snake)
}

/// Rewrite every object key in `value` to camelCase, recursively.
pub fn keys_to_camel(value: Value) -> Value {
    convert_keys(value, &snake_to_camel)
}

fn convert_keys(value: Value, rewrite: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (rewrite(&key), convert_keys(value, rewrite)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items.into_iter().map(|item| convert_keys(item, rewrite)).collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn camel_to_snake_simple() {
        assert_eq!(camel_to_snake("simpleTest"), "simple_test");
        assert_eq!(camel_to_snake("preSignedUrlExpiresIn"), "pre_signed_url_expires_in");
    }

    #[test]
    fn camel_to_snake_acronym_run() {
        assert_eq!(camel_to_snake("TestHTTPResponse"), "test_http_response");
        assert_eq!(camel_to_snake("HTTPResponse"), "http_response");
    }

    #[test]
    fn camel_to_snake_leaves_snake_case_alone() {
        assert_eq!(camel_to_snake("already_snake_case"), "already_snake_case");
    }

    #[test]
    fn camel_to_snake_mixed() {
        assert_eq!(camel_to_snake("mixedExampleTestCase"), "mixed_example_test_case");
        assert_eq!(camel_to_snake("a1B2c"), "a1_b2c");
    }

    #[test]
    fn snake_to_camel_simple() {
        assert_eq!(snake_to_camel("simple_test"), "simpleTest");
        assert_eq!(snake_to_camel("pre_signed_url_expires_in"), "preSignedUrlExpiresIn");
    }

    #[test]
    fn snake_to_camel_leaves_camel_case_alone() {
        assert_eq!(snake_to_camel("alreadyCamelCase"), "alreadyCamelCase");
    }

    #[test]
    fn snake_to_camel_collapses_empty_segments() {
        assert_eq!(snake_to_camel("a__b"), "aB");
        assert_eq!(snake_to_camel("trailing_"), "trailing");
    }

    #[test]
    fn acronyms_do_not_round_trip() {
        let snake = camel_to_snake("TestHTTPResponse");
        assert_eq!(snake_to_camel(&snake), "testHttpResponse");
    }

    #[test]
    fn keys_converted_recursively() {
        let wire = json!({
            "createdAt": "2024-01-01T00:00:00",
            "nestedObject": {"innerKey": [{"deepKey": 1}]},
            "items": [{"fileUrl": null}],
        });
        let local = keys_to_snake(wire);
        assert_eq!(
            local,
            json!({
                "created_at": "2024-01-01T00:00:00",
                "nested_object": {"inner_key": [{"deep_key": 1}]},
                "items": [{"file_url": null}],
            })
        );
    }

    #[test]
    fn values_are_never_rewritten() {
        let wire = json!({"documentType": "from_html", "status": "completedNow"});
        let local = keys_to_snake(wire);
        assert_eq!(local, json!({"document_type": "from_html", "status": "completedNow"}));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!(keys_to_snake(json!("someString")), json!("someString"));
        assert_eq!(keys_to_camel(json!(42)), json!(42));
        assert_eq!(keys_to_snake(json!(null)), json!(null));
    }

    #[test]
    fn snake_camel_round_trip_for_plain_keys() {
        let local = json!({"pre_signed_url_expires_in": 3600, "page_size_type": "a4"});
        assert_eq!(keys_to_snake(keys_to_camel(local.clone())), local);
    }
}
