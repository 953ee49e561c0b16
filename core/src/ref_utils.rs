//! # Reference Utilities
//!
//! Shared helpers for building `$ref` targets into `#/definitions` and for
//! splitting JSON Pointers (as reported by the validator) back into segments.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::{json, Value};

/// Characters left untouched when escaping a model name: RFC 3986 unreserved.
const NAME_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Prefix of every model reference.
pub const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Returns `#/definitions/<percent-encoded name>`.
pub fn definition_ref(name: &str) -> String {
    format!(
        "{}{}",
        DEFINITIONS_PREFIX,
        utf8_percent_encode(name, NAME_ESCAPE)
    )
}

/// Returns the `{"$ref": ...}` object pointing at the named definition.
pub fn ref_object(name: &str) -> Value {
    json!({ "$ref": definition_ref(name) })
}

/// Extracts the model name from a `#/definitions/...` reference.
///
/// Returns `None` for references into any other section.
pub fn definition_name(reference: &str) -> Option<String> {
    let encoded = reference.strip_prefix(DEFINITIONS_PREFIX)?;
    let name = percent_decode_str(&decode_pointer_segment(encoded))
        .decode_utf8_lossy()
        .into_owned();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
pub(crate) fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

/// Splits a JSON Pointer (`/users/0/name`) into decoded segments.
///
/// The empty pointer (document root) yields no segments.
pub(crate) fn pointer_segments(pointer: &str) -> Vec<String> {
    pointer
        .trim_start_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_pointer_segment)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_ref_plain_name() {
        assert_eq!(definition_ref("User"), "#/definitions/User");
    }

    #[test]
    fn test_definition_ref_escapes_reserved_characters() {
        assert_eq!(
            definition_ref("User Profile/v2"),
            "#/definitions/User%20Profile%2Fv2"
        );
        assert_eq!(definition_ref("a-b_c.d~e"), "#/definitions/a-b_c.d~e");
    }

    #[test]
    fn test_ref_object_shape() {
        assert_eq!(
            ref_object("ProblemDetails"),
            json!({"$ref": "#/definitions/ProblemDetails"})
        );
    }

    #[test]
    fn test_definition_name_round_trips_escaped_names() {
        let reference = definition_ref("User Profile/v2");
        assert_eq!(
            definition_name(&reference).as_deref(),
            Some("User Profile/v2")
        );
        assert_eq!(definition_name("#/responses/NotFound"), None);
        assert_eq!(definition_name("#/definitions/"), None);
    }

    #[test]
    fn test_decode_pointer_segment_escapes() {
        assert_eq!(decode_pointer_segment("a~1b~0c"), "a/b~c");
    }

    #[test]
    fn test_pointer_segments() {
        assert!(pointer_segments("").is_empty());
        assert_eq!(pointer_segments("/users/0/name"), vec!["users", "0", "name"]);
    }
}
