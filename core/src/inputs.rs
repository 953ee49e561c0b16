//! # Input Schemas
//!
//! Ready-made schemas for common request input formats, usable anywhere a
//! [`SchemaKind`](crate::types::SchemaKind) is accepted (argument types, explicit
//! parameter types, header types).

use crate::types::CustomSchema;
use serde_json::{json, Value};

fn custom(value: Value) -> CustomSchema {
    match value {
        Value::Object(map) => CustomSchema::new(map),
        _ => CustomSchema::default(),
    }
}

fn string_format(format: &str) -> CustomSchema {
    custom(json!({"type": "string", "format": format}))
}

/// An IPv4 address.
pub fn ipv4() -> CustomSchema {
    string_format("ipv4")
}

/// An IPv6 address.
pub fn ipv6() -> CustomSchema {
    string_format("ipv6")
}

/// An IPv4 or IPv6 address.
pub fn ip() -> CustomSchema {
    string_format("ip")
}

/// An absolute URL.
pub fn url() -> CustomSchema {
    string_format("url")
}

/// An email address.
pub fn email() -> CustomSchema {
    string_format("email")
}

/// A string matching `pattern`.
pub fn regex(pattern: impl Into<String>) -> CustomSchema {
    custom(json!({"type": "string", "pattern": pattern.into()}))
}

/// An ISO 8601 datetime interval (`start/end` or `start/duration`).
pub fn iso8601interval() -> CustomSchema {
    string_format("iso8601-interval")
}

/// A calendar date.
pub fn date() -> CustomSchema {
    string_format("date")
}

/// A non-negative integer.
pub fn natural() -> CustomSchema {
    custom(json!({"type": "integer", "minimum": 0}))
}

/// A strictly positive integer.
pub fn positive() -> CustomSchema {
    custom(json!({"type": "integer", "minimum": 0, "exclusiveMinimum": true}))
}

/// An integer within `low..=high`.
pub fn int_range(low: i64, high: i64) -> CustomSchema {
    custom(json!({"type": "integer", "minimum": low, "maximum": high}))
}

/// A boolean.
pub fn boolean() -> CustomSchema {
    custom(json!({"type": "boolean"}))
}

/// An ISO 8601 datetime.
pub fn datetime_from_iso8601() -> CustomSchema {
    string_format("date-time")
}

/// An ISO 8601 date.
pub fn date_from_iso8601() -> CustomSchema {
    string_format("date")
}
