//! # Route Templates
//!
//! Reads `<[converter[(args)]:]name>` style route templates.
//!
//! Cleaning (`<int:id>` -> `{id}`) is lenient and never fails; extracting path
//! parameters is strict and rejects converters it cannot type.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::{json, Value};
use std::sync::OnceLock;

/// One piece of a parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSegment {
    /// `None` for static text; the converter name (or `default`) for placeholders.
    pub converter: Option<String>,
    /// Raw converter arguments, e.g. `length=2` in `<string(length=2):code>`.
    pub args: Option<String>,
    /// The static text, or the variable name for placeholders.
    pub text: String,
}

fn rule_re() -> &'static Regex {
    static RULE_RE: OnceLock<Regex> = OnceLock::new();
    RULE_RE.get_or_init(|| {
        Regex::new(
            r"(?P<static>[^<]*)<(?:(?P<converter>[a-zA-Z_][a-zA-Z0-9_]*)(?:\((?P<args>.*?)\))?:)?(?P<variable>[a-zA-Z_][a-zA-Z0-9_]*)>",
        )
        .expect("Invalid regex")
    })
}

/// Splits a route template into static and placeholder segments.
pub fn parse_rule(rule: &str) -> AppResult<Vec<RuleSegment>> {
    let mut segments = Vec::new();
    let mut position = 0;

    for caps in rule_re().captures_iter(rule) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() != position {
            break;
        }
        if let Some(text) = caps.name("static").map(|m| m.as_str()) {
            if !text.is_empty() {
                segments.push(RuleSegment {
                    converter: None,
                    args: None,
                    text: text.to_string(),
                });
            }
        }
        let converter = caps
            .name("converter")
            .map_or("default", |m| m.as_str())
            .to_string();
        segments.push(RuleSegment {
            converter: Some(converter),
            args: caps.name("args").map(|m| m.as_str().to_string()),
            text: caps["variable"].to_string(),
        });
        position = whole.end();
    }

    let remaining = &rule[position..];
    if remaining.contains('<') || remaining.contains('>') {
        return Err(AppError::spec(format!("Malformed url rule: {}", rule)));
    }
    if !remaining.is_empty() {
        segments.push(RuleSegment {
            converter: None,
            args: None,
            text: remaining.to_string(),
        });
    }
    Ok(segments)
}

fn converter_re() -> &'static Regex {
    static CONVERTER_RE: OnceLock<Regex> = OnceLock::new();
    CONVERTER_RE.get_or_init(|| Regex::new(r"<[^:<>]+:([^<>]+)>").expect("Invalid regex"))
}

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"<([^<>]+)>").expect("Invalid regex"))
}

fn replace_until_stable(input: &str, re: &Regex, replacement: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = re.replace_all(&current, replacement).into_owned();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Rewrites a template to Swagger path syntax: `/a/<int:id>` -> `/a/{id}`.
pub fn clean_route(route: &str) -> String {
    let stripped = replace_until_stable(route, converter_re(), "<${1}>");
    replace_until_stable(&stripped, placeholder_re(), "{${1}}")
}

/// Maps a converter name to its Swagger type.
pub fn path_type(converter: &str) -> AppResult<&'static str> {
    match converter {
        "int" => Ok("integer"),
        "float" => Ok("number"),
        "string" | "str" | "default" => Ok("string"),
        other => Err(AppError::spec(format!(
            "Unsupported type converter: {}",
            other
        ))),
    }
}

/// The `in: path` parameters of a template, keyed by variable name.
pub fn extract_path_params(route: &str) -> AppResult<IndexMap<String, Value>> {
    let mut params = IndexMap::new();
    for segment in parse_rule(route)? {
        let Some(converter) = segment.converter else {
            continue;
        };
        let param = json!({
            "name": segment.text.clone(),
            "in": "path",
            "required": true,
            "type": path_type(&converter)?,
        });
        params.insert(segment.text, param);
    }
    Ok(params)
}
