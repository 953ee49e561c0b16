//! # Struct Parser
//!
//! Reads Rust `struct` declarations with the rust-analyzer syntax library so
//! models can be built from existing type definitions.
//! Collects field types, `///` docs and the `#[serde(rename/skip)]` attributes.

use crate::error::{AppError, AppResult};
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasName};
use ra_ap_syntax::{AstNode, SourceFile, SyntaxKind, SyntaxNode};
use regex::Regex;
use std::sync::OnceLock;

/// A field extracted from a struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    /// The Rust field name.
    pub name: String,
    /// The raw Rust type text.
    pub ty: String,
    /// Joined `///` comments.
    pub description: Option<String>,
    /// `#[serde(rename = "...")]`.
    pub rename: Option<String>,
    /// `#[serde(skip)]`.
    pub is_skipped: bool,
}

impl ParsedField {
    /// The property name as serialized.
    pub fn property_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }
}

/// A struct with its fields and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStruct {
    /// The Rust struct name.
    pub name: String,
    /// Joined `///` comments.
    pub description: Option<String>,
    /// `#[serde(rename = "...")]` on the struct.
    pub rename: Option<String>,
    /// True for tuple structs (`struct Id(u64);`).
    pub is_tuple: bool,
    /// Fields in declaration order.
    pub fields: Vec<ParsedField>,
}

impl ParsedStruct {
    /// The model name: the serde rename if present.
    pub fn model_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Default)]
struct AttrInfo {
    rename: Option<String>,
    is_skipped: bool,
}

/// Extracts every struct declared in `code`, in source order.
pub fn extract_structs(code: &str) -> AppResult<Vec<ParsedStruct>> {
    let parse = SourceFile::parse(code, Edition::Edition2021);
    let file = parse.tree();

    Ok(file
        .syntax()
        .descendants()
        .filter_map(ast::Struct::cast)
        .filter_map(|struct_def| parse_struct(&struct_def))
        .collect())
}

/// Extracts one struct by its Rust name.
///
/// ```
/// use oapispec_core::parser::extract_struct;
///
/// let code = r#"
///     #[serde(rename = "Account")]
///     struct User {
///         #[serde(rename = "userId")]
///         id: i32,
///         #[serde(skip)]
///         hidden: String
///     }
/// "#;
/// let info = extract_struct(code, "User").unwrap();
/// assert_eq!(info.model_name(), "Account");
/// assert_eq!(info.fields[0].property_name(), "userId");
/// assert!(info.fields[1].is_skipped);
/// ```
pub fn extract_struct(code: &str, struct_name: &str) -> AppResult<ParsedStruct> {
    extract_structs(code)?
        .into_iter()
        .find(|s| s.name == struct_name)
        .ok_or_else(|| AppError::spec(format!("Struct '{}' not found", struct_name)))
}

fn parse_struct(struct_def: &ast::Struct) -> Option<ParsedStruct> {
    let name = struct_def.name()?.text().to_string();
    let attrs = extract_attributes(struct_def.syntax());

    let mut fields = Vec::new();
    let mut is_tuple = false;
    match struct_def.field_list() {
        Some(ast::FieldList::RecordFieldList(list)) => {
            for field in list.fields() {
                if let (Some(field_name), Some(ty)) = (field.name(), field.ty()) {
                    let field_attrs = extract_attributes(field.syntax());
                    fields.push(ParsedField {
                        name: field_name.text().to_string(),
                        ty: ty.syntax().text().to_string(),
                        description: extract_doc_comment(field.syntax()),
                        rename: field_attrs.rename,
                        is_skipped: field_attrs.is_skipped,
                    });
                }
            }
        }
        Some(ast::FieldList::TupleFieldList(_)) => is_tuple = true,
        None => {}
    }

    Some(ParsedStruct {
        name,
        description: extract_doc_comment(struct_def.syntax()),
        rename: attrs.rename,
        is_tuple,
        fields,
    })
}

fn extract_doc_comment(node: &SyntaxNode) -> Option<String> {
    let lines: Vec<String> = node
        .children_with_tokens()
        .filter(|child| child.kind() == SyntaxKind::COMMENT)
        .filter_map(|child| {
            let text = child.to_string();
            let content = text.strip_prefix("///")?;
            Some(content.strip_prefix(' ').unwrap_or(content).to_string())
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n").trim().to_string())
    }
}

fn extract_attributes(node: &SyntaxNode) -> AttrInfo {
    let mut info = AttrInfo::default();

    for attr in node.children().filter_map(ast::Attr::cast) {
        let Some(meta) = attr.meta() else { continue };
        let is_serde = meta.path().is_some_and(|path| path.to_string() == "serde");
        if !is_serde {
            continue;
        }
        if let Some(tt) = meta.token_tree() {
            parse_attribute_content(&tt.to_string(), &mut info);
        }
    }

    info
}

fn parse_attribute_content(content: &str, info: &mut AttrInfo) {
    static RENAME_RE: OnceLock<Regex> = OnceLock::new();
    let rename_re =
        RENAME_RE.get_or_init(|| Regex::new(r#"\brename\s*=\s*"([^"]+)""#).expect("Invalid regex"));

    static SKIP_RE: OnceLock<Regex> = OnceLock::new();
    let skip_re = SKIP_RE.get_or_init(|| Regex::new(r"\bskip\b").expect("Invalid regex"));

    if let Some(value) = rename_re.captures(content).and_then(|caps| caps.get(1)) {
        info.rename = Some(value.as_str().to_string());
    }
    if skip_re.is_match(content) {
        info.is_skipped = true;
    }
}
