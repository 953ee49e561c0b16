//! # Type Mapping
//!
//! Maps Rust type text (`Option<Vec<i32>>`, `NaiveDate`, `Address`) to the field
//! kind used when building a model from a struct declaration.

use crate::error::{AppError, AppResult};
use ra_ap_edition::Edition;
use ra_ap_syntax::ast::{self, HasGenericArgs};
use ra_ap_syntax::{AstNode, SourceFile};
use std::fmt::{self, Display};

/// The field kind a Rust type maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// `string`.
    String,
    /// `integer`.
    Integer,
    /// `number`.
    Number,
    /// `boolean`.
    Boolean,
    /// A free-form object (maps, `serde_json::Value`).
    Object,
    /// An array of the inner type.
    Array(Box<MappedType>),
    /// Another struct, by Rust name.
    Ref(String),
}

impl Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::String => write!(f, "string"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Object => write!(f, "object"),
            FieldType::Array(inner) => write!(f, "array<{}>", inner.field_type),
            FieldType::Ref(name) => write!(f, "$ref:{}", name),
        }
    }
}

/// A mapped field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// The kind.
    pub field_type: FieldType,
    /// `format`, e.g. `date`, `date-time`, `uuid`.
    pub format: Option<String>,
    /// Declared as `Option<T>`: the field is not required.
    pub optional: bool,
}

/// Converts Rust type text into a [`MappedType`].
pub trait TypeMapper {
    /// Maps one type, e.g. `Option<Vec<String>>`.
    fn map(&self, rust_type: &str) -> AppResult<MappedType>;
}

/// The default mapper.
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn map(&self, rust_type: &str) -> AppResult<MappedType> {
        // Parse the text as the right-hand side of a type alias.
        let code = format!("type _Wrapper = {};", rust_type);
        let parse = SourceFile::parse(&code, Edition::Edition2021);
        let file = parse.tree();

        let root_type = file
            .syntax()
            .descendants()
            .find_map(ast::TypeAlias::cast)
            .and_then(|alias| alias.ty())
            .ok_or_else(|| AppError::spec(format!("Invalid type syntax: {}", rust_type)))?;

        map_ast_type(&root_type)
    }
}

fn map_ast_type(ty: &ast::Type) -> AppResult<MappedType> {
    match ty {
        ast::Type::PathType(path_type) => {
            let segment = path_type
                .path()
                .and_then(|path| path.segment())
                .ok_or_else(|| AppError::spec("Empty type path"))?;
            let name = segment
                .name_ref()
                .ok_or_else(|| AppError::spec("Missing type name"))?
                .text()
                .to_string();

            match name.as_str() {
                "String" | "str" | "char" => Ok(simple(FieldType::String)),
                "bool" => Ok(simple(FieldType::Boolean)),
                "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
                | "u128" | "usize" => Ok(simple(FieldType::Integer)),
                "f32" | "f64" => Ok(simple(FieldType::Number)),

                "Uuid" => Ok(formatted(FieldType::String, "uuid")),
                "NaiveDateTime" | "DateTime" => Ok(formatted(FieldType::String, "date-time")),
                "NaiveDate" => Ok(formatted(FieldType::String, "date")),
                "HashMap" | "BTreeMap" | "IndexMap" | "Value" | "Map" => {
                    Ok(simple(FieldType::Object))
                }

                "Option" => first_generic_arg(&segment).map(|mut inner| {
                    inner.optional = true;
                    inner
                }),
                "Vec" | "HashSet" | "BTreeSet" => first_generic_arg(&segment).map(|inner| {
                    simple(FieldType::Array(Box::new(MappedType {
                        optional: false,
                        ..inner
                    })))
                }),
                "Box" | "Arc" | "Rc" => first_generic_arg(&segment),

                other => Ok(simple(FieldType::Ref(other.to_string()))),
            }
        }
        ast::Type::RefType(ref_type) => {
            let inner = ref_type
                .ty()
                .ok_or_else(|| AppError::spec("Invalid reference type"))?;
            map_ast_type(&inner)
        }
        ast::Type::SliceType(slice) => {
            let inner = slice
                .ty()
                .ok_or_else(|| AppError::spec("Invalid slice type"))?;
            Ok(simple(FieldType::Array(Box::new(map_ast_type(&inner)?))))
        }
        other => Err(AppError::spec(format!(
            "Unsupported type structure: {}",
            other.syntax().text()
        ))),
    }
}

fn first_generic_arg(segment: &ast::PathSegment) -> AppResult<MappedType> {
    let first_arg = segment
        .generic_arg_list()
        .and_then(|list| list.generic_args().next())
        .ok_or_else(|| AppError::spec("Missing generic arguments for container type"))?;

    match first_arg {
        ast::GenericArg::TypeArg(type_arg) => {
            let inner = type_arg
                .ty()
                .ok_or_else(|| AppError::spec("Invalid generic type"))?;
            map_ast_type(&inner)
        }
        _ => Err(AppError::spec("Unsupported generic argument")),
    }
}

fn simple(field_type: FieldType) -> MappedType {
    MappedType {
        field_type,
        format: None,
        optional: false,
    }
}

fn formatted(field_type: FieldType, format: &str) -> MappedType {
    MappedType {
        field_type,
        format: Some(format.to_string()),
        optional: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(ty: &str) -> MappedType {
        RustTypeMapper.map(ty).unwrap()
    }

    #[test]
    fn test_primitives() {
        assert_eq!(map("String").field_type, FieldType::String);
        assert_eq!(map("&str").field_type, FieldType::String);
        assert_eq!(map("u64").field_type, FieldType::Integer);
        assert_eq!(map("f32").field_type, FieldType::Number);
        assert_eq!(map("bool").field_type, FieldType::Boolean);
    }

    #[test]
    fn test_formats() {
        assert_eq!(map("Uuid").format.as_deref(), Some("uuid"));
        assert_eq!(map("chrono::NaiveDate").format.as_deref(), Some("date"));
        assert_eq!(map("DateTime<Utc>").format.as_deref(), Some("date-time"));
    }

    #[test]
    fn test_option_is_optional() {
        let mapped = map("Option<i32>");
        assert!(mapped.optional);
        assert_eq!(mapped.field_type, FieldType::Integer);
        assert!(!map("i32").optional);
    }

    #[test]
    fn test_collections() {
        let mapped = map("Vec<Option<String>>");
        assert!(!mapped.optional);
        match mapped.field_type {
            FieldType::Array(inner) => {
                assert_eq!(inner.field_type, FieldType::String);
                assert!(!inner.optional);
            }
            other => panic!("expected an array, got {}", other),
        }
        assert_eq!(map("HashMap<String, i32>").field_type, FieldType::Object);
        assert_eq!(map("serde_json::Value").field_type, FieldType::Object);
    }

    #[test]
    fn test_references_and_wrappers() {
        assert_eq!(map("Address").field_type, FieldType::Ref("Address".into()));
        assert_eq!(map("Box<Address>").field_type, FieldType::Ref("Address".into()));
        assert_eq!(
            map("Option<Vec<Tag>>").field_type.to_string(),
            "array<$ref:Tag>"
        );
    }

    #[test]
    fn test_unsupported_structure() {
        assert!(RustTypeMapper.map("(i32, i32)").is_err());
        assert!(RustTypeMapper.map("Vec").is_err());
    }
}
