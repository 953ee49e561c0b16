//! # Schema Kinds
//!
//! The closed set of things that can stand in for a schema wherever a type is
//! expected: expected bodies, response models, argument / parameter types and
//! header types.
//!
//! - **Primitive**: a bare Swagger primitive (`integer`, `string`, ...).
//! - **Model**: a registered [`Model`], always emitted as a `$ref`.
//! - **Reference**: a model referenced by name only.
//! - **Array**: an array of another kind.
//! - **Fragment**: a built field fragment, keeping track of the models it refers to.
//! - **Custom**: a pre-built schema object ([`crate::inputs`]).

use crate::error::{AppError, AppResult};
use crate::fields::{FieldBuilder, SchemaFragment};
use crate::model::Model;
use crate::ref_utils::ref_object;
use serde_json::{json, Map, Value};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Swagger 2.0 primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `file` (formData only)
    File,
    /// `void`
    Void,
}

impl Primitive {
    /// The Swagger type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Integer => "integer",
            Primitive::Number => "number",
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
            Primitive::File => "file",
            Primitive::Void => "void",
        }
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Primitive {
    type Err = AppError;

    /// Accepts the Swagger names and the usual host-language shorthands.
    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "integer" | "int" => Ok(Primitive::Integer),
            "number" | "float" => Ok(Primitive::Number),
            "string" | "str" => Ok(Primitive::String),
            "boolean" | "bool" => Ok(Primitive::Boolean),
            "file" => Ok(Primitive::File),
            "void" | "none" => Ok(Primitive::Void),
            other => Err(AppError::spec(format!("Unsupported primitive type: {}", other))),
        }
    }
}

/// A schema object supplied wholesale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomSchema(Map<String, Value>);

impl CustomSchema {
    /// Wraps an existing schema object.
    pub fn new(schema: Map<String, Value>) -> Self {
        Self(schema)
    }

    /// Builds from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> AppResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(AppError::spec(format!(
                "A custom schema must be a JSON object, got {}",
                other
            ))),
        }
    }

    /// The schema object.
    pub fn schema(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The schema as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

/// Anything usable as a schema. See the module docs.
#[derive(Debug, Clone)]
pub enum SchemaKind {
    /// A bare primitive.
    Primitive(Primitive),
    /// A model, referenced through `#/definitions`.
    Model(Model),
    /// A model referenced by name.
    Reference(String),
    /// An array of another kind.
    Array(Box<SchemaKind>),
    /// A field fragment used as a whole schema.
    Fragment(SchemaFragment),
    /// A schema object supplied as-is.
    Custom(CustomSchema),
}

impl SchemaKind {
    /// Wraps a kind into an array of it.
    pub fn array_of(inner: impl Into<SchemaKind>) -> Self {
        SchemaKind::Array(Box::new(inner.into()))
    }

    /// References a model by name.
    pub fn reference(name: impl Into<String>) -> Self {
        SchemaKind::Reference(name.into())
    }

    /// Returns the schema object to embed where this kind is used.
    pub fn serialize(&self) -> Value {
        match self {
            SchemaKind::Primitive(p) => json!({ "type": p.as_str() }),
            SchemaKind::Model(model) => ref_object(model.name()),
            SchemaKind::Reference(name) => ref_object(name),
            SchemaKind::Array(inner) => json!({
                "type": "array",
                "items": inner.serialize(),
            }),
            SchemaKind::Fragment(fragment) => fragment.to_value(),
            SchemaKind::Custom(custom) => custom.to_value(),
        }
    }

    /// True when the kind (or its array item) refers to a model.
    pub fn is_model_like(&self) -> bool {
        match self {
            SchemaKind::Model(_) | SchemaKind::Reference(_) => true,
            SchemaKind::Array(inner) => inner.is_model_like(),
            SchemaKind::Fragment(fragment) => !fragment.models().is_empty(),
            _ => false,
        }
    }

    /// Collects the models this kind refers to directly.
    ///
    /// Models named only through [`SchemaKind::Reference`] are not included.
    pub fn models(&self) -> Vec<Model> {
        match self {
            SchemaKind::Model(model) => vec![model.clone()],
            SchemaKind::Array(inner) => inner.models(),
            SchemaKind::Fragment(fragment) => fragment.models().to_vec(),
            _ => Vec::new(),
        }
    }
}

impl From<Primitive> for SchemaKind {
    fn from(p: Primitive) -> Self {
        SchemaKind::Primitive(p)
    }
}

impl From<Model> for SchemaKind {
    fn from(model: Model) -> Self {
        SchemaKind::Model(model)
    }
}

impl From<&Model> for SchemaKind {
    fn from(model: &Model) -> Self {
        SchemaKind::Model(model.clone())
    }
}

impl From<CustomSchema> for SchemaKind {
    fn from(custom: CustomSchema) -> Self {
        SchemaKind::Custom(custom)
    }
}

impl From<SchemaFragment> for SchemaKind {
    fn from(fragment: SchemaFragment) -> Self {
        SchemaKind::Fragment(fragment)
    }
}

impl From<FieldBuilder> for SchemaKind {
    fn from(builder: FieldBuilder) -> Self {
        builder.build().into()
    }
}
