//! # Field Fragments
//!
//! Builders for the schema node describing one model field.
//!
//! Every builder starts from one of the kind constructors ([`raw`], [`string`],
//! [`integer`], [`float`], [`boolean`], [`date`], [`date_time`], [`array`],
//! [`nested`]) and is frozen into an immutable [`SchemaFragment`] by
//! [`FieldBuilder::build`]. Deferred constraint values are resolved at that point.
//!
//! Absent attributes are never emitted.

use crate::model::Model;
use crate::ref_utils::ref_object;
use crate::value::Resolvable;
use serde_json::{Map, Value};

/// An immutable, sparse schema node plus the out-of-band field flags.
#[derive(Debug, Clone)]
pub struct SchemaFragment {
    schema: Map<String, Value>,
    required: bool,
    discriminator: bool,
    description: Option<String>,
    models: Vec<Model>,
}

impl SchemaFragment {
    /// The emitted schema object.
    pub fn schema(&self) -> &Map<String, Value> {
        &self.schema
    }

    /// The emitted schema as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.schema.clone())
    }

    /// Whether the owning model lists this field under `required`.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether this field names the concrete subtype.
    pub fn is_discriminator(&self) -> bool {
        self.discriminator
    }

    /// The field description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Models referenced from this fragment (nested references, array items).
    ///
    /// Building a fragment never registers anything; the assembler walks these.
    pub fn models(&self) -> &[Model] {
        &self.models
    }
}

impl From<FieldBuilder> for SchemaFragment {
    fn from(builder: FieldBuilder) -> Self {
        builder.build()
    }
}

#[derive(Debug, Clone)]
enum FieldKind {
    Raw,
    String,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    Array(Box<SchemaFragment>),
    Nested { model: Model, many: bool },
}

#[derive(Debug, Clone, Default)]
struct Constraints {
    min_length: Option<Resolvable<Value>>,
    max_length: Option<Resolvable<Value>>,
    pattern: Option<Resolvable<Value>>,
    enum_values: Option<Resolvable<Value>>,
    minimum: Option<Resolvable<Value>>,
    exclusive_minimum: Option<Resolvable<Value>>,
    maximum: Option<Resolvable<Value>>,
    exclusive_maximum: Option<Resolvable<Value>>,
    multiple_of: Option<Resolvable<Value>>,
    min_items: Option<Resolvable<Value>>,
    max_items: Option<Resolvable<Value>>,
    unique_items: Option<Resolvable<Value>>,
}

/// Accumulates the attributes of one field before it is frozen.
#[derive(Debug, Clone)]
pub struct FieldBuilder {
    kind: FieldKind,
    type_name: Option<String>,
    format: Option<String>,
    title: Option<String>,
    description: Option<String>,
    read_only: Option<bool>,
    default: Option<Resolvable<Value>>,
    example: Option<Value>,
    required: bool,
    discriminator: bool,
    constraints: Constraints,
    extra: Map<String, Value>,
}

impl FieldBuilder {
    fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            type_name: None,
            format: None,
            title: None,
            description: None,
            read_only: None,
            default: None,
            example: None,
            required: false,
            discriminator: false,
            constraints: Constraints::default(),
            extra: Map::new(),
        }
    }

    /// Marks the field as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Marks the field as the discriminator. A discriminator is always required.
    pub fn discriminator(mut self, discriminator: bool) -> Self {
        self.discriminator = discriminator;
        self
    }

    /// Overrides the emitted `type` (raw fields only default to `object`).
    pub fn type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Sets `format`, overriding the one implied by the kind.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets `title`.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets `description`.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets `readOnly`.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = Some(read_only);
        self
    }

    /// Sets `default`; may be deferred.
    pub fn default(mut self, default: impl Into<Resolvable<Value>>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets `example`.
    pub fn example(mut self, example: impl Into<Value>) -> Self {
        self.example = Some(example.into());
        self
    }

    /// Sets `enum`; may be deferred. An empty list is treated as no enum.
    ///
    /// Without an explicit example the first enum value becomes the example.
    pub fn enum_values(mut self, values: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.enum_values = Some(values.into());
        self
    }

    /// Sets `minLength`; may be deferred.
    pub fn min_length(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.min_length = Some(value.into());
        self
    }

    /// Sets `maxLength`; may be deferred.
    pub fn max_length(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.max_length = Some(value.into());
        self
    }

    /// Sets `pattern`; may be deferred.
    pub fn pattern(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.pattern = Some(value.into());
        self
    }

    /// Sets `minimum`; may be deferred.
    pub fn minimum(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.minimum = Some(value.into());
        self
    }

    /// Sets `exclusiveMinimum`; may be deferred.
    pub fn exclusive_minimum(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.exclusive_minimum = Some(value.into());
        self
    }

    /// Sets `maximum`; may be deferred.
    pub fn maximum(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.maximum = Some(value.into());
        self
    }

    /// Sets `exclusiveMaximum`; may be deferred.
    pub fn exclusive_maximum(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.exclusive_maximum = Some(value.into());
        self
    }

    /// Sets `multipleOf`; may be deferred.
    pub fn multiple_of(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.multiple_of = Some(value.into());
        self
    }

    /// Sets `minItems`; may be deferred.
    pub fn min_items(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.min_items = Some(value.into());
        self
    }

    /// Sets `maxItems`; may be deferred.
    pub fn max_items(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.max_items = Some(value.into());
        self
    }

    /// Sets `uniqueItems`; may be deferred.
    pub fn unique_items(mut self, value: impl Into<Resolvable<Value>>) -> Self {
        self.constraints.unique_items = Some(value.into());
        self
    }

    /// For nested fields: emit an array of references instead of a single one.
    pub fn as_list(mut self, as_list: bool) -> Self {
        if let FieldKind::Nested { many, .. } = &mut self.kind {
            *many = as_list;
        }
        self
    }

    /// Adds an arbitrary schema keyword, emitted after the known ones.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Resolves every deferred value and freezes the fragment.
    pub fn build(self) -> SchemaFragment {
        let mut schema = Map::new();

        let (kind_type, kind_format) = match &self.kind {
            FieldKind::Raw => (Some("object"), None),
            FieldKind::String => (Some("string"), None),
            FieldKind::Integer => (Some("integer"), None),
            FieldKind::Float => (Some("number"), None),
            FieldKind::Boolean => (Some("boolean"), None),
            FieldKind::Date => (Some("string"), Some("date")),
            FieldKind::DateTime => (Some("string"), Some("date-time")),
            FieldKind::Array(_) => (Some("array"), None),
            FieldKind::Nested { many: true, .. } => (Some("array"), None),
            FieldKind::Nested { many: false, .. } => (None, None),
        };

        let type_name = self.type_name.or_else(|| kind_type.map(str::to_string));
        insert_some(&mut schema, "type", type_name.map(Value::from));
        insert_some(
            &mut schema,
            "format",
            self.format
                .or_else(|| kind_format.map(str::to_string))
                .map(Value::from),
        );
        insert_some(&mut schema, "title", self.title.clone().map(Value::from));
        insert_some(
            &mut schema,
            "description",
            self.description.clone().map(Value::from),
        );
        insert_some(&mut schema, "readOnly", self.read_only.map(Value::from));
        insert_some(&mut schema, "default", resolve(&self.default));

        let enum_values = resolve(&self.constraints.enum_values).filter(|values| match values {
            Value::Array(items) => !items.is_empty(),
            _ => true,
        });
        let example = self.example.or_else(|| match &enum_values {
            Some(Value::Array(items)) => items.first().cloned(),
            _ => None,
        });
        insert_some(&mut schema, "example", example);

        let c = &self.constraints;
        insert_some(&mut schema, "minLength", resolve(&c.min_length));
        insert_some(&mut schema, "maxLength", resolve(&c.max_length));
        insert_some(&mut schema, "pattern", resolve(&c.pattern));
        insert_some(&mut schema, "enum", enum_values);
        insert_some(&mut schema, "minimum", resolve(&c.minimum));
        insert_some(&mut schema, "exclusiveMinimum", resolve(&c.exclusive_minimum));
        insert_some(&mut schema, "maximum", resolve(&c.maximum));
        insert_some(&mut schema, "exclusiveMaximum", resolve(&c.exclusive_maximum));
        insert_some(&mut schema, "multipleOf", resolve(&c.multiple_of));
        insert_some(&mut schema, "minItems", resolve(&c.min_items));
        insert_some(&mut schema, "maxItems", resolve(&c.max_items));
        insert_some(&mut schema, "uniqueItems", resolve(&c.unique_items));

        let models = match self.kind {
            FieldKind::Array(item) => {
                schema.insert("items".into(), item.to_value());
                item.models
            }
            FieldKind::Nested { model, many } => {
                let reference = ref_object(model.name());
                if many {
                    schema.insert("items".into(), reference);
                } else if let Value::Object(reference) = reference {
                    schema.extend(reference);
                }
                vec![model]
            }
            _ => Vec::new(),
        };

        for (key, value) in self.extra {
            if !value.is_null() {
                schema.insert(key, value);
            }
        }

        SchemaFragment {
            schema,
            required: self.required || self.discriminator,
            discriminator: self.discriminator,
            description: self.description,
            models,
        }
    }
}

fn resolve(value: &Option<Resolvable<Value>>) -> Option<Value> {
    value
        .as_ref()
        .map(Resolvable::resolve)
        .filter(|v| !v.is_null())
}

fn insert_some(schema: &mut Map<String, Value>, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        schema.insert(key.to_string(), value);
    }
}

/// A free-form field; `type: object` unless overridden.
pub fn raw() -> FieldBuilder {
    FieldBuilder::new(FieldKind::Raw)
}

/// A `string` field.
pub fn string() -> FieldBuilder {
    FieldBuilder::new(FieldKind::String)
}

/// An `integer` field.
pub fn integer() -> FieldBuilder {
    FieldBuilder::new(FieldKind::Integer)
}

/// A `number` field.
pub fn float() -> FieldBuilder {
    FieldBuilder::new(FieldKind::Float)
}

/// A `boolean` field.
pub fn boolean() -> FieldBuilder {
    FieldBuilder::new(FieldKind::Boolean)
}

/// A `string` field with format `date`.
pub fn date() -> FieldBuilder {
    FieldBuilder::new(FieldKind::Date)
}

/// A `string` field with format `date-time`.
pub fn date_time() -> FieldBuilder {
    FieldBuilder::new(FieldKind::DateTime)
}

/// An `array` field whose items follow `item`.
pub fn array(item: impl Into<SchemaFragment>) -> FieldBuilder {
    FieldBuilder::new(FieldKind::Array(Box::new(item.into())))
}

/// A `$ref` to another model; see [`FieldBuilder::as_list`].
pub fn nested(model: &Model) -> FieldBuilder {
    FieldBuilder::new(FieldKind::Nested {
        model: model.clone(),
        many: false,
    })
}
