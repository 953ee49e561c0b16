//! # Models
//!
//! A model is a named, ordered set of fields plus an optional list of parent
//! models. Composition is by reference: a child's schema is
//! `{allOf: [ref(parent)..., ownSchema]}` and parent fields are never copied.
//!
//! Models are immutable once built and cheap to clone (`Arc`-backed), so the
//! same parent can be shared by any number of children.

use crate::error::{AppError, AppResult};
use crate::fields::{FieldBuilder, SchemaFragment};
use crate::ref_utils::{pointer_segments, ref_object};
use crate::registry::ModelRegistry;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Validation failures keyed by dotted instance path.
pub type ValidationErrors = BTreeMap<String, String>;

/// One model field: a schema fragment, or another model whose schema is inlined.
#[derive(Debug, Clone)]
pub enum Field {
    /// A regular fragment.
    Fragment(SchemaFragment),
    /// A model embedded in place (its schema, not a reference).
    Model(Model),
}

impl Field {
    /// The schema emitted under `properties`.
    pub fn schema(&self) -> Value {
        match self {
            Field::Fragment(fragment) => fragment.to_value(),
            Field::Model(model) => model.schema(),
        }
    }

    fn is_required(&self) -> bool {
        matches!(self, Field::Fragment(f) if f.is_required())
    }

    fn is_discriminator(&self) -> bool {
        matches!(self, Field::Fragment(f) if f.is_discriminator())
    }

    fn dependencies(&self) -> Vec<Model> {
        match self {
            Field::Fragment(fragment) => fragment.models().to_vec(),
            Field::Model(model) => model.dependencies(),
        }
    }
}

impl From<SchemaFragment> for Field {
    fn from(fragment: SchemaFragment) -> Self {
        Field::Fragment(fragment)
    }
}

impl From<FieldBuilder> for Field {
    fn from(builder: FieldBuilder) -> Self {
        Field::Fragment(builder.build())
    }
}

impl From<Model> for Field {
    fn from(model: Model) -> Self {
        Field::Model(model)
    }
}

impl From<&Model> for Field {
    fn from(model: &Model) -> Self {
        Field::Model(model.clone())
    }
}

/// Field name to field, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct Fields(IndexMap<String, Field>);

impl Fields {
    /// An empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        self.insert(name, field);
        self
    }

    /// Inserts (or replaces, keeping the original position) a field.
    pub fn insert(&mut self, name: impl Into<String>, field: impl Into<Field>) {
        self.0.insert(name.into(), field.into());
    }

    /// Looks up a field.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.0.get(name)
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Field)> {
        self.0.iter()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, F: Into<Field>> FromIterator<(K, F)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, F)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, field)| (name.into(), field.into()))
                .collect(),
        )
    }
}

struct ModelInner {
    name: String,
    fields: Fields,
    parents: Vec<Model>,
    own_schema: Map<String, Value>,
}

/// A named, composable payload shape.
#[derive(Clone)]
pub struct Model(Arc<ModelInner>);

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.0.name)
            .field("fields", &self.0.fields.0.keys().collect::<Vec<_>>())
            .field(
                "parents",
                &self.0.parents.iter().map(Model::name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl From<&Model> for Model {
    fn from(model: &Model) -> Self {
        model.clone()
    }
}

impl Model {
    /// Builds a standalone model.
    ///
    /// Fails when more than one field is flagged as discriminator.
    pub fn define(name: impl Into<String>, fields: Fields) -> AppResult<Model> {
        Self::inherit(name, fields, Vec::<Model>::new())
    }

    /// Builds a model composed from `parents` (order preserved) and its own fields.
    pub fn inherit<I, M>(name: impl Into<String>, fields: Fields, parents: I) -> AppResult<Model>
    where
        I: IntoIterator<Item = M>,
        M: Into<Model>,
    {
        let name = name.into();
        let own_schema = own_schema(&name, &fields)?;
        Ok(Model(Arc::new(ModelInner {
            name,
            fields,
            parents: parents.into_iter().map(Into::into).collect(),
            own_schema,
        })))
    }

    /// Derives a new model with `self` as its only parent.
    pub fn extend(&self, name: impl Into<String>, fields: Fields) -> AppResult<Model> {
        Self::inherit(name, fields, [self.clone()])
    }

    /// The model name (unescaped).
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// True when both handles share one definition.
    pub fn ptr_eq(&self, other: &Model) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The model's own fields.
    pub fn fields(&self) -> &Fields {
        &self.0.fields
    }

    /// Direct parents, in declaration order.
    pub fn parents(&self) -> &[Model] {
        &self.0.parents
    }

    /// Own name plus every ancestor name.
    pub fn ancestors(&self) -> BTreeSet<String> {
        let mut names = BTreeSet::new();
        self.collect_ancestors(&mut names);
        names
    }

    fn collect_ancestors(&self, names: &mut BTreeSet<String>) {
        if names.insert(self.0.name.clone()) {
            for parent in &self.0.parents {
                parent.collect_ancestors(names);
            }
        }
    }

    /// Returns `self` or the ancestor called `name`.
    pub fn get_parent(&self, name: &str) -> AppResult<Model> {
        if self.name() == name {
            return Ok(self.clone());
        }
        self.0
            .parents
            .iter()
            .find_map(|parent| parent.get_parent(name).ok())
            .ok_or_else(|| {
                AppError::Usage(format!("Model '{}': parent {} not found", self.name(), name))
            })
    }

    /// The `{"$ref": ...}` pointing at this model.
    pub fn reference(&self) -> Value {
        ref_object(self.name())
    }

    /// The schema of this model's own fields, without composition.
    pub fn own_schema(&self) -> Value {
        Value::Object(self.0.own_schema.clone())
    }

    /// The assembled schema, as emitted under `definitions`.
    pub fn schema(&self) -> Value {
        if self.0.parents.is_empty() {
            return self.own_schema();
        }
        let mut all_of: Vec<Value> = self.0.parents.iter().map(Model::reference).collect();
        all_of.push(self.own_schema());
        let mut schema = Map::new();
        schema.insert("allOf".into(), Value::Array(all_of));
        Value::Object(schema)
    }

    /// Models whose definitions this model's schema points at.
    pub fn dependencies(&self) -> Vec<Model> {
        let mut models = self.0.parents.clone();
        for (_, field) in self.0.fields.iter() {
            models.extend(field.dependencies());
        }
        models
    }

    /// Validates `data` against the assembled schema.
    ///
    /// Returns `Ok(None)` when the data conforms, otherwise the failures keyed by
    /// dotted path. A missing required property is reported under its own name.
    pub fn validate(&self, data: &Value) -> AppResult<Option<ValidationErrors>> {
        let mut registry = ModelRegistry::new();
        registry.register_reachable(self)?;

        let mut schema = match self.schema() {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        schema.insert("definitions".into(), registry.definitions());

        let validator = jsonschema::draft4::new(&Value::Object(schema)).map_err(|e| {
            AppError::spec(format!("Model '{}': invalid schema: {}", self.name(), e))
        })?;

        let mut errors = ValidationErrors::new();
        for error in validator.iter_errors(data) {
            let mut path = pointer_segments(&error.instance_path.to_string());
            let message = match &error.kind {
                jsonschema::error::ValidationErrorKind::Required { property, .. } => {
                    let property = property
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| property.to_string());
                    let message = format!("'{}' is a required property", property);
                    path.push(property);
                    message
                }
                _ => error.to_string(),
            };
            errors.insert(path.join("."), message);
        }

        if errors.is_empty() {
            Ok(None)
        } else {
            tracing::debug!(model = self.name(), count = errors.len(), "validation failed");
            Ok(Some(errors))
        }
    }
}

fn own_schema(name: &str, fields: &Fields) -> AppResult<Map<String, Value>> {
    let mut properties = Map::new();
    let mut required = BTreeSet::new();
    let mut discriminator: Option<&str> = None;

    for (field_name, field) in fields.iter() {
        if field.is_required() {
            required.insert(field_name.clone());
        }
        if field.is_discriminator() {
            if let Some(previous) = discriminator {
                return Err(AppError::spec(format!(
                    "Model '{}': there can be only one discriminator by schema ('{}' and '{}')",
                    name, previous, field_name
                )));
            }
            discriminator = Some(field_name);
        }
        properties.insert(field_name.clone(), field.schema());
    }

    let mut schema = Map::new();
    if !required.is_empty() {
        schema.insert(
            "required".into(),
            Value::Array(required.into_iter().map(Value::from).collect()),
        );
    }
    schema.insert("properties".into(), Value::Object(properties));
    if let Some(discriminator) = discriminator {
        schema.insert("discriminator".into(), Value::from(discriminator));
    }
    schema.insert("type".into(), Value::from("object"));
    Ok(schema)
}
