//! # Model Builder
//!
//! Builds models from Rust `struct` declarations.
//!
//! - non-`Option` fields are required
//! - `///` comments become descriptions
//! - `#[serde(rename)]` and `#[serde(skip)]` are honored
//! - a field typed as another struct of the same source becomes a nested reference
//!   to it; that struct is built first

use crate::error::{AppError, AppResult};
use crate::fields::{self, FieldBuilder};
use crate::model::{Fields, Model};
use crate::parser::{extract_structs, ParsedStruct};
use crate::registry::ModelRegistry;
use crate::type_mapping::{FieldType, MappedType, RustTypeMapper, TypeMapper};
use indexmap::IndexMap;
use std::collections::HashMap;

struct ModelBuilder<'a> {
    structs: IndexMap<&'a str, &'a ParsedStruct>,
    mapper: &'a dyn TypeMapper,
    built: HashMap<String, Model>,
    visiting: Vec<String>,
}

impl<'a> ModelBuilder<'a> {
    fn new(structs: &'a [ParsedStruct], mapper: &'a dyn TypeMapper) -> Self {
        Self {
            structs: structs.iter().map(|s| (s.name.as_str(), s)).collect(),
            mapper,
            built: HashMap::new(),
            visiting: Vec::new(),
        }
    }

    fn build(&mut self, rust_name: &str) -> AppResult<Model> {
        if let Some(model) = self.built.get(rust_name) {
            return Ok(model.clone());
        }
        if self.visiting.iter().any(|name| name == rust_name) {
            let mut chain = self.visiting.clone();
            chain.push(rust_name.to_string());
            return Err(AppError::spec(format!(
                "Model '{}': recursive struct reference ({})",
                rust_name,
                chain.join(" -> ")
            )));
        }
        let parsed: &'a ParsedStruct = self
            .structs
            .get(rust_name)
            .copied()
            .ok_or_else(|| AppError::spec(format!("Unknown type '{}'", rust_name)))?;
        if parsed.is_tuple {
            return Err(AppError::spec(format!(
                "Model '{}': tuple structs cannot be described as models",
                rust_name
            )));
        }

        self.visiting.push(rust_name.to_string());
        let mut model_fields = Fields::new();
        for field in parsed.fields.iter().filter(|f| !f.is_skipped) {
            let mapped = self.mapper.map(&field.ty).map_err(|e| {
                e.with_context(&format!(
                    "Model '{}', field '{}'",
                    parsed.model_name(),
                    field.name
                ))
            })?;
            let mut builder = self.field_builder(&mapped)?.required(!mapped.optional);
            if let Some(description) = &field.description {
                builder = builder.description(description.as_str());
            }
            model_fields.insert(field.property_name(), builder);
        }
        self.visiting.pop();

        let model = Model::define(parsed.model_name(), model_fields)?;
        self.built.insert(rust_name.to_string(), model.clone());
        Ok(model)
    }

    fn field_builder(&mut self, mapped: &MappedType) -> AppResult<FieldBuilder> {
        let builder = match &mapped.field_type {
            FieldType::String => match mapped.format.as_deref() {
                Some("date") => fields::date(),
                Some("date-time") => fields::date_time(),
                Some(format) => fields::string().format(format),
                None => fields::string(),
            },
            FieldType::Integer => fields::integer(),
            FieldType::Number => fields::float(),
            FieldType::Boolean => fields::boolean(),
            FieldType::Object => fields::raw(),
            FieldType::Array(inner) => fields::array(self.field_builder(inner)?),
            FieldType::Ref(name) => fields::nested(&self.build(name)?),
        };
        Ok(builder)
    }
}

/// Builds every struct of `code` into a registry, using the default type mapper.
pub fn build_models(code: &str) -> AppResult<ModelRegistry> {
    build_models_with(code, &RustTypeMapper)
}

/// [`build_models`] with a custom type mapper.
pub fn build_models_with(code: &str, mapper: &dyn TypeMapper) -> AppResult<ModelRegistry> {
    let structs = extract_structs(code)?;
    let mut builder = ModelBuilder::new(&structs, mapper);
    let mut registry = ModelRegistry::new();
    for parsed in structs.iter().filter(|s| !s.is_tuple) {
        let model = builder.build(&parsed.name)?;
        registry.register_reachable(&model)?;
    }
    Ok(registry)
}

/// Builds the struct named `name` (Rust or serde name) and what it references.
pub fn build_model(code: &str, name: &str) -> AppResult<Model> {
    let structs = extract_structs(code)?;
    let rust_name = structs
        .iter()
        .find(|s| s.name == name || s.model_name() == name)
        .map(|s| s.name.clone())
        .ok_or_else(|| AppError::spec(format!("Struct '{}' not found", name)))?;
    ModelBuilder::new(&structs, &RustTypeMapper).build(&rust_name)
}
