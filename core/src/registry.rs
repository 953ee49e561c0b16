//! # Model Registry
//!
//! The single authoritative name -> model table from which `definitions` is
//! written. Registration is explicit; the assembler queries it instead of
//! discovering models ad hoc.
//!
//! Registering two different models under one name is rejected. Registering the
//! same definition twice is a no-op.

use crate::error::{AppError, AppResult};
use crate::model::{Fields, Model};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Models keyed by name, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: IndexMap<String, Model>,
}

impl ModelRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a model and registers it.
    pub fn define(&mut self, name: impl Into<String>, fields: Fields) -> AppResult<Model> {
        let model = Model::define(name, fields)?;
        self.register(&model)?;
        Ok(model)
    }

    /// Defines a model inheriting from `parents` and registers it (and them).
    pub fn inherit<I, M>(
        &mut self,
        name: impl Into<String>,
        fields: Fields,
        parents: I,
    ) -> AppResult<Model>
    where
        I: IntoIterator<Item = M>,
        M: Into<Model>,
    {
        let model = Model::inherit(name, fields, parents)?;
        self.register_reachable(&model)?;
        Ok(model)
    }

    /// Registers a single model.
    pub fn register(&mut self, model: &Model) -> AppResult<()> {
        if let Some(existing) = self.models.get(model.name()) {
            if existing.schema() != model.schema() {
                return Err(AppError::spec(format!(
                    "Model '{}': already registered with a different definition",
                    model.name()
                )));
            }
            return Ok(());
        }
        self.models.insert(model.name().to_string(), model.clone());
        Ok(())
    }

    /// Registers a model and, transitively, every model its schema references.
    ///
    /// Every reachable model is checked against the registry, including the
    /// dependencies of a model whose own schema matches an existing entry.
    pub fn register_reachable(&mut self, model: &Model) -> AppResult<()> {
        let mut visited: Vec<Model> = Vec::new();
        let mut pending = vec![model.clone()];
        while let Some(next) = pending.pop() {
            if visited.iter().any(|seen| seen.ptr_eq(&next)) {
                continue;
            }
            self.register(&next)?;
            pending.extend(next.dependencies());
            visited.push(next);
        }
        Ok(())
    }

    /// Merges every model of `other` into `self`.
    pub fn extend_from(&mut self, other: &ModelRegistry) -> AppResult<()> {
        for model in other.models.values() {
            self.register_reachable(model)?;
        }
        Ok(())
    }

    /// Looks a model up by name.
    pub fn get(&self, name: &str) -> Option<&Model> {
        self.models.get(name)
    }

    /// True when a model of that name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Iterates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// The `definitions` object: every model's schema, sorted by name.
    pub fn definitions(&self) -> Value {
        let mut names: Vec<&String> = self.models.keys().collect();
        names.sort();
        let mut definitions = Map::new();
        for name in names {
            if let Some(model) = self.models.get(name) {
                definitions.insert(name.clone(), model.schema());
            }
        }
        Value::Object(definitions)
    }
}
