//! # API Schema
//!
//! Document-level metadata and the immutable registration value that collects
//! handlers and models before assembly.

use crate::doc::{Handler, SecurityRequirement};
use crate::error::AppResult;
use crate::model::Model;
use crate::openapi::create_openapi_spec;
use crate::registry::ModelRegistry;
use serde::Deserialize;
use serde_json::{Map, Value};

/// A top-level tag declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTag")]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTag {
    Name(String),
    Pair(String, String),
    Object {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
}

impl From<RawTag> for Tag {
    fn from(raw: RawTag) -> Self {
        match raw {
            RawTag::Name(name) => Tag::new(name),
            RawTag::Pair(name, description) => Tag::new(name).with_description(description),
            RawTag::Object { name, description } => Tag { name, description },
        }
    }
}

impl Tag {
    /// A tag without description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<&str> for Tag {
    fn from(name: &str) -> Self {
        Tag::new(name)
    }
}

impl From<(&str, &str)> for Tag {
    fn from((name, description): (&str, &str)) -> Self {
        Tag::new(name).with_description(description)
    }
}

/// Document-level settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiMetadata {
    /// `info.version`.
    pub version: String,
    /// `info.title`.
    pub title: String,
    /// `host`.
    pub host: Option<String>,
    /// `info.description`.
    pub description: Option<String>,
    /// `info.termsOfService`.
    pub terms_url: Option<String>,
    /// `info.contact.name`.
    pub contact: Option<String>,
    /// `info.contact.url`.
    pub contact_url: Option<String>,
    /// `info.contact.email`.
    pub contact_email: Option<String>,
    /// `info.license.name`.
    pub license: Option<String>,
    /// `info.license.url`.
    pub license_url: Option<String>,
    /// `securityDefinitions`.
    pub authorizations: Map<String, Value>,
    /// Top-level `security`.
    pub security: Vec<SecurityRequirement>,
    /// Declared tags, emitted before namespace tags.
    pub tags: Vec<Tag>,
    /// `basePath`.
    pub base_path: String,
    /// Top-level `produces`; `application/json` when empty.
    pub representations: Vec<String>,
}

impl Default for ApiMetadata {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            title: "API".to_string(),
            host: None,
            description: None,
            terms_url: None,
            contact: None,
            contact_url: None,
            contact_email: None,
            license: None,
            license_url: None,
            authorizations: Map::new(),
            security: Vec::new(),
            tags: Vec::new(),
            base_path: "/".to_string(),
            representations: vec!["application/json".to_string()],
        }
    }
}

impl ApiMetadata {
    /// Default metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the API title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the terms of service URL.
    pub fn with_terms_url(mut self, url: impl Into<String>) -> Self {
        self.terms_url = Some(url.into());
        self
    }

    /// Sets the contact; emitted only together with an email or URL.
    pub fn with_contact(
        mut self,
        name: impl Into<String>,
        email: Option<String>,
        url: Option<String>,
    ) -> Self {
        self.contact = Some(name.into());
        self.contact_email = email;
        self.contact_url = url;
        self
    }

    /// Sets the license.
    pub fn with_license(mut self, name: impl Into<String>, url: Option<String>) -> Self {
        self.license = Some(name.into());
        self.license_url = url;
        self
    }

    /// Adds a security definition.
    pub fn with_authorization(mut self, name: impl Into<String>, definition: Value) -> Self {
        self.authorizations.insert(name.into(), definition);
        self
    }

    /// Adds a top-level security requirement.
    pub fn with_security(mut self, requirement: impl Into<SecurityRequirement>) -> Self {
        self.security.push(requirement.into());
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Sets the base path.
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Sets the produced MIME types.
    pub fn with_representations<S: Into<String>>(
        mut self,
        representations: impl IntoIterator<Item = S>,
    ) -> Self {
        self.representations = representations.into_iter().map(Into::into).collect();
        self
    }
}

/// An immutable collection of handlers and models.
///
/// Every registration returns a new value; the original is left untouched.
#[derive(Debug, Clone, Default)]
pub struct ApiSchema {
    metadata: ApiMetadata,
    handlers: Vec<Handler>,
    models: ModelRegistry,
}

impl ApiSchema {
    /// An empty schema with the given metadata.
    pub fn new(metadata: ApiMetadata) -> Self {
        Self {
            metadata,
            handlers: Vec::new(),
            models: ModelRegistry::new(),
        }
    }

    /// The metadata.
    pub fn metadata(&self) -> &ApiMetadata {
        &self.metadata
    }

    /// Registered handlers, in registration order.
    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Explicitly registered models.
    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    /// A new schema with `handler` appended.
    pub fn register(&self, handler: Handler) -> Self {
        let mut next = self.clone();
        next.handlers.push(handler);
        next
    }

    /// A new schema with `model` (and what it references) registered.
    pub fn register_model(&self, model: &Model) -> AppResult<Self> {
        let mut next = self.clone();
        next.models.register_reachable(model)?;
        Ok(next)
    }

    /// A new schema using `models` as the explicit registry.
    pub fn with_models(&self, models: ModelRegistry) -> AppResult<Self> {
        let mut next = self.clone();
        next.models.extend_from(&models)?;
        Ok(next)
    }

    /// Assembles the Swagger document.
    pub fn generate(&self) -> AppResult<Value> {
        create_openapi_spec(&self.metadata, &self.handlers, &self.models)
    }
}
