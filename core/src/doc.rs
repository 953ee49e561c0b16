//! # Handler Documentation
//!
//! A typed accumulator for per-handler metadata. Successive calls on a
//! [`Handler`] merge into its [`HandlerDoc`] field by field:
//!
//! - scalar fields: the later call wins
//! - `expect`: entries accumulate
//! - `params`: merged per parameter name, later keys win
//! - `responses` / `headers`: the later declaration for a code or name wins
//! - `vendor`: merged per key
//!
//! A hidden handler is skipped entirely by the assembler.

use crate::model::Model;
use crate::reqparse::RequestParser;
use crate::types::{Primitive, SchemaKind};
use crate::value::Resolvable;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{json, Map, Value};

/// Groups handlers; becomes the operation tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Namespace {
    /// Tag name.
    pub name: String,
    /// Tag description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Namespace {
    /// A namespace without description.
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

/// One security requirement object: scheme name to required scopes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RawRequirement")]
pub struct SecurityRequirement(IndexMap<String, Vec<String>>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScopes {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Name(String),
    Scoped(IndexMap<String, RawScopes>),
}

impl From<RawRequirement> for SecurityRequirement {
    fn from(raw: RawRequirement) -> Self {
        match raw {
            RawRequirement::Name(name) => SecurityRequirement::from(name),
            RawRequirement::Scoped(map) => SecurityRequirement(
                map.into_iter()
                    .map(|(name, scopes)| {
                        let scopes = match scopes {
                            RawScopes::One(scope) => vec![scope],
                            RawScopes::Many(scopes) => scopes,
                        };
                        (name, scopes)
                    })
                    .collect(),
            ),
        }
    }
}

impl SecurityRequirement {
    /// Adds a scheme with the given scopes.
    pub fn with_scopes<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        scopes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.0
            .insert(name.into(), scopes.into_iter().map(Into::into).collect());
        self
    }

    /// The requirement object.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(name, scopes)| (name.clone(), json!(scopes)))
                .collect(),
        )
    }
}

impl From<&str> for SecurityRequirement {
    fn from(name: &str) -> Self {
        SecurityRequirement::default().with_scopes(name, Vec::<String>::new())
    }
}

impl From<String> for SecurityRequirement {
    fn from(name: String) -> Self {
        SecurityRequirement::default().with_scopes(name, Vec::<String>::new())
    }
}

/// An expected input: a body payload or a request parser.
#[derive(Debug, Clone)]
pub enum Expect {
    /// A `payload` body parameter with the given schema.
    Body {
        /// Body schema.
        schema: SchemaKind,
        /// Parameter description.
        description: Option<String>,
    },
    /// Every argument of the parser.
    Parser(RequestParser),
}

impl Expect {
    /// A body payload.
    pub fn body(schema: impl Into<SchemaKind>) -> Self {
        Expect::Body {
            schema: schema.into(),
            description: None,
        }
    }

    /// A described body payload.
    pub fn described(schema: impl Into<SchemaKind>, description: impl Into<String>) -> Self {
        Expect::Body {
            schema: schema.into(),
            description: Some(description.into()),
        }
    }
}

impl From<RequestParser> for Expect {
    fn from(parser: RequestParser) -> Self {
        Expect::Parser(parser)
    }
}

impl From<&RequestParser> for Expect {
    fn from(parser: &RequestParser) -> Self {
        Expect::Parser(parser.copy())
    }
}

impl From<Model> for Expect {
    fn from(model: Model) -> Self {
        Expect::body(model)
    }
}

impl From<&Model> for Expect {
    fn from(model: &Model) -> Self {
        Expect::body(model)
    }
}

impl From<SchemaKind> for Expect {
    fn from(schema: SchemaKind) -> Self {
        Expect::body(schema)
    }
}

/// An explicit parameter override. Only the attributes that are set are emitted.
#[derive(Debug, Clone, Default)]
pub struct ParamDoc {
    /// Swagger `in`.
    pub location: Option<String>,
    /// Parameter type.
    pub param_type: Option<SchemaKind>,
    /// Swagger `format`.
    pub format: Option<String>,
    /// Default value; may be deferred.
    pub default: Option<Resolvable<Value>>,
    /// Swagger `required`.
    pub required: Option<bool>,
    /// Swagger `description`.
    pub description: Option<String>,
    /// Any other parameter keyword.
    pub extra: Map<String, Value>,
}

impl ParamDoc {
    /// An empty override.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `in`.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the type.
    pub fn with_type(mut self, param_type: impl Into<SchemaKind>) -> Self {
        self.param_type = Some(param_type.into());
        self
    }

    /// Sets `format`.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets `default`.
    pub fn with_default(mut self, default: impl Into<Resolvable<Value>>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets `required`.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Sets `description`.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds an arbitrary keyword.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Later attributes win.
    pub fn merge(&mut self, other: ParamDoc) {
        if other.location.is_some() {
            self.location = other.location;
        }
        if other.param_type.is_some() {
            self.param_type = other.param_type;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.default.is_some() {
            self.default = other.default;
        }
        if other.required.is_some() {
            self.required = other.required;
        }
        if other.description.is_some() {
            self.description = other.description;
        }
        self.extra.extend(other.extra);
    }

    /// The partial parameter object, with the type normalized to Swagger syntax.
    pub fn to_partial(&self) -> Map<String, Value> {
        let mut param = Map::new();
        if let Some(location) = &self.location {
            param.insert("in".into(), Value::from(location.as_str()));
        }
        match &self.param_type {
            None => {}
            Some(SchemaKind::Primitive(primitive)) => {
                param.insert("type".into(), Value::from(primitive.as_str()));
            }
            Some(kind) if kind.is_model_like() => {
                param.insert("schema".into(), kind.serialize());
            }
            Some(kind) => {
                if let Value::Object(schema) = kind.serialize() {
                    param.extend(schema);
                }
            }
        }
        if let Some(format) = &self.format {
            param.insert("format".into(), Value::from(format.as_str()));
        }
        if let Some(default) = self.default.as_ref().map(Resolvable::resolve) {
            if !default.is_null() {
                param.insert("default".into(), default);
            }
        }
        if let Some(required) = self.required {
            param.insert("required".into(), Value::Bool(required));
        }
        if let Some(description) = &self.description {
            param.insert("description".into(), Value::from(description.as_str()));
        }
        for (key, value) in &self.extra {
            param.insert(key.clone(), value.clone());
        }
        param
    }
}

/// A response or operation header.
#[derive(Debug, Clone, Default)]
pub struct HeaderDoc {
    /// Header description.
    pub description: Option<String>,
    /// Header type; `string` when absent.
    pub header_type: Option<SchemaKind>,
    /// Any other header keyword.
    pub extra: Map<String, Value>,
}

impl HeaderDoc {
    /// A described `string` header.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Sets the type.
    pub fn with_type(mut self, header_type: impl Into<SchemaKind>) -> Self {
        self.header_type = Some(header_type.into());
        self
    }
}

impl From<&str> for HeaderDoc {
    fn from(description: &str) -> Self {
        HeaderDoc::new(description)
    }
}

impl From<Primitive> for HeaderDoc {
    fn from(primitive: Primitive) -> Self {
        HeaderDoc::default().with_type(primitive)
    }
}

/// One declared response.
#[derive(Debug, Clone, Default)]
pub struct ResponseDoc {
    /// Response description; `Success` when empty.
    pub description: Option<String>,
    /// Response body schema.
    pub model: Option<SchemaKind>,
    /// Response-specific headers.
    pub headers: IndexMap<String, HeaderDoc>,
    /// Wraps the schema as `{properties: {<envelope>: schema}}`.
    pub envelope: Option<String>,
}

impl ResponseDoc {
    /// A described response.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }

    /// Sets the body schema.
    pub fn with_model(mut self, model: impl Into<SchemaKind>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Adds a response header.
    pub fn with_header(mut self, name: impl Into<String>, header: impl Into<HeaderDoc>) -> Self {
        self.headers.insert(name.into(), header.into());
        self
    }

    /// Sets the envelope property name.
    pub fn with_envelope(mut self, envelope: impl Into<String>) -> Self {
        self.envelope = Some(envelope.into());
        self
    }
}

impl From<&str> for ResponseDoc {
    fn from(description: &str) -> Self {
        ResponseDoc::new(description)
    }
}

/// Everything known about one handler.
#[derive(Debug, Clone, Default)]
pub struct HandlerDoc {
    /// URL template.
    pub route: Option<String>,
    /// Lowercase HTTP verb.
    pub method: Option<String>,
    /// Operation id; the handler identifier when absent.
    pub name: Option<String>,
    /// Operation summary.
    pub summary: Option<String>,
    /// Operation description.
    pub description: Option<String>,
    /// Expected inputs, in declaration order.
    pub expect: Vec<Expect>,
    /// Explicit parameter overrides.
    pub params: IndexMap<String, ParamDoc>,
    /// Status code to response.
    pub responses: IndexMap<String, ResponseDoc>,
    /// Headers added to every response.
    pub headers: IndexMap<String, HeaderDoc>,
    /// Operation `produces`.
    pub produces: Option<Vec<String>>,
    /// Operation `deprecated`.
    pub deprecated: bool,
    /// Vendor extensions (`x-` added when missing).
    pub vendor: Map<String, Value>,
    /// Grouping namespace.
    pub namespace: Option<Namespace>,
    /// Operation security; `Some(vec![])` disables inherited security.
    pub security: Option<Vec<SecurityRequirement>>,
    /// Default response schema.
    pub model: Option<SchemaKind>,
    /// Status code of the default response schema (`200` when absent).
    pub default_code: Option<u16>,
}

impl HandlerDoc {
    /// Folds `other` into `self`. See the module docs for the precedence rules.
    pub fn merge(&mut self, other: HandlerDoc) {
        fn replace<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        replace(&mut self.route, other.route);
        replace(&mut self.method, other.method);
        replace(&mut self.name, other.name);
        replace(&mut self.summary, other.summary);
        replace(&mut self.description, other.description);
        self.expect.extend(other.expect);
        for (name, param) in other.params {
            self.params.entry(name).or_default().merge(param);
        }
        self.responses.extend(other.responses);
        self.headers.extend(other.headers);
        replace(&mut self.produces, other.produces);
        self.deprecated |= other.deprecated;
        self.vendor.extend(other.vendor);
        replace(&mut self.namespace, other.namespace);
        replace(&mut self.security, other.security);
        replace(&mut self.model, other.model);
        replace(&mut self.default_code, other.default_code);
    }
}

/// A documented route handler.
///
/// ```
/// use oapispec_core::doc::{Handler, ResponseDoc};
///
/// let handler = Handler::new("ping")
///     .route("/ping")
///     .method("GET")
///     .response(200, ResponseDoc::new("Pong"));
/// assert_eq!(handler.doc().method.as_deref(), Some("get"));
/// ```
#[derive(Debug, Clone)]
pub struct Handler {
    identifier: String,
    doc: HandlerDoc,
    hidden: bool,
}

impl Handler {
    /// An undocumented handler named `identifier`.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            doc: HandlerDoc::default(),
            hidden: false,
        }
    }

    /// The handler identifier.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The accumulated metadata.
    pub fn doc(&self) -> &HandlerDoc {
        &self.doc
    }

    /// The operation id.
    pub fn name(&self) -> &str {
        self.doc.name.as_deref().unwrap_or(&self.identifier)
    }

    /// Whether the handler is excluded from the document.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Merges a whole metadata block.
    pub fn merge_doc(mut self, doc: HandlerDoc) -> Self {
        self.doc.merge(doc);
        self
    }

    /// Excludes the handler from the document.
    pub fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Sets the URL template.
    pub fn route(mut self, route: impl Into<String>) -> Self {
        self.doc.route = Some(route.into());
        self
    }

    /// Sets the HTTP verb (stored lowercase).
    pub fn method(mut self, method: &str) -> Self {
        self.doc.method = Some(method.to_lowercase());
        self
    }

    /// Overrides the operation id.
    pub fn name_as(mut self, name: impl Into<String>) -> Self {
        self.doc.name = Some(name.into());
        self
    }

    /// Sets the summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.doc.summary = Some(summary.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.doc.description = Some(description.into());
        self
    }

    /// Appends an expected input.
    pub fn expect(mut self, expect: impl Into<Expect>) -> Self {
        self.doc.expect.push(expect.into());
        self
    }

    /// Adds (or merges into) an explicit parameter override.
    pub fn param(mut self, name: impl Into<String>, param: ParamDoc) -> Self {
        self.doc.params.entry(name.into()).or_default().merge(param);
        self
    }

    /// Declares a response.
    pub fn response(mut self, code: u16, response: impl Into<ResponseDoc>) -> Self {
        self.doc.responses.insert(code.to_string(), response.into());
        self
    }

    /// Declares a header sent with every response.
    pub fn header(mut self, name: impl Into<String>, header: impl Into<HeaderDoc>) -> Self {
        self.doc.headers.insert(name.into(), header.into());
        self
    }

    /// Sets the MIME types produced.
    pub fn produces<S: Into<String>>(mut self, mimetypes: impl IntoIterator<Item = S>) -> Self {
        self.doc.produces = Some(mimetypes.into_iter().map(Into::into).collect());
        self
    }

    /// Marks the operation as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.doc.deprecated = true;
        self
    }

    /// Adds a vendor extension.
    pub fn vendor(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.doc.vendor.insert(key.into(), value.into());
        self
    }

    /// Groups the handler under a namespace.
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.doc.namespace = Some(namespace);
        self
    }

    /// Sets the operation security requirements.
    pub fn security<R: Into<SecurityRequirement>>(
        mut self,
        requirements: impl IntoIterator<Item = R>,
    ) -> Self {
        self.doc.security = Some(requirements.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the default response schema (code `200` unless overridden).
    pub fn model(mut self, model: impl Into<SchemaKind>) -> Self {
        self.doc.model = Some(model.into());
        self
    }

    /// Sets the default response code.
    pub fn default_code(mut self, code: u16) -> Self {
        self.doc.default_code = Some(code);
        self
    }
}
