#![deny(missing_docs)]

//! # Manifest
//!
//! The declarative input of the CLI: document metadata, models, request parsers
//! and handlers, read from YAML (`.yaml`/`.yml`) or JSON.
//!
//! ```yaml
//! metadata:
//!   title: Users
//!   version: "2.0"
//! models:
//!   User:
//!     fields:
//!       name: { type: string, required: true }
//! parsers:
//!   search:
//!     args:
//!       - { name: page_size, type: integer, default: 10 }
//! handlers:
//!   - name: get_users
//!     route: /users
//!     method: get
//!     expect: [{ parser: search }]
//!     responses:
//!       "200": { description: OK, model: [User] }
//! ```
//!
//! Type names resolve in order: primitives (`integer`, `string`, ...), models,
//! then input formats (`email`, `url`, `ipv4`, ...). A single-element list
//! (`[User]`) is an array of that type. Models may only refer to models declared
//! before them or built from `models_source`.

use crate::error::{CliError, CliResult};
use indexmap::IndexMap;
use oapispec_core::{
    build_models, fields, inputs, Action, AppError, ApiMetadata, ApiSchema, Argument, Expect,
    FieldBuilder, Fields, Handler, HeaderDoc, Location, Model, ModelRegistry, Namespace, ParamDoc,
    Primitive, RequestParser, ResponseDoc, SchemaKind, SecurityRequirement,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed manifest file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Document metadata.
    pub metadata: ApiMetadata,
    /// Rust source whose structs become models, relative to the manifest.
    pub models_source: Option<PathBuf>,
    /// Declared models, in dependency order.
    pub models: IndexMap<String, ModelSpec>,
    /// Named request parsers, referenced from `expect`.
    pub parsers: IndexMap<String, ParserSpec>,
    /// Handlers in registration order.
    pub handlers: Vec<HandlerSpec>,
    #[serde(skip)]
    base_dir: PathBuf,
}

/// A type name, or `[name]` for an array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeSpec {
    /// A primitive, model or input format name.
    Name(String),
    /// An array of the single element type.
    List([Box<TypeSpec>; 1]),
}

/// A model declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelSpec {
    /// Parent model names, composed with `allOf`.
    pub parents: Vec<String>,
    /// Fields in declaration order.
    pub fields: IndexMap<String, FieldSpec>,
}

/// A field declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSpec {
    /// `string` (default), `integer`, `number`, `boolean`, `date`, `date-time`,
    /// `raw`, `array` or a model name.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Item declaration of an `array` field.
    pub items: Option<Box<FieldSpec>>,
    /// A nested model reference.
    pub model: Option<String>,
    /// Renders a nested model as an array of references.
    pub as_list: bool,
    /// Marks the field required.
    pub required: bool,
    /// Marks the field as the discriminator.
    pub discriminator: bool,
    /// `readOnly`.
    pub read_only: Option<bool>,
    /// `title`.
    pub title: Option<String>,
    /// `description`.
    pub description: Option<String>,
    /// `format`.
    pub format: Option<String>,
    /// `default`.
    pub default: Option<Value>,
    /// `example`.
    pub example: Option<Value>,
    /// `enum`.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
    /// `minLength`.
    pub min_length: Option<Value>,
    /// `maxLength`.
    pub max_length: Option<Value>,
    /// `pattern`.
    pub pattern: Option<Value>,
    /// `minimum`.
    pub minimum: Option<Value>,
    /// `exclusiveMinimum`.
    pub exclusive_minimum: Option<Value>,
    /// `maximum`.
    pub maximum: Option<Value>,
    /// `exclusiveMaximum`.
    pub exclusive_maximum: Option<Value>,
    /// `multipleOf`.
    pub multiple_of: Option<Value>,
    /// `minItems`.
    pub min_items: Option<Value>,
    /// `maxItems`.
    pub max_items: Option<Value>,
    /// `uniqueItems`.
    pub unique_items: Option<Value>,
}

/// A request parser declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserSpec {
    /// Default whitespace trimming for the arguments.
    pub trim: bool,
    /// Report every argument error at once.
    pub bundle_errors: bool,
    /// Arguments in declaration order.
    pub args: Vec<ArgumentSpec>,
}

/// One parser argument.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgumentSpec {
    /// Argument name.
    pub name: String,
    /// Value type.
    #[serde(rename = "type", default)]
    pub arg_type: Option<TypeSpec>,
    /// Where the value is read from (`query` by default).
    #[serde(default)]
    pub location: Option<Location>,
    /// Default value.
    #[serde(default)]
    pub default: Option<Value>,
    /// Marks the argument required.
    #[serde(default)]
    pub required: bool,
    /// Allowed values.
    #[serde(default)]
    pub choices: Vec<Value>,
    /// `store`, `append` or `split`.
    #[serde(default)]
    pub action: Option<Action>,
    /// Becomes the parameter description.
    #[serde(default)]
    pub help: Option<String>,
    /// Overrides the parser's trimming.
    #[serde(default)]
    pub trim: Option<bool>,
}

/// One `expect` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExpectSpec {
    /// A named parser.
    Parser {
        /// Parser name.
        parser: String,
    },
    /// A request body.
    Body {
        /// Body type.
        body: TypeSpec,
        /// Payload description.
        #[serde(default)]
        description: Option<String>,
    },
}

/// An explicit parameter override.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParamSpec {
    /// Swagger `in`.
    #[serde(rename = "in")]
    pub location: Option<String>,
    /// Parameter type.
    #[serde(rename = "type")]
    pub param_type: Option<TypeSpec>,
    /// `format`.
    pub format: Option<String>,
    /// `default`.
    pub default: Option<Value>,
    /// `required`.
    pub required: Option<bool>,
    /// `description`.
    pub description: Option<String>,
    /// Any other parameter keyword.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A header: a bare description or a full declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HeaderSpec {
    /// Description only.
    Description(String),
    /// Description and type.
    Full {
        /// Header description.
        #[serde(default)]
        description: Option<String>,
        /// Header type.
        #[serde(rename = "type", default)]
        header_type: Option<TypeSpec>,
    },
}

/// A response: a bare description or a full declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseSpec {
    /// Description only.
    Description(String),
    /// Full response.
    Full {
        /// Response description.
        #[serde(default)]
        description: Option<String>,
        /// Body type.
        #[serde(default)]
        model: Option<TypeSpec>,
        /// Wraps the body under this property.
        #[serde(default)]
        envelope: Option<String>,
        /// Response-specific headers.
        #[serde(default)]
        headers: IndexMap<String, HeaderSpec>,
    },
}

/// A handler declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HandlerSpec {
    /// Handler identifier; the default operation id.
    pub name: String,
    /// Overrides the operation id.
    pub operation_id: Option<String>,
    /// Route template, e.g. `/user/<int:id>`.
    pub route: Option<String>,
    /// HTTP method.
    pub method: Option<String>,
    /// Operation summary.
    pub summary: Option<String>,
    /// Operation description.
    pub description: Option<String>,
    /// Namespace, emitted as the operation tag.
    pub namespace: Option<Namespace>,
    /// Expected request bodies and parsers.
    pub expect: Vec<ExpectSpec>,
    /// Explicit parameter overrides.
    pub params: IndexMap<String, ParamSpec>,
    /// Responses keyed by status code.
    pub responses: IndexMap<String, ResponseSpec>,
    /// Headers attached to every response.
    pub headers: IndexMap<String, HeaderSpec>,
    /// Operation `produces`.
    pub produces: Option<Vec<String>>,
    /// Marks the operation deprecated.
    pub deprecated: bool,
    /// Vendor extensions.
    pub vendor: Map<String, Value>,
    /// Operation security requirements.
    pub security: Option<Vec<SecurityRequirement>>,
    /// Default response body.
    pub model: Option<TypeSpec>,
    /// Status code of the default response body.
    pub default_code: Option<u16>,
    /// Leaves the handler out of the document.
    pub hidden: bool,
}

impl Manifest {
    /// Reads `path`; the extension picks the format.
    pub fn load(path: &Path) -> CliResult<Manifest> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::General(format!("Failed to read manifest {:?}: {}", path, e))
        })?;
        let mut manifest = Manifest::parse(&content, is_yaml(path))?;
        manifest.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        tracing::debug!(
            manifest = %path.display(),
            models = manifest.models.len(),
            handlers = manifest.handlers.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Parses manifest text.
    pub fn parse(content: &str, yaml: bool) -> CliResult<Manifest> {
        if yaml {
            Ok(serde_yaml::from_str(content)?)
        } else {
            Ok(serde_json::from_str(content)?)
        }
    }

    /// Builds every model: first the structs of `models_source`, then the
    /// declared models in order.
    pub fn registry(&self) -> CliResult<ModelRegistry> {
        let mut registry = match &self.models_source {
            Some(source) => {
                let path = self.base_dir.join(source);
                let code = fs::read_to_string(&path).map_err(|e| {
                    CliError::General(format!("Failed to read models source {:?}: {}", path, e))
                })?;
                build_models(&code)?
            }
            None => ModelRegistry::new(),
        };

        for (name, spec) in &self.models {
            let mut model_fields = Fields::new();
            for (field_name, field) in &spec.fields {
                let builder = field.to_builder(&registry).map_err(|e| {
                    e.with_context(&format!("Model '{}', field '{}'", name, field_name))
                })?;
                model_fields.insert(field_name.clone(), builder);
            }
            let parents = spec
                .parents
                .iter()
                .map(|parent| lookup_model(&registry, parent))
                .collect::<Result<Vec<Model>, AppError>>()?;
            registry.inherit(name.clone(), model_fields, parents)?;
        }
        Ok(registry)
    }

    /// The registration value ready for assembly.
    pub fn schema(&self) -> CliResult<ApiSchema> {
        let registry = self.registry()?;
        let mut schema = ApiSchema::new(self.metadata.clone()).with_models(registry.clone())?;
        for spec in &self.handlers {
            let handler = spec
                .to_handler(&registry, &self.parsers)
                .map_err(|e| e.in_handler(&spec.name))?;
            schema = schema.register(handler);
        }
        Ok(schema)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

fn lookup_model(registry: &ModelRegistry, name: &str) -> Result<Model, AppError> {
    registry
        .get(name)
        .cloned()
        .ok_or_else(|| AppError::spec(format!("Unknown model '{}'", name)))
}

fn input_schema(name: &str) -> Option<SchemaKind> {
    let schema = match name {
        "ipv4" => inputs::ipv4(),
        "ipv6" => inputs::ipv6(),
        "ip" => inputs::ip(),
        "url" => inputs::url(),
        "email" => inputs::email(),
        "iso8601interval" => inputs::iso8601interval(),
        "date" => inputs::date(),
        "natural" => inputs::natural(),
        "positive" => inputs::positive(),
        "datetime_from_iso8601" => inputs::datetime_from_iso8601(),
        "date_from_iso8601" => inputs::date_from_iso8601(),
        _ => return None,
    };
    Some(schema.into())
}

impl TypeSpec {
    /// Resolves the name against primitives, `registry`, then input formats.
    pub fn resolve(&self, registry: &ModelRegistry) -> Result<SchemaKind, AppError> {
        match self {
            TypeSpec::List([inner]) => Ok(SchemaKind::array_of(inner.resolve(registry)?)),
            TypeSpec::Name(name) => {
                if let Ok(primitive) = name.parse::<Primitive>() {
                    return Ok(primitive.into());
                }
                if let Some(model) = registry.get(name) {
                    return Ok(model.into());
                }
                input_schema(name).ok_or_else(|| AppError::spec(format!("Unknown type '{}'", name)))
            }
        }
    }
}

fn apply(
    builder: FieldBuilder,
    value: &Option<Value>,
    set: impl FnOnce(FieldBuilder, Value) -> FieldBuilder,
) -> FieldBuilder {
    match value {
        Some(value) => set(builder, value.clone()),
        None => builder,
    }
}

impl FieldSpec {
    fn base(&self, registry: &ModelRegistry) -> Result<FieldBuilder, AppError> {
        if let Some(model) = &self.model {
            return Ok(fields::nested(&lookup_model(registry, model)?).as_list(self.as_list));
        }
        let builder = match self.kind.as_deref().unwrap_or("string") {
            "string" | "str" => fields::string(),
            "integer" | "int" => fields::integer(),
            "number" | "float" => fields::float(),
            "boolean" | "bool" => fields::boolean(),
            "date" => fields::date(),
            "date-time" | "datetime" => fields::date_time(),
            "raw" | "object" => fields::raw(),
            "array" => {
                let items = self
                    .items
                    .as_ref()
                    .ok_or_else(|| AppError::spec("array fields need 'items'"))?;
                fields::array(items.to_builder(registry)?)
            }
            other => fields::nested(&lookup_model(registry, other)?).as_list(self.as_list),
        };
        Ok(builder)
    }

    /// The field builder this declaration describes.
    pub fn to_builder(&self, registry: &ModelRegistry) -> Result<FieldBuilder, AppError> {
        let mut builder = self
            .base(registry)?
            .required(self.required)
            .discriminator(self.discriminator);
        if let Some(read_only) = self.read_only {
            builder = builder.read_only(read_only);
        }
        if let Some(title) = &self.title {
            builder = builder.title(title.as_str());
        }
        if let Some(description) = &self.description {
            builder = builder.description(description.as_str());
        }
        if let Some(format) = &self.format {
            builder = builder.format(format.as_str());
        }
        if let Some(example) = &self.example {
            builder = builder.example(example.clone());
        }
        if let Some(values) = &self.enum_values {
            builder = builder.enum_values(values.clone());
        }
        builder = apply(builder, &self.default, |b, v| b.default(v));
        builder = apply(builder, &self.min_length, |b, v| b.min_length(v));
        builder = apply(builder, &self.max_length, |b, v| b.max_length(v));
        builder = apply(builder, &self.pattern, |b, v| b.pattern(v));
        builder = apply(builder, &self.minimum, |b, v| b.minimum(v));
        builder = apply(builder, &self.exclusive_minimum, |b, v| {
            b.exclusive_minimum(v)
        });
        builder = apply(builder, &self.maximum, |b, v| b.maximum(v));
        builder = apply(builder, &self.exclusive_maximum, |b, v| {
            b.exclusive_maximum(v)
        });
        builder = apply(builder, &self.multiple_of, |b, v| b.multiple_of(v));
        builder = apply(builder, &self.min_items, |b, v| b.min_items(v));
        builder = apply(builder, &self.max_items, |b, v| b.max_items(v));
        builder = apply(builder, &self.unique_items, |b, v| b.unique_items(v));
        Ok(builder)
    }
}

impl ParserSpec {
    /// The parser this declaration describes.
    pub fn to_parser(&self, registry: &ModelRegistry) -> Result<RequestParser, AppError> {
        let mut parser = RequestParser::new()
            .with_trim(self.trim)
            .with_bundle_errors(self.bundle_errors);
        for spec in &self.args {
            let mut argument = Argument::new(spec.name.as_str())
                .with_required(spec.required)
                .with_choices(spec.choices.iter().cloned());
            if let Some(arg_type) = &spec.arg_type {
                argument = argument.with_type(arg_type.resolve(registry)?);
            }
            if let Some(location) = spec.location {
                argument = argument.with_location(location);
            }
            if let Some(default) = &spec.default {
                argument = argument.with_default(default.clone());
            }
            if let Some(action) = spec.action {
                argument = argument.with_action(action);
            }
            if let Some(help) = &spec.help {
                argument = argument.with_help(help.as_str());
            }
            if let Some(trim) = spec.trim {
                argument = argument.with_trim(trim);
            }
            parser.add_argument(argument);
        }
        Ok(parser)
    }
}

impl HeaderSpec {
    fn to_header(&self, registry: &ModelRegistry) -> Result<HeaderDoc, AppError> {
        match self {
            HeaderSpec::Description(description) => Ok(HeaderDoc::new(description.as_str())),
            HeaderSpec::Full {
                description,
                header_type,
            } => Ok(HeaderDoc {
                description: description.clone(),
                header_type: header_type
                    .as_ref()
                    .map(|t| t.resolve(registry))
                    .transpose()?,
                ..HeaderDoc::default()
            }),
        }
    }
}

impl ResponseSpec {
    fn to_response(&self, registry: &ModelRegistry) -> Result<ResponseDoc, AppError> {
        match self {
            ResponseSpec::Description(description) => Ok(ResponseDoc::new(description.as_str())),
            ResponseSpec::Full {
                description,
                model,
                envelope,
                headers,
            } => {
                let mut response = ResponseDoc {
                    description: description.clone(),
                    ..ResponseDoc::default()
                };
                if let Some(model) = model {
                    response = response.with_model(model.resolve(registry)?);
                }
                if let Some(envelope) = envelope {
                    response = response.with_envelope(envelope.as_str());
                }
                for (name, header) in headers {
                    response = response.with_header(name.as_str(), header.to_header(registry)?);
                }
                Ok(response)
            }
        }
    }
}

impl ParamSpec {
    fn to_param(&self, registry: &ModelRegistry) -> Result<ParamDoc, AppError> {
        Ok(ParamDoc {
            location: self.location.clone(),
            param_type: self
                .param_type
                .as_ref()
                .map(|t| t.resolve(registry))
                .transpose()?,
            format: self.format.clone(),
            default: self.default.clone().map(Into::into),
            required: self.required,
            description: self.description.clone(),
            extra: self.extra.clone(),
        })
    }
}

impl HandlerSpec {
    /// The handler this declaration describes.
    pub fn to_handler(
        &self,
        registry: &ModelRegistry,
        parsers: &IndexMap<String, ParserSpec>,
    ) -> Result<Handler, AppError> {
        let mut handler = Handler::new(self.name.as_str());
        if self.hidden {
            handler = handler.hide();
        }
        if let Some(route) = &self.route {
            handler = handler.route(route.as_str());
        }
        if let Some(method) = &self.method {
            handler = handler.method(method);
        }
        if let Some(operation_id) = &self.operation_id {
            handler = handler.name_as(operation_id.as_str());
        }
        if let Some(summary) = &self.summary {
            handler = handler.summary(summary.as_str());
        }
        if let Some(description) = &self.description {
            handler = handler.description(description.as_str());
        }
        if let Some(namespace) = &self.namespace {
            handler = handler.namespace(namespace.clone());
        }

        for expect in &self.expect {
            let expect = match expect {
                ExpectSpec::Parser { parser } => parsers
                    .get(parser)
                    .ok_or_else(|| AppError::spec(format!("Unknown parser '{}'", parser)))?
                    .to_parser(registry)?
                    .into(),
                ExpectSpec::Body {
                    body,
                    description: Some(description),
                } => Expect::described(body.resolve(registry)?, description.as_str()),
                ExpectSpec::Body { body, .. } => Expect::body(body.resolve(registry)?),
            };
            handler = handler.expect(expect);
        }

        for (name, param) in &self.params {
            handler = handler.param(name.as_str(), param.to_param(registry)?);
        }
        for (code, response) in &self.responses {
            let code: u16 = code
                .parse()
                .map_err(|_| AppError::spec(format!("Invalid response code '{}'", code)))?;
            handler = handler.response(code, response.to_response(registry)?);
        }
        for (name, header) in &self.headers {
            handler = handler.header(name.as_str(), header.to_header(registry)?);
        }

        if let Some(produces) = &self.produces {
            handler = handler.produces(produces.iter().cloned());
        }
        if self.deprecated {
            handler = handler.deprecated();
        }
        for (key, value) in &self.vendor {
            handler = handler.vendor(key.as_str(), value.clone());
        }
        if let Some(security) = &self.security {
            handler = handler.security(security.iter().cloned());
        }
        if let Some(model) = &self.model {
            handler = handler.model(model.resolve(registry)?);
        }
        if let Some(code) = self.default_code {
            handler = handler.default_code(code);
        }
        Ok(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MANIFEST: &str = r#"
metadata:
  title: Pets
  version: "1.2"
  tags:
    - [Pets, Everything about pets]
models:
  Pet:
    fields:
      name: { type: string, required: true }
      tags: { type: array, items: { type: string }, max_items: 5 }
  Dog:
    parents: [Pet]
    fields:
      barks: { type: boolean }
parsers:
  search:
    args:
      - { name: limit, type: integer, default: 10 }
      - { name: kind, choices: [cat, dog], location: args }
handlers:
  - name: list_pets
    route: /pets
    method: get
    namespace: { name: Pets }
    expect: [{ parser: search }]
    params:
      limit: { default: 25 }
    responses:
      "200": { description: OK, model: [Pet] }
  - name: get_dog
    route: /dogs/<int:id>
    method: get
    model: Dog
    headers:
      X-Rate-Limit: { description: Calls left, type: integer }
  - name: secret
    hidden: true
"#;

    #[test]
    fn test_manifest_to_document() {
        let manifest = Manifest::parse(MANIFEST, true).unwrap();
        let document = manifest.schema().unwrap().generate().unwrap();

        assert_eq!(document["info"]["title"], "Pets");
        assert_eq!(
            document["tags"],
            json!([{"name": "Pets", "description": "Everything about pets"}])
        );
        assert_eq!(
            document["paths"]["/pets"]["get"]["parameters"],
            json!([
                {"name": "limit", "in": "query", "type": "integer", "default": 25},
                {"name": "kind", "in": "query", "type": "string", "enum": ["cat", "dog"], "collectionFormat": "multi"}
            ])
        );
        assert_eq!(
            document["paths"]["/pets"]["get"]["responses"]["200"]["schema"],
            json!({"type": "array", "items": {"$ref": "#/definitions/Pet"}})
        );
        assert_eq!(
            document["paths"]["/dogs/{id}"]["get"]["responses"]["200"],
            json!({
                "description": "Success",
                "headers": {"X-Rate-Limit": {"description": "Calls left", "type": "integer"}},
                "schema": {"$ref": "#/definitions/Dog"}
            })
        );
        assert_eq!(
            document["definitions"]["Dog"]["allOf"][0],
            json!({"$ref": "#/definitions/Pet"})
        );
        assert_eq!(
            document["definitions"]["Pet"]["properties"]["tags"],
            json!({"type": "array", "maxItems": 5, "items": {"type": "string"}})
        );
        assert!(document["paths"].get("secret").is_none());
    }

    #[test]
    fn test_json_manifest() {
        let manifest = Manifest::parse(
            r#"{"handlers": [{"name": "ping", "route": "/ping", "method": "GET"}]}"#,
            false,
        )
        .unwrap();
        let document = manifest.schema().unwrap().generate().unwrap();
        assert_eq!(document["paths"]["/ping"]["get"]["operationId"], "ping");
    }

    #[test]
    fn test_type_resolution_order() {
        let mut registry = ModelRegistry::new();
        registry
            .define("email", Fields::new().with("to", fields::string()))
            .unwrap();

        let primitive = TypeSpec::Name("int".into()).resolve(&registry).unwrap();
        assert_eq!(primitive.serialize(), json!({"type": "integer"}));

        let model = TypeSpec::Name("email".into()).resolve(&registry).unwrap();
        assert_eq!(model.serialize(), json!({"$ref": "#/definitions/email"}));

        let input = TypeSpec::Name("url".into())
            .resolve(&ModelRegistry::new())
            .unwrap();
        assert_eq!(input.serialize(), json!({"type": "string", "format": "url"}));

        let err = TypeSpec::Name("Missing".into())
            .resolve(&registry)
            .unwrap_err();
        assert!(err.to_string().contains("Unknown type 'Missing'"));
    }

    #[test]
    fn test_unknown_parent_names_model() {
        let manifest =
            Manifest::parse("models:\n  Dog:\n    parents: [Animal]\n", true).unwrap();
        let err = manifest.registry().unwrap_err();
        assert!(err.to_string().contains("Unknown model 'Animal'"));
    }

    #[test]
    fn test_bad_field_names_model_and_field() {
        let manifest = Manifest::parse(
            "models:\n  Bag:\n    fields:\n      things: { type: array }\n",
            true,
        )
        .unwrap();
        let err = manifest.registry().unwrap_err().to_string();
        assert!(err.contains("Model 'Bag', field 'things'"));
    }

    #[test]
    fn test_unknown_parser_names_handler() {
        let manifest = Manifest::parse(
            "handlers:\n  - name: list\n    expect: [{ parser: nope }]\n",
            true,
        )
        .unwrap();
        let err = manifest.schema().unwrap_err().to_string();
        assert!(err.contains("Handler 'list'"));
        assert!(err.contains("Unknown parser 'nope'"));
    }
}
