//! # Swagger 2.0 Assembly
//!
//! Turns metadata, handlers and registered models into one Swagger 2.0 document.
//!
//! Per operation, parameters are merged with increasing precedence:
//! expected (from `expect`) < explicit (`params`) < path (from the route).
//! Paths and definitions are sorted by name so the same input always yields the
//! same document. Any malformed handler aborts assembly; no partial document is
//! produced.

use crate::doc::{Expect, Handler, HandlerDoc, HeaderDoc, SecurityRequirement};
use crate::error::{AppError, AppResult};
use crate::model::Model;
use crate::ref_utils::definition_name;
use crate::registry::ModelRegistry;
use crate::reqparse::check_locations;
use crate::routes::{clean_route, extract_path_params};
use crate::schema::{ApiMetadata, Tag};
use crate::types::SchemaKind;
use crate::utils::{merge, not_none};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Description used for responses declared without one.
pub const DEFAULT_RESPONSE_DESCRIPTION: &str = "Success";

/// Assembles the document.
pub fn create_openapi_spec(
    metadata: &ApiMetadata,
    handlers: &[Handler],
    models: &ModelRegistry,
) -> AppResult<Value> {
    let visible: Vec<&Handler> = handlers
        .iter()
        .filter(|handler| {
            if handler.is_hidden() {
                tracing::debug!(handler = handler.identifier(), "skipping hidden handler");
            }
            !handler.is_hidden()
        })
        .collect();

    let mut registry = models.clone();
    let mut paths: BTreeMap<String, Map<String, Value>> = BTreeMap::new();

    for handler in &visible {
        let in_handler = |e: AppError| e.in_handler(handler.identifier());
        let doc = handler.doc();
        let route = doc
            .route
            .as_deref()
            .ok_or_else(|| AppError::spec("no route declared"))
            .map_err(in_handler)?;
        let method = doc
            .method
            .as_deref()
            .ok_or_else(|| AppError::spec("no HTTP method declared"))
            .map_err(in_handler)?;

        tracing::debug!(
            handler = handler.identifier(),
            route,
            method,
            "serializing operation"
        );
        let operation = serialize_operation(handler, route).map_err(in_handler)?;
        for model in handler_models(doc) {
            registry.register_reachable(&model).map_err(in_handler)?;
        }

        let methods = paths.entry(clean_route(route)).or_default();
        if methods.contains_key(method) {
            tracing::warn!(
                handler = handler.identifier(),
                route,
                method,
                "duplicate operation, overwriting the earlier registration"
            );
        }
        methods.insert(method.to_string(), operation);
    }

    let paths: Map<String, Value> = paths
        .into_iter()
        .map(|(path, methods)| (path, Value::Object(methods)))
        .collect();

    let definitions = registry.definitions();
    check_references(&paths, &definitions, &registry)?;

    let mut spec = Map::new();
    spec.insert("swagger".into(), json!("2.0"));
    spec.insert("basePath".into(), json!(normalize_base_path(&metadata.base_path)));
    spec.insert("paths".into(), Value::Object(paths));
    spec.insert("info".into(), create_info(metadata));
    if metadata.representations.is_empty() {
        spec.insert("produces".into(), json!(["application/json"]));
    } else {
        spec.insert("produces".into(), json!(metadata.representations));
    }
    spec.insert("consumes".into(), json!(["application/json"]));
    if !metadata.authorizations.is_empty() {
        spec.insert(
            "securityDefinitions".into(),
            Value::Object(metadata.authorizations.clone()),
        );
    }
    if !metadata.security.is_empty() {
        spec.insert("security".into(), security_requirements(&metadata.security));
    }
    let tags = extract_tags(metadata, &visible);
    if !tags.is_empty() {
        spec.insert("tags".into(), Value::Array(tags));
    }
    if definitions.as_object().is_some_and(|d| !d.is_empty()) {
        spec.insert("definitions".into(), definitions);
    }
    if let Some(host) = &metadata.host {
        spec.insert("host".into(), json!(host));
    }

    Ok(not_none(Value::Object(spec)))
}

/// Strips one trailing `/` unless the path is the root.
pub fn normalize_base_path(base_path: &str) -> String {
    if base_path.len() > 1 {
        if let Some(stripped) = base_path.strip_suffix('/') {
            return stripped.to_string();
        }
    }
    base_path.to_string()
}

fn create_info(metadata: &ApiMetadata) -> Value {
    let mut info = Map::new();
    info.insert("title".into(), json!(metadata.title));
    info.insert("version".into(), json!(metadata.version));
    if let Some(description) = &metadata.description {
        info.insert("description".into(), json!(description));
    }
    if let Some(terms) = &metadata.terms_url {
        info.insert("termsOfService".into(), json!(terms));
    }
    if let Some(contact) = &metadata.contact {
        if metadata.contact_email.is_some() || metadata.contact_url.is_some() {
            info.insert(
                "contact".into(),
                json!({
                    "name": contact,
                    "email": metadata.contact_email,
                    "url": metadata.contact_url,
                }),
            );
        }
    }
    if let Some(license) = &metadata.license {
        info.insert(
            "license".into(),
            json!({"name": license, "url": metadata.license_url}),
        );
    }
    Value::Object(info)
}

/// Declared tags first, then each new namespace. The first description seen
/// for a name is kept.
pub fn extract_tags(metadata: &ApiMetadata, handlers: &[&Handler]) -> Vec<Value> {
    let mut tags: IndexMap<String, Tag> = IndexMap::new();
    for tag in &metadata.tags {
        tags.entry(tag.name.clone()).or_insert_with(|| tag.clone());
    }
    for handler in handlers {
        if let Some(namespace) = &handler.doc().namespace {
            tags.entry(namespace.name.clone()).or_insert_with(|| Tag {
                name: namespace.name.clone(),
                description: namespace.description.clone(),
            });
        }
    }
    tags.into_values()
        .map(|tag| {
            let mut object = Map::new();
            object.insert("name".into(), json!(tag.name));
            if let Some(description) = tag.description {
                object.insert("description".into(), json!(description));
            }
            Value::Object(object)
        })
        .collect()
}

/// Normalizes security requirements to a list of requirement objects.
pub fn security_requirements(requirements: &[SecurityRequirement]) -> Value {
    Value::Array(
        requirements
            .iter()
            .map(SecurityRequirement::to_value)
            .collect(),
    )
}

fn serialize_operation(handler: &Handler, route: &str) -> AppResult<Value> {
    let doc = handler.doc();
    let parameters = parameters_for(doc, route)?;

    let mut operation = Map::new();
    operation.insert("responses".into(), Value::Object(responses_for(doc)));
    if let Some(summary) = &doc.summary {
        operation.insert("summary".into(), json!(summary));
    }
    if let Some(description) = doc.description.as_ref().filter(|d| !d.is_empty()) {
        operation.insert("description".into(), json!(description));
    }
    operation.insert("operationId".into(), json!(handler.name()));
    if !parameters.is_empty() {
        operation.insert("parameters".into(), Value::Array(parameters.clone()));
    }
    if let Some(security) = &doc.security {
        operation.insert("security".into(), security_requirements(security));
    }
    if let Some(namespace) = &doc.namespace {
        operation.insert("tags".into(), json!([namespace.name]));
    }
    if let Some(produces) = &doc.produces {
        operation.insert("produces".into(), json!(produces));
    }
    if doc.deprecated {
        operation.insert("deprecated".into(), Value::Bool(true));
    }
    if let Some(consumes) = operation_consumes(&parameters) {
        operation.insert("consumes".into(), consumes);
    }
    operation.extend(vendor_fields(doc));

    Ok(Value::Object(operation))
}

fn payload_param(schema: &SchemaKind, description: Option<&str>) -> Value {
    json!({
        "name": "payload",
        "required": true,
        "in": "body",
        "schema": schema.serialize(),
        "description": description,
    })
}

/// Parameters contributed by `expect` entries, keyed by name.
pub fn expected_params(doc: &HandlerDoc) -> AppResult<IndexMap<String, Value>> {
    let mut params = IndexMap::new();
    for expect in &doc.expect {
        match expect {
            Expect::Body {
                schema,
                description,
            } => {
                params.insert(
                    "payload".to_string(),
                    not_none(payload_param(schema, description.as_deref())),
                );
            }
            Expect::Parser(parser) => {
                for param in parser.to_parameter_list()? {
                    let name = param
                        .get("name")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string();
                    params.insert(name, param);
                }
            }
        }
    }
    Ok(params)
}

/// The merged parameter list of one operation.
pub fn parameters_for(doc: &HandlerDoc, route: &str) -> AppResult<Vec<Value>> {
    let mut params = expected_params(doc)?;

    for (name, param) in &doc.params {
        let explicit = Value::Object(param.to_partial());
        let entry = params.entry(name.clone()).or_insert_with(|| json!({}));
        let mut merged = match merge(entry, &explicit) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        merged.insert("name".into(), json!(name));
        if !merged.contains_key("type") && !merged.contains_key("schema") {
            merged.insert("type".into(), json!("string"));
        }
        if !merged.contains_key("in") {
            let location = if merged.contains_key("schema") {
                "body"
            } else {
                "query"
            };
            merged.insert("in".into(), json!(location));
        }
        // Not required is expressed by omission.
        if merged.get("required") == Some(&Value::Bool(false)) {
            merged.remove("required");
        }
        *entry = Value::Object(merged);
    }

    for (name, param) in extract_path_params(route)? {
        let entry = params.entry(name).or_insert_with(|| json!({}));
        *entry = merge(entry, &param);
    }

    check_locations(params.values())?;
    Ok(params.into_values().collect())
}

/// The response table of one operation.
pub fn responses_for(doc: &HandlerDoc) -> Map<String, Value> {
    let mut responses = Map::new();
    for (code, response) in &doc.responses {
        let description = response
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_RESPONSE_DESCRIPTION);
        let mut object = Map::new();
        object.insert("description".into(), json!(description));
        if let Some(model) = &response.model {
            let mut schema = model.serialize();
            if let Some(envelope) = &response.envelope {
                schema = json!({ "properties": { envelope.as_str(): schema } });
            }
            object.insert("schema".into(), schema);
        }
        process_headers(&mut object, doc, &response.headers);
        responses.insert(code.clone(), Value::Object(object));
    }

    if let Some(model) = &doc.model {
        let code = doc.default_code.unwrap_or(200).to_string();
        let entry = responses.entry(code).or_insert_with(|| {
            let mut object = Map::new();
            object.insert("description".into(), json!(DEFAULT_RESPONSE_DESCRIPTION));
            process_headers(&mut object, doc, &IndexMap::new());
            Value::Object(object)
        });
        if let Value::Object(object) = entry {
            object.insert("schema".into(), model.serialize());
        }
    }

    if responses.is_empty() {
        let mut object = Map::new();
        object.insert("description".into(), json!(DEFAULT_RESPONSE_DESCRIPTION));
        process_headers(&mut object, doc, &IndexMap::new());
        responses.insert("200".into(), Value::Object(object));
    }
    responses
}

fn process_headers(
    response: &mut Map<String, Value>,
    doc: &HandlerDoc,
    headers: &IndexMap<String, HeaderDoc>,
) {
    if doc.headers.is_empty() && headers.is_empty() {
        return;
    }
    let objects: Map<String, Value> = doc
        .headers
        .iter()
        .chain(headers.iter())
        .map(|(name, header)| (name.clone(), create_header_object(header)))
        .collect();
    response.insert("headers".into(), Value::Object(objects));
}

/// Builds a Swagger header object; untyped headers are strings.
pub fn create_header_object(header: &HeaderDoc) -> Value {
    let mut object = Map::new();
    if let Some(description) = &header.description {
        object.insert("description".into(), json!(description));
    }
    match &header.header_type {
        None => {
            object.insert("type".into(), json!("string"));
        }
        Some(SchemaKind::Primitive(primitive)) => {
            object.insert("type".into(), json!(primitive.as_str()));
        }
        Some(kind) => {
            if let Value::Object(schema) = kind.serialize() {
                object.extend(schema);
            }
        }
    }
    for (key, value) in &header.extra {
        object.insert(key.clone(), value.clone());
    }
    not_none(Value::Object(object))
}

/// Form encodings accepted when any parameter is `in: formData`.
pub fn operation_consumes(parameters: &[Value]) -> Option<Value> {
    let is_form = parameters
        .iter()
        .any(|p| p.get("in").and_then(Value::as_str) == Some("formData"));
    if !is_form {
        return None;
    }
    let has_file = parameters
        .iter()
        .any(|p| p.get("type").and_then(Value::as_str) == Some("file"));
    if has_file {
        Some(json!(["multipart/form-data"]))
    } else {
        Some(json!(["application/x-www-form-urlencoded", "multipart/form-data"]))
    }
}

/// Vendor extensions, `x-` prefixed.
pub fn vendor_fields(doc: &HandlerDoc) -> Map<String, Value> {
    doc.vendor
        .iter()
        .map(|(key, value)| {
            let key = if key.starts_with("x-") {
                key.clone()
            } else {
                format!("x-{}", key)
            };
            (key, value.clone())
        })
        .collect()
}

/// Every model a handler refers to directly.
fn handler_models(doc: &HandlerDoc) -> Vec<Model> {
    let mut models = Vec::new();
    for expect in &doc.expect {
        match expect {
            Expect::Body { schema, .. } => models.extend(schema.models()),
            Expect::Parser(parser) => {
                for argument in parser.args() {
                    if let Some(kind) = argument.arg_type() {
                        models.extend(kind.models());
                    }
                }
            }
        }
    }
    for param in doc.params.values() {
        if let Some(kind) = &param.param_type {
            models.extend(kind.models());
        }
    }
    for response in doc.responses.values() {
        if let Some(kind) = &response.model {
            models.extend(kind.models());
        }
    }
    if let Some(kind) = &doc.model {
        models.extend(kind.models());
    }
    models
}

fn collect_references(value: &Value, found: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                match (key.as_str(), inner) {
                    ("$ref", Value::String(reference)) => {
                        found.insert(reference.clone());
                    }
                    _ => collect_references(inner, found),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_references(item, found);
            }
        }
        _ => {}
    }
}

fn check_references(
    paths: &Map<String, Value>,
    definitions: &Value,
    registry: &ModelRegistry,
) -> AppResult<()> {
    let mut references = BTreeSet::new();
    for operation in paths.values() {
        collect_references(operation, &mut references);
    }
    collect_references(definitions, &mut references);

    for reference in references {
        if let Some(name) = definition_name(&reference) {
            if !registry.contains(&name) {
                return Err(AppError::spec(format!(
                    "Model '{}' is referenced but not registered",
                    name
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{Namespace, ParamDoc, ResponseDoc};
    use crate::fields;
    use crate::model::Fields;
    use crate::reqparse::{Argument, Location, RequestParser};
    use crate::types::Primitive;
    use pretty_assertions::assert_eq;

    fn user() -> Model {
        Model::define("User", Fields::new().with("name", fields::string())).unwrap()
    }

    fn generate(handlers: &[Handler]) -> AppResult<Value> {
        create_openapi_spec(&ApiMetadata::default(), handlers, &ModelRegistry::new())
    }

    #[test]
    fn test_base_path_normalization() {
        assert_eq!(normalize_base_path("/"), "/");
        assert_eq!(normalize_base_path("/api/"), "/api");
        assert_eq!(normalize_base_path("/api"), "/api");
    }

    #[test]
    fn test_info_contact_needs_email_or_url() {
        let metadata = ApiMetadata::default().with_contact("me", None, None);
        assert!(create_info(&metadata).get("contact").is_none());

        let metadata =
            ApiMetadata::default().with_contact("me", Some("me@example.com".into()), None);
        assert_eq!(
            create_info(&metadata)["contact"],
            json!({"name": "me", "email": "me@example.com", "url": null})
        );
    }

    #[test]
    fn test_info_license_and_terms() {
        let metadata = ApiMetadata::default()
            .with_license("MIT", Some("https://opensource.org/licenses/MIT".into()))
            .with_terms_url("https://example.com/terms");
        let info = create_info(&metadata);
        assert_eq!(info["license"]["name"], "MIT");
        assert_eq!(info["termsOfService"], "https://example.com/terms");
    }

    #[test]
    fn test_missing_route_names_handler() {
        let err = generate(&[Handler::new("orphan").method("get")]).unwrap_err();
        assert!(err.to_string().contains("Handler 'orphan'"));
        assert!(err.to_string().contains("route"));
    }

    #[test]
    fn test_hidden_handler_skipped_even_without_route() {
        let spec = generate(&[Handler::new("secret").hide()]).unwrap();
        assert_eq!(spec["paths"], json!({}));
    }

    #[test]
    fn test_default_response() {
        let spec = generate(&[Handler::new("ping").route("/ping").method("get")]).unwrap();
        assert_eq!(
            spec["paths"]["/ping"]["get"],
            json!({
                "responses": {"200": {"description": "Success"}},
                "operationId": "ping"
            })
        );
    }

    #[test]
    fn test_response_description_defaults_and_envelope() {
        let handler = Handler::new("h")
            .route("/h")
            .method("get")
            .response(201, ResponseDoc::new("").with_model(&user()).with_envelope("data"));
        let responses = responses_for(handler.doc());
        assert_eq!(
            responses["201"],
            json!({
                "description": "Success",
                "schema": {"properties": {"data": {"$ref": "#/definitions/User"}}}
            })
        );
    }

    #[test]
    fn test_default_model_response() {
        let handler = Handler::new("h")
            .route("/h")
            .method("get")
            .response(404, "Not found")
            .model(&user());
        let responses = responses_for(handler.doc());
        assert_eq!(
            responses["200"],
            json!({"description": "Success", "schema": {"$ref": "#/definitions/User"}})
        );
        assert_eq!(responses["404"], json!({"description": "Not found"}));
    }

    #[test]
    fn test_headers_union() {
        let handler = Handler::new("h")
            .route("/h")
            .method("get")
            .header("X-Rate", HeaderDoc::new("Rate").with_type(Primitive::Integer))
            .response(
                200,
                ResponseDoc::new("OK")
                    .with_header("X-Ids", HeaderDoc::default().with_type(SchemaKind::array_of(Primitive::Integer))),
            );
        let responses = responses_for(handler.doc());
        assert_eq!(
            responses["200"]["headers"],
            json!({
                "X-Rate": {"description": "Rate", "type": "integer"},
                "X-Ids": {"type": "array", "items": {"type": "integer"}}
            })
        );
    }

    #[test]
    fn test_header_shorthand() {
        assert_eq!(
            create_header_object(&HeaderDoc::from("Some header")),
            json!({"description": "Some header", "type": "string"})
        );
    }

    #[test]
    fn test_parameter_precedence() {
        let parser = RequestParser::new().with_argument(
            Argument::new("page_size")
                .with_type(Primitive::Integer)
                .with_default(10),
        );
        let handler = Handler::new("list")
            .route("/users/<int:id>")
            .method("get")
            .expect(&parser)
            .param("page_size", ParamDoc::new().with_default(20))
            .param("id", ParamDoc::new().with_description("User id").with_location("query"));
        let params = parameters_for(handler.doc(), handler.doc().route.as_deref().unwrap()).unwrap();

        assert_eq!(params[0]["default"], 20);
        assert_eq!(params[0]["type"], "integer");
        assert_eq!(
            params[1],
            json!({
                "in": "path",
                "description": "User id",
                "name": "id",
                "type": "integer",
                "required": true
            })
        );
    }

    #[test]
    fn test_explicit_not_required_is_omitted() {
        let parser = RequestParser::new().with_argument(Argument::new("q").with_required(true));
        let handler = Handler::new("h")
            .route("/h/<int:id>")
            .method("get")
            .expect(&parser)
            .param("q", ParamDoc::new().with_required(false))
            .param("extra", ParamDoc::new().with_required(false))
            .param("id", ParamDoc::new().with_required(false));
        let params = parameters_for(handler.doc(), "/h/<int:id>").unwrap();
        assert_eq!(params[0], json!({"name": "q", "in": "query", "type": "string"}));
        assert_eq!(
            params[1],
            json!({"name": "extra", "type": "string", "in": "query"})
        );
        assert_eq!(params[2]["required"], true);
    }

    #[test]
    fn test_explicit_param_defaults() {
        let handler = Handler::new("h")
            .route("/h")
            .method("get")
            .param("q", ParamDoc::new().with_description("Query"))
            .param("body", ParamDoc::new().with_type(&user()));
        let params = parameters_for(handler.doc(), "/h").unwrap();
        assert_eq!(
            params[0],
            json!({"description": "Query", "name": "q", "type": "string", "in": "query"})
        );
        assert_eq!(params[1]["in"], "body");
        assert!(params[1].get("type").is_none());
    }

    #[test]
    fn test_expect_body_payload() {
        let handler = Handler::new("h")
            .route("/h")
            .method("post")
            .expect(crate::doc::Expect::described(&user(), "The user"));
        let params = parameters_for(handler.doc(), "/h").unwrap();
        assert_eq!(
            params,
            vec![json!({
                "name": "payload",
                "required": true,
                "in": "body",
                "schema": {"$ref": "#/definitions/User"},
                "description": "The user"
            })]
        );
    }

    #[test]
    fn test_operation_level_form_body_conflict() {
        let parser = RequestParser::new()
            .with_argument(Argument::new("f").with_location(Location::Form));
        let handler = Handler::new("h")
            .route("/h")
            .method("post")
            .expect(&user())
            .expect(&parser);
        assert!(parameters_for(handler.doc(), "/h").is_err());
    }

    #[test]
    fn test_consumes() {
        let form = vec![json!({"in": "formData", "type": "string"})];
        assert_eq!(
            operation_consumes(&form),
            Some(json!(["application/x-www-form-urlencoded", "multipart/form-data"]))
        );
        let files = vec![json!({"in": "formData", "type": "file"})];
        assert_eq!(operation_consumes(&files), Some(json!(["multipart/form-data"])));
        assert_eq!(operation_consumes(&[json!({"in": "query"})]), None);
    }

    #[test]
    fn test_vendor_prefix() {
        let handler = Handler::new("h")
            .vendor("x-already", 1)
            .vendor("missing", 2);
        let vendor = vendor_fields(handler.doc());
        assert_eq!(Value::Object(vendor), json!({"x-already": 1, "x-missing": 2}));
    }

    #[test]
    fn test_tags_first_sighting_wins() {
        let metadata = ApiMetadata::default().with_tag(("Users", "A"));
        let handler = Handler::new("h")
            .route("/h")
            .method("get")
            .namespace(Namespace::new("Users").with_description("B"));
        let other = Handler::new("o")
            .route("/o")
            .method("get")
            .namespace(Namespace::new("Other"));
        let tags = extract_tags(&metadata, &[&handler, &other]);
        assert_eq!(
            tags,
            vec![
                json!({"name": "Users", "description": "A"}),
                json!({"name": "Other"}),
            ]
        );
    }

    #[test]
    fn test_operation_security() {
        let handler = Handler::new("h")
            .route("/h")
            .method("get")
            .security(Vec::<SecurityRequirement>::new());
        let open = Handler::new("o")
            .route("/o")
            .method("get")
            .security(["apikey"]);
        let spec = generate(&[handler, open]).unwrap();
        assert_eq!(spec["paths"]["/h"]["get"]["security"], json!([]));
        assert_eq!(spec["paths"]["/o"]["get"]["security"], json!([{"apikey": []}]));
        assert!(spec.get("security").is_none());
    }

    #[test]
    fn test_duplicate_operation_last_wins() {
        let first = Handler::new("first").route("/x").method("get");
        let second = Handler::new("second").route("/x").method("get");
        let spec = generate(&[first, second]).unwrap();
        assert_eq!(spec["paths"]["/x"]["get"]["operationId"], "second");
    }

    #[test]
    fn test_definitions_collected_from_handlers() {
        let base = Model::define("Base", Fields::new()).unwrap();
        let child = base.extend("Child", Fields::new()).unwrap();
        let handler = Handler::new("h").route("/h").method("post").expect(&child);
        let spec = generate(&[handler]).unwrap();
        let names: Vec<_> = spec["definitions"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(names, vec!["Base", "Child"]);
    }

    #[test]
    fn test_unregistered_reference_is_rejected() {
        let handler = Handler::new("h")
            .route("/h")
            .method("get")
            .model(SchemaKind::reference("Ghost"));
        let err = generate(&[handler]).unwrap_err();
        assert!(err.to_string().contains("Ghost"));
    }

    #[test]
    fn test_paths_are_cleaned_and_sorted() {
        let b = Handler::new("b").route("/b/<int:id>").method("get");
        let a = Handler::new("a").route("/a").method("get");
        let spec = generate(&[b, a]).unwrap();
        let keys: Vec<_> = spec["paths"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["/a", "/b/{id}"]);
    }
}
