//! # Request Parser
//!
//! Declares request arguments independently of models and turns them into
//! Swagger parameter objects.
//!
//! Arguments keep insertion order, which is also the order of the emitted
//! parameters. Cookie arguments are never documented.

use crate::error::{AppError, AppResult};
use crate::types::SchemaKind;
use crate::value::Resolvable;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::str::FromStr;

/// Where an argument is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Location {
    /// Query string (`args`, `values`).
    #[default]
    Query,
    /// Form body.
    Form,
    /// Request headers.
    Header,
    /// JSON body.
    Json,
    /// Uploaded files.
    Files,
    /// Cookies (never documented).
    Cookie,
}

impl Location {
    /// The Swagger `in` value, `None` for cookies.
    pub fn swagger_name(&self) -> Option<&'static str> {
        match self {
            Location::Query => Some("query"),
            Location::Form | Location::Files => Some("formData"),
            Location::Header => Some("header"),
            Location::Json => Some("body"),
            Location::Cookie => None,
        }
    }
}

impl FromStr for Location {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "args" | "values" | "query" => Ok(Location::Query),
            "form" | "formData" => Ok(Location::Form),
            "headers" | "header" => Ok(Location::Header),
            "json" | "body" => Ok(Location::Json),
            "files" => Ok(Location::Files),
            "cookie" | "cookies" => Ok(Location::Cookie),
            other => Err(AppError::spec(format!(
                "Unsupported argument location: {}",
                other
            ))),
        }
    }
}

impl TryFrom<String> for Location {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        value.parse()
    }
}

/// How repeated values are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// A single value.
    #[default]
    Store,
    /// Repeated parameter (`collectionFormat: multi`).
    Append,
    /// Comma separated (`collectionFormat: csv`).
    Split,
}

/// One request parameter declaration.
#[derive(Debug, Clone)]
pub struct Argument {
    name: String,
    default: Option<Resolvable<Value>>,
    required: bool,
    location: Location,
    arg_type: Option<SchemaKind>,
    choices: Vec<Value>,
    action: Action,
    help: Option<String>,
    trim: Option<bool>,
}

impl Argument {
    /// A query-string `string` argument called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            required: false,
            location: Location::default(),
            arg_type: None,
            choices: Vec::new(),
            action: Action::default(),
            help: None,
            trim: None,
        }
    }

    /// The argument name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument location.
    pub fn location(&self) -> Location {
        self.location
    }

    /// The declared value type, if any.
    pub fn arg_type(&self) -> Option<&SchemaKind> {
        self.arg_type.as_ref()
    }

    /// Whether surrounding whitespace is trimmed.
    pub fn trim(&self) -> bool {
        self.trim.unwrap_or(false)
    }

    /// The default value; may be deferred.
    pub fn with_default(mut self, default: impl Into<Resolvable<Value>>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Marks the argument as required.
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the location.
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Sets the value type.
    pub fn with_type(mut self, arg_type: impl Into<SchemaKind>) -> Self {
        self.arg_type = Some(arg_type.into());
        self
    }

    /// Restricts the accepted values.
    pub fn with_choices<V: Into<Value>>(mut self, choices: impl IntoIterator<Item = V>) -> Self {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the collection action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Sets the help text, documented as the parameter description.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Enables or disables whitespace trimming for this argument only.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = Some(trim);
        self
    }

    /// The Swagger parameter object, or `None` for cookie arguments.
    pub fn to_parameter(&self) -> Option<Value> {
        let location = self.location.swagger_name()?;

        let mut param = Map::new();
        param.insert("name".into(), Value::from(self.name.as_str()));
        param.insert("in".into(), Value::from(location));

        let mut body_schema = None;
        match &self.arg_type {
            None if self.location == Location::Files => {
                param.insert("type".into(), Value::from("file"));
            }
            None => {
                param.insert("type".into(), Value::from("string"));
            }
            Some(SchemaKind::Primitive(primitive)) => {
                param.insert("type".into(), Value::from(primitive.as_str()));
            }
            Some(kind) if kind.is_model_like() => {
                param.insert("in".into(), Value::from("body"));
                body_schema = Some(kind.serialize());
            }
            Some(kind) => {
                if let Value::Object(schema) = kind.serialize() {
                    param.extend(schema);
                }
            }
        }

        if self.required {
            param.insert("required".into(), Value::Bool(true));
        }
        if let Some(help) = &self.help {
            param.insert("description".into(), Value::from(help.as_str()));
        }
        if let Some(default) = self.default.as_ref().map(Resolvable::resolve) {
            if !default.is_null() {
                param.insert("default".into(), default);
            }
        }

        let collection_format = match self.action {
            Action::Store => None,
            Action::Append => Some("multi"),
            Action::Split => Some("csv"),
        };
        if let Some(collection_format) = collection_format {
            match body_schema.take() {
                Some(schema) => {
                    body_schema = Some(json!({"type": "array", "items": schema}));
                }
                None => {
                    let item_type = param
                        .get("type")
                        .cloned()
                        .unwrap_or_else(|| Value::from("string"));
                    param.insert("items".into(), json!({ "type": item_type }));
                    param.insert("type".into(), Value::from("array"));
                }
            }
            param.insert("collectionFormat".into(), Value::from(collection_format));
        }

        if !self.choices.is_empty() {
            param.insert("enum".into(), Value::Array(self.choices.clone()));
            param.insert("collectionFormat".into(), Value::from("multi"));
        }

        if let Some(schema) = body_schema {
            param.insert("schema".into(), schema);
        }

        Some(Value::Object(param))
    }
}

impl From<&str> for Argument {
    fn from(name: &str) -> Self {
        Argument::new(name)
    }
}

impl From<String> for Argument {
    fn from(name: String) -> Self {
        Argument::new(name)
    }
}

/// An ordered set of arguments.
#[derive(Debug, Clone, Default)]
pub struct RequestParser {
    args: Vec<Argument>,
    trim: bool,
    bundle_errors: bool,
}

impl RequestParser {
    /// An empty parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trims whitespace on every argument that does not say otherwise.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Reports every argument error at once instead of the first one.
    pub fn with_bundle_errors(mut self, bundle_errors: bool) -> Self {
        self.bundle_errors = bundle_errors;
        self
    }

    /// Builder-style [`RequestParser::add_argument`].
    pub fn with_argument(mut self, argument: impl Into<Argument>) -> Self {
        self.add_argument(argument);
        self
    }

    /// Appends an argument; a bare name builds a default one.
    pub fn add_argument(&mut self, argument: impl Into<Argument>) -> &mut Self {
        let mut argument = argument.into();
        if self.trim && argument.trim.is_none() {
            argument.trim = Some(true);
        }
        self.args.push(argument);
        self
    }

    /// The arguments in insertion order.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// Parser-wide trim setting.
    pub fn trim(&self) -> bool {
        self.trim
    }

    /// Whether errors are bundled.
    pub fn bundle_errors(&self) -> bool {
        self.bundle_errors
    }

    /// An independent copy, suitable for extending per handler.
    pub fn copy(&self) -> RequestParser {
        self.clone()
    }

    /// The Swagger parameters, in insertion order.
    ///
    /// Fails when body and formData parameters would be mixed.
    pub fn to_parameter_list(&self) -> AppResult<Vec<Value>> {
        let params: Vec<Value> = self.args.iter().filter_map(Argument::to_parameter).collect();
        check_locations(&params)?;
        Ok(params)
    }
}

/// Rejects a parameter set mixing `in: body` and `in: formData`.
pub(crate) fn check_locations<'a, I>(params: I) -> AppResult<()>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut body = false;
    let mut form = false;
    for param in params {
        match param.get("in").and_then(Value::as_str) {
            Some("body") => body = true,
            Some("formData") => form = true,
            _ => {}
        }
    }
    if body && form {
        return Err(AppError::spec("Can't use formData and body at the same time"));
    }
    Ok(())
}
