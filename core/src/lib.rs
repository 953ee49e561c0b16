#![warn(missing_docs)]

//! # oapispec core
//!
//! Assembles Swagger 2.0 documents from declarative handler and model metadata.
//!
//! Data flows leaves first: field fragments -> models -> per-handler operation
//! metadata -> the assembler, which groups operations by path and writes the
//! final document.
//!
//! ```
//! use oapispec_core::{fields, ApiMetadata, ApiSchema, Fields, Handler, Model, ResponseDoc};
//!
//! let user = Model::define("User", Fields::new().with("name", fields::string().required(true)))?;
//! let schema = ApiSchema::new(ApiMetadata::default().with_title("Users"))
//!     .register(
//!         Handler::new("get_user")
//!             .route("/user/<int:id>")
//!             .method("get")
//!             .response(200, ResponseDoc::new("The user").with_model(&user)),
//!     );
//! let document = schema.generate()?;
//! assert_eq!(document["paths"]["/user/{id}"]["get"]["operationId"], "get_user");
//! assert!(document["definitions"]["User"].is_object());
//! # Ok::<(), oapispec_core::AppError>(())
//! ```

/// Shared error types.
pub mod error;

/// Literal or deferred values.
pub mod value;

/// `$ref` helpers.
pub mod ref_utils;

/// The closed set of schema kinds.
pub mod types;

/// Field fragment builders.
pub mod fields;

/// Ready-made input schemas.
pub mod inputs;

/// Models and their composition.
pub mod model;

/// The model registry.
pub mod registry;

/// Request argument declarations.
pub mod reqparse;

/// Route template handling.
pub mod routes;

/// JSON merge helpers.
pub mod utils;

/// Handler metadata.
pub mod doc;

/// The Swagger document assembler.
pub mod openapi;

/// Document metadata and handler registration.
pub mod schema;

/// AST parsing of struct declarations.
pub mod parser;

/// Type mapping logic (Rust -> field kinds).
pub mod type_mapping;

/// Models from struct declarations.
pub mod model_builder;

/// Swagger UI page rendering.
pub mod swagger_ui;

pub use doc::{
    Expect, Handler, HandlerDoc, HeaderDoc, Namespace, ParamDoc, ResponseDoc, SecurityRequirement,
};
pub use error::{AppError, AppResult};
pub use fields::{FieldBuilder, SchemaFragment};
pub use model::{Field, Fields, Model, ValidationErrors};
pub use model_builder::{build_model, build_models};
pub use openapi::create_openapi_spec;
pub use registry::ModelRegistry;
pub use reqparse::{Action, Argument, Location, RequestParser};
pub use schema::{ApiMetadata, ApiSchema, Tag};
pub use swagger_ui::generate_swagger_ui;
pub use types::{CustomSchema, Primitive, SchemaKind};
pub use value::{deferred, Resolvable};
