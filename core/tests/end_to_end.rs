use oapispec_core::{
    fields, ApiMetadata, ApiSchema, Argument, Fields, Handler, HeaderDoc, Location, Model,
    Namespace, ParamDoc, Primitive, RequestParser, ResponseDoc,
};
use pretty_assertions::assert_eq;
use serde_json::json;

struct Models {
    user: Model,
    problem: Model,
    paged: Model,
}

fn models() -> Models {
    let user = Model::define(
        "User",
        Fields::new()
            .with("userId", fields::string())
            .with("username", fields::string().required(true))
            .with("emailAddress", fields::string().required(true))
            .with("isEnabled", fields::boolean())
            .with("phoneNumber", fields::string())
            .with("userMetadata", fields::raw()),
    )
    .unwrap();
    let problem = Model::define(
        "ProblemDetails",
        Fields::new()
            .with("status", fields::integer())
            .with("title", fields::string())
            .with("detail", fields::string())
            .with("type", fields::string())
            .with("instance", fields::string())
            .with("headers", fields::string()),
    )
    .unwrap();
    let paged = Model::define(
        "PagedUserList",
        Fields::new()
            .with("pageSize", fields::integer())
            .with("pageNumber", fields::integer())
            .with("total", fields::integer())
            .with("users", fields::array(fields::nested(&user))),
    )
    .unwrap();
    Models {
        user,
        problem,
        paged,
    }
}

fn full_schema() -> ApiSchema {
    let Models {
        user,
        problem,
        paged,
    } = models();

    let metadata = ApiMetadata::default()
        .with_version("2.0.0")
        .with_title("Test API")
        .with_description("The api I made")
        .with_security("apikey")
        .with_authorization(
            "apikey",
            json!({"type": "apiKey", "in": "header", "name": "Authorization"}),
        );

    let search = RequestParser::new()
        .with_argument(
            Argument::new("page_size")
                .with_type(Primitive::Integer)
                .with_default(10)
                .with_required(true)
                .with_location(Location::Query),
        )
        .with_argument(
            Argument::new("page_number")
                .with_type(Primitive::Integer)
                .with_default(1)
                .with_required(true),
        )
        .with_argument("search_text")
        .with_argument("sort");

    let unauthorized = ResponseDoc::new("Unauthorized").with_model(&problem);

    let ping = Handler::new("ping")
        .namespace(Namespace::new("Health Check"))
        .route("/ping")
        .method("GET")
        .response(201, ResponseDoc::new("Created").with_model(&user))
        .response(401, unauthorized.clone())
        .header("X-Tracking-Token", HeaderDoc::new("Tracking token"));

    let add_user = Handler::new("add_user")
        .namespace(Namespace::new("User"))
        .route("/user")
        .method("POST")
        .response(201, ResponseDoc::new("Created").with_model(&user))
        .response(401, unauthorized.clone())
        .expect(&user)
        .security(["apikey"]);

    let get_users = Handler::new("get_users")
        .namespace(Namespace::new("User"))
        .route("/user")
        .method("GET")
        .response(200, ResponseDoc::new("OK").with_model(&paged))
        .response(401, unauthorized.clone())
        .expect(search)
        .param("page_size", ParamDoc::new().with_default(20))
        .param("refer", ParamDoc::new().with_format("url"))
        .param(
            "email",
            ParamDoc::new().with_format("email").with_location("query"),
        );

    let find_user = Handler::new("find_user")
        .namespace(Namespace::new("User"))
        .route("/user/<str:user_id>")
        .method("GET")
        .response(200, ResponseDoc::new("OK").with_model(&user))
        .response(401, unauthorized.clone())
        .produces(["application/xml"])
        .deprecated();

    let update_user = Handler::new("update_user")
        .namespace(Namespace::new("User"))
        .route("/user/<str:user_id>")
        .method("PUT")
        .response(200, ResponseDoc::new("OK").with_model(&user))
        .response(401, unauthorized)
        .vendor("swagger-ui-color", "black");

    let grant_admin = Handler::new("grant_admin").hide();

    ApiSchema::new(metadata)
        .register(ping)
        .register(add_user)
        .register(get_users)
        .register(find_user)
        .register(update_user)
        .register(grant_admin)
}

#[test]
fn test_full_document() {
    let document = full_schema().generate().unwrap();

    let user_ref = json!({"$ref": "#/definitions/User"});
    let problem_ref = json!({"$ref": "#/definitions/ProblemDetails"});
    let unauthorized = json!({"description": "Unauthorized", "schema": problem_ref});
    let user_id = json!({"name": "user_id", "in": "path", "required": true, "type": "string"});

    let expected = json!({
        "swagger": "2.0",
        "basePath": "/",
        "paths": {
            "/ping": {
                "get": {
                    "responses": {
                        "201": {
                            "description": "Created",
                            "schema": user_ref,
                            "headers": {
                                "X-Tracking-Token": {"description": "Tracking token", "type": "string"}
                            }
                        },
                        "401": {
                            "description": "Unauthorized",
                            "schema": problem_ref,
                            "headers": {
                                "X-Tracking-Token": {"description": "Tracking token", "type": "string"}
                            }
                        }
                    },
                    "operationId": "ping",
                    "tags": ["Health Check"]
                }
            },
            "/user": {
                "post": {
                    "responses": {
                        "201": {"description": "Created", "schema": user_ref},
                        "401": unauthorized
                    },
                    "operationId": "add_user",
                    "parameters": [
                        {"name": "payload", "required": true, "in": "body", "schema": user_ref}
                    ],
                    "security": [{"apikey": []}],
                    "tags": ["User"]
                },
                "get": {
                    "responses": {
                        "200": {"description": "OK", "schema": {"$ref": "#/definitions/PagedUserList"}},
                        "401": unauthorized
                    },
                    "operationId": "get_users",
                    "parameters": [
                        {"name": "page_size", "in": "query", "type": "integer", "required": true, "default": 20},
                        {"name": "page_number", "in": "query", "type": "integer", "required": true, "default": 1},
                        {"name": "search_text", "in": "query", "type": "string"},
                        {"name": "sort", "in": "query", "type": "string"},
                        {"name": "refer", "in": "query", "type": "string", "format": "url"},
                        {"name": "email", "in": "query", "type": "string", "format": "email"}
                    ],
                    "tags": ["User"]
                }
            },
            "/user/{user_id}": {
                "get": {
                    "responses": {
                        "200": {"description": "OK", "schema": user_ref},
                        "401": unauthorized
                    },
                    "operationId": "find_user",
                    "parameters": [user_id],
                    "tags": ["User"],
                    "produces": ["application/xml"],
                    "deprecated": true
                },
                "put": {
                    "responses": {
                        "200": {"description": "OK", "schema": user_ref},
                        "401": unauthorized
                    },
                    "operationId": "update_user",
                    "parameters": [user_id],
                    "tags": ["User"],
                    "x-swagger-ui-color": "black"
                }
            }
        },
        "info": {"title": "Test API", "version": "2.0.0", "description": "The api I made"},
        "produces": ["application/json"],
        "consumes": ["application/json"],
        "securityDefinitions": {
            "apikey": {"type": "apiKey", "in": "header", "name": "Authorization"}
        },
        "security": [{"apikey": []}],
        "tags": [{"name": "Health Check"}, {"name": "User"}],
        "definitions": {
            "PagedUserList": {
                "properties": {
                    "pageSize": {"type": "integer"},
                    "pageNumber": {"type": "integer"},
                    "total": {"type": "integer"},
                    "users": {"type": "array", "items": user_ref}
                },
                "type": "object"
            },
            "ProblemDetails": {
                "properties": {
                    "status": {"type": "integer"},
                    "title": {"type": "string"},
                    "detail": {"type": "string"},
                    "type": {"type": "string"},
                    "instance": {"type": "string"},
                    "headers": {"type": "string"}
                },
                "type": "object"
            },
            "User": {
                "required": ["emailAddress", "username"],
                "properties": {
                    "userId": {"type": "string"},
                    "username": {"type": "string"},
                    "emailAddress": {"type": "string"},
                    "isEnabled": {"type": "boolean"},
                    "phoneNumber": {"type": "string"},
                    "userMetadata": {"type": "object"}
                },
                "type": "object"
            }
        }
    });

    assert_eq!(document, expected);
}

#[test]
fn test_paths_and_definitions_are_sorted() {
    let document = full_schema().generate().unwrap();

    let paths: Vec<&String> = document["paths"].as_object().unwrap().keys().collect();
    assert_eq!(paths, vec!["/ping", "/user", "/user/{user_id}"]);

    let definitions: Vec<&String> = document["definitions"]
        .as_object()
        .unwrap()
        .keys()
        .collect();
    assert_eq!(definitions, vec!["PagedUserList", "ProblemDetails", "User"]);
}

#[test]
fn test_hidden_handler_is_absent() {
    let document = full_schema().generate().unwrap();
    let rendered = serde_json::to_string(&document).unwrap();
    assert!(!rendered.contains("grant_admin"));
}

#[test]
fn test_generation_is_deterministic() {
    let schema = full_schema();
    let first = serde_json::to_string_pretty(&schema.generate().unwrap()).unwrap();
    let second = serde_json::to_string_pretty(&schema.generate().unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_broken_handler_aborts_generation() {
    let schema = full_schema().register(Handler::new("orphan").method("get"));
    let err = schema.generate().unwrap_err();
    assert!(err.to_string().contains("Handler 'orphan'"));
}

#[test]
fn test_registered_but_unused_model_is_emitted() {
    let Models { user, .. } = models();
    let audit = Model::inherit(
        "AuditedUser",
        Fields::new().with("changedBy", fields::string()),
        [&user],
    )
    .unwrap();

    let schema = ApiSchema::new(ApiMetadata::default())
        .register_model(&audit)
        .unwrap();
    let document = schema.generate().unwrap();

    assert_eq!(
        document["definitions"]["AuditedUser"],
        json!({
            "allOf": [
                {"$ref": "#/definitions/User"},
                {"properties": {"changedBy": {"type": "string"}}, "type": "object"}
            ]
        })
    );
    assert!(document["definitions"]["User"].is_object());
}
