#![deny(missing_docs)]

//! # Schema Generation Command
//!
//! Prints the Swagger definition of one Rust struct.
//! Structs it refers to are built too; their definitions follow with
//! `--with-dependencies`.

use crate::error::{CliError, CliResult};
use crate::generate::write_document;
use oapispec_core::{build_model, ModelRegistry};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

/// Arguments for the schema-gen command.
#[derive(clap::Args, Debug, Clone)]
pub struct SchemaGenArgs {
    /// Path to the Rust source file containing the struct.
    #[clap(long)]
    pub source_path: PathBuf,

    /// Name of the struct (Rust or serde name).
    #[clap(long)]
    pub name: String,

    /// Output path for the schema file.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Emit `{"definitions": {...}}` with every referenced struct.
    #[clap(long)]
    pub with_dependencies: bool,
}

/// Executes the schema generation.
pub fn execute(args: &SchemaGenArgs) -> CliResult<()> {
    let schema = render(args)?;
    write_document(&schema, args.output.as_deref())
}

fn render(args: &SchemaGenArgs) -> CliResult<Value> {
    if !args.source_path.exists() {
        return Err(CliError::General(format!(
            "Source file not found: {:?}",
            args.source_path
        )));
    }
    let content = fs::read_to_string(&args.source_path)?;
    let model = build_model(&content, &args.name)?;

    if args.with_dependencies {
        let mut registry = ModelRegistry::new();
        registry.register_reachable(&model)?;
        Ok(json!({ "definitions": registry.definitions() }))
    } else {
        Ok(model.schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SOURCE: &str = r#"
        struct Tag {
            label: String,
        }

        /// A User struct
        struct User {
            id: i32,
            name: String,
            is_active: Option<bool>,
            tags: Vec<Tag>,
        }
    "#;

    fn source_file(dir: &tempfile::TempDir) -> PathBuf {
        let src_path = dir.path().join("model.rs");
        fs::File::create(&src_path)
            .unwrap()
            .write_all(SOURCE.as_bytes())
            .unwrap();
        src_path
    }

    #[test]
    fn test_schema_gen_struct_to_json() {
        let dir = tempdir().unwrap();
        let out_path = dir.path().join("schema.json");
        let args = SchemaGenArgs {
            source_path: source_file(&dir),
            name: "User".to_string(),
            output: Some(out_path.clone()),
            with_dependencies: false,
        };

        execute(&args).unwrap();

        let schema: Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
        assert_eq!(schema["required"], json!(["id", "name", "tags"]));
        assert_eq!(schema["properties"]["id"], json!({"type": "integer"}));
        assert_eq!(
            schema["properties"]["tags"]["items"],
            json!({"$ref": "#/definitions/Tag"})
        );
    }

    #[test]
    fn test_schema_gen_with_dependencies_to_yaml() {
        let dir = tempdir().unwrap();
        let out_path = dir.path().join("schema.yaml");
        let args = SchemaGenArgs {
            source_path: source_file(&dir),
            name: "User".to_string(),
            output: Some(out_path.clone()),
            with_dependencies: true,
        };

        execute(&args).unwrap();

        let yaml_content = fs::read_to_string(&out_path).unwrap();
        assert!(yaml_content.contains("definitions:"));
        assert!(yaml_content.contains("Tag:"));
        assert!(yaml_content.contains("User:"));
    }

    #[test]
    fn test_schema_gen_not_found() {
        let dir = tempdir().unwrap();
        let args = SchemaGenArgs {
            source_path: source_file(&dir),
            name: "NonExistent".to_string(),
            output: None,
            with_dependencies: false,
        };

        let err = render(&args).unwrap_err();
        assert!(err.to_string().contains("Struct 'NonExistent' not found"));
    }

    #[test]
    fn test_schema_gen_missing_file() {
        let dir = tempdir().unwrap();
        let args = SchemaGenArgs {
            source_path: dir.path().join("missing.rs"),
            name: "User".to_string(),
            output: None,
            with_dependencies: false,
        };
        assert!(matches!(render(&args), Err(CliError::General(_))));
    }
}
