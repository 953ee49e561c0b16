#![deny(missing_docs)]

//! # Generate Command
//!
//! Assembles the Swagger document declared by a manifest.

use crate::error::CliResult;
use crate::manifest::Manifest;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the manifest (.yaml, .yml or .json).
    #[clap(long, env = "OAPISPEC_MANIFEST")]
    pub manifest: PathBuf,

    /// Output path for the document.
    /// Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long, env = "OAPISPEC_OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Executes the document generation.
pub fn execute(args: &GenerateArgs) -> CliResult<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let document = manifest.schema()?.generate()?;
    write_document(&document, args.output.as_deref())
}

/// Writes `document` to `output` (YAML for `.yaml`/`.yml`, JSON otherwise),
/// or pretty JSON to stdout.
pub fn write_document(document: &Value, output: Option<&Path>) -> CliResult<()> {
    let Some(out_path) = output else {
        println!("{}", serde_json::to_string_pretty(document)?);
        return Ok(());
    };

    let rendered = match out_path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::to_string(document)?,
        _ => serde_json::to_string_pretty(document)?,
    };
    write_output(out_path, &rendered)
}

/// Writes `content` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, content: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    tracing::info!(path = %path.display(), "output written");
    println!("Written to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MANIFEST: &str = r#"
metadata:
  title: Shop
models:
  Item:
    fields:
      sku: { type: string, required: true }
handlers:
  - name: get_item
    route: /items/<sku>
    method: get
    model: Item
"#;

    #[test]
    fn test_generate_json() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("api.yaml");
        let output = dir.path().join("out/swagger.json");
        fs::write(&manifest, MANIFEST).unwrap();

        execute(&GenerateArgs {
            manifest,
            output: Some(output.clone()),
        })
        .unwrap();

        let document: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(document["swagger"], "2.0");
        assert_eq!(document["info"]["title"], "Shop");
        assert_eq!(
            document["paths"]["/items/{sku}"]["get"]["parameters"][0]["in"],
            "path"
        );
        assert!(document["definitions"]["Item"].is_object());
    }

    #[test]
    fn test_generate_yaml() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("api.yaml");
        let output = dir.path().join("swagger.yml");
        fs::write(&manifest, MANIFEST).unwrap();

        execute(&GenerateArgs {
            manifest,
            output: Some(output.clone()),
        })
        .unwrap();

        let document: Value = serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(document["swagger"], "2.0");
        assert!(document["paths"]["/items/{sku}"]["get"].is_object());
    }

    #[test]
    fn test_generate_models_source() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("models.rs"),
            "struct Order { id: i64, note: Option<String> }",
        )
        .unwrap();
        let manifest = dir.path().join("api.json");
        fs::write(
            &manifest,
            r#"{
                "models_source": "models.rs",
                "handlers": [{"name": "get_order", "route": "/orders/<int:id>", "method": "get", "model": "Order"}]
            }"#,
        )
        .unwrap();
        let output = dir.path().join("swagger.json");

        execute(&GenerateArgs {
            manifest,
            output: Some(output.clone()),
        })
        .unwrap();

        let document: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(document["definitions"]["Order"]["required"][0], "id");
    }

    #[test]
    fn test_generate_reports_broken_handler() {
        let dir = tempdir().unwrap();
        let manifest = dir.path().join("api.yaml");
        fs::write(&manifest, "handlers:\n  - name: lost\n    method: get\n").unwrap();

        let err = execute(&GenerateArgs {
            manifest,
            output: Some(dir.path().join("never.json")),
        })
        .unwrap_err();
        assert!(err.to_string().contains("Handler 'lost'"));
        assert!(!dir.path().join("never.json").exists());
    }
}
