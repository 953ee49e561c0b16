#![deny(missing_docs)]

//! # Validate Command
//!
//! Checks a JSON instance against one manifest model.

use crate::error::CliResult;
use crate::manifest::Manifest;
use oapispec_core::{AppError, ValidationErrors};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Arguments for the validate command.
#[derive(clap::Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the manifest declaring the model.
    #[clap(long, env = "OAPISPEC_MANIFEST")]
    pub manifest: PathBuf,

    /// Name of the model to validate against.
    #[clap(long)]
    pub model: String,

    /// Path to the JSON instance.
    #[clap(long)]
    pub data: PathBuf,
}

/// Runs the validation; `Ok(Some(errors))` when the instance does not conform.
pub fn check(args: &ValidateArgs) -> CliResult<Option<ValidationErrors>> {
    let registry = Manifest::load(&args.manifest)?.registry()?;
    let model = registry
        .get(&args.model)
        .ok_or_else(|| AppError::Usage(format!("Model '{}' is not declared", args.model)))?;
    let data: Value = serde_json::from_str(&fs::read_to_string(&args.data)?)?;
    Ok(model.validate(&data)?)
}

/// Prints `valid` or the error map; returns whether the instance conforms.
pub fn execute(args: &ValidateArgs) -> CliResult<bool> {
    match check(args)? {
        None => {
            println!("valid");
            Ok(true)
        }
        Some(errors) => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(dir: &tempfile::TempDir, data: &str) -> ValidateArgs {
        let manifest = dir.path().join("api.yaml");
        fs::write(
            &manifest,
            "models:\n  User:\n    fields:\n      name: { type: string, required: true }\n      age: { type: integer }\n",
        )
        .unwrap();
        let data_path = dir.path().join("data.json");
        fs::write(&data_path, data).unwrap();
        ValidateArgs {
            manifest,
            model: "User".into(),
            data: data_path,
        }
    }

    #[test]
    fn test_valid_instance() {
        let dir = tempdir().unwrap();
        assert!(execute(&args(&dir, r#"{"name": "ada", "age": 36}"#)).unwrap());
    }

    #[test]
    fn test_invalid_instance() {
        let dir = tempdir().unwrap();
        let errors = check(&args(&dir, r#"{"age": "old"}"#)).unwrap().unwrap();
        assert_eq!(errors["name"], "'name' is a required property");
        assert!(errors.contains_key("age"));
        assert!(!execute(&args(&dir, "{}")).unwrap());
    }

    #[test]
    fn test_unknown_model() {
        let dir = tempdir().unwrap();
        let mut args = args(&dir, "{}");
        args.model = "Ghost".into();
        let err = check(&args).unwrap_err();
        assert!(err.to_string().contains("Model 'Ghost' is not declared"));
    }
}
