//! JSON Schema loading for the topic catalog.
//!
//! Reads a schema (from disk or a bundled copy), checks that its
//! `schema_version` const is one the crate understands, and compiles a
//! validator. Compilation errors are
//! flattened to strings because the jsonschema error type borrows the schema.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const SCHEMA_VERSION_POINTER: &str = "/properties/schema_version/const";

/// Result of loading and compiling a JSON Schema.
pub(crate) struct SchemaLoadResult {
    pub schema_version: String,
    pub compiled: JSONSchema,
}

pub(crate) fn load_json_schema(
    path: &Path,
    allowed_versions: &BTreeSet<String>,
) -> Result<SchemaLoadResult> {
    let file = File::open(path).with_context(|| format!("opening schema {}", path.display()))?;
    let schema: Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing schema {}", path.display()))?;
    compile_json_schema(&schema, &path.display().to_string(), allowed_versions)
}

/// Compile schema text embedded in the binary; `label` names it in errors.
pub(crate) fn load_bundled_schema(
    text: &str,
    label: &str,
    allowed_versions: &BTreeSet<String>,
) -> Result<SchemaLoadResult> {
    let schema: Value =
        serde_json::from_str(text).with_context(|| format!("parsing schema {label}"))?;
    compile_json_schema(&schema, label, allowed_versions)
}

fn compile_json_schema(
    schema: &Value,
    label: &str,
    allowed_versions: &BTreeSet<String>,
) -> Result<SchemaLoadResult> {
    let schema_version = extract_schema_version(schema)
        .ok_or_else(|| anyhow!("schema {label} missing schema_version const"))?;
    if !allowed_versions.contains(&schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed_versions
        );
    }

    let compiled = JSONSchema::compile(schema)
        .map_err(|err| anyhow!("compiling schema {label}: {err}"))?;

    Ok(SchemaLoadResult {
        schema_version,
        compiled,
    })
}

/// Validate `instance` and join every violation into one message.
pub(crate) fn validation_errors(schema: &JSONSchema, instance: &Value) -> Option<String> {
    match schema.validate(instance) {
        Ok(()) => None,
        Err(errors) => Some(
            errors
                .map(|err| format!("{} at {}", err, err.instance_path))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    }
}

pub(crate) fn is_valid_version_token(version: &str) -> bool {
    !version.is_empty()
        && version
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn extract_schema_version(schema: &Value) -> Option<String> {
    let version = schema.pointer(SCHEMA_VERSION_POINTER).and_then(Value::as_str)?;
    is_valid_version_token(version).then(|| version.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn write_schema(value: &Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        serde_json::to_writer(&mut file, value).unwrap();
        file
    }

    fn allowed(version: &str) -> BTreeSet<String> {
        BTreeSet::from_iter([version.to_string()])
    }

    #[test]
    fn loads_schema_with_allowed_version() {
        let file = write_schema(&json!({
            "type": "object",
            "properties": {"schema_version": {"const": "v1"}}
        }));
        let loaded = load_json_schema(file.path(), &allowed("v1")).unwrap();
        assert_eq!(loaded.schema_version, "v1");
        assert!(validation_errors(&loaded.compiled, &json!({"schema_version": "v1"})).is_none());
        let errors = validation_errors(&loaded.compiled, &json!({"schema_version": "v2"}));
        assert!(errors.is_some());
    }

    #[test]
    fn rejects_unknown_version() {
        let file = write_schema(&json!({
            "properties": {"schema_version": {"const": "v9"}}
        }));
        let err = load_json_schema(file.path(), &allowed("v1"))
            .err()
            .expect("unknown version should fail");
        assert!(err.to_string().contains("v9"));
    }

    #[test]
    fn rejects_schema_without_version_const() {
        let file = write_schema(&json!({"type": "object"}));
        assert!(load_json_schema(file.path(), &allowed("v1")).is_err());
    }

    #[test]
    fn bundled_text_compiles_like_a_file() {
        let text = r#"{"properties": {"schema_version": {"const": "v1"}}, "required": ["topics"]}"#;
        let loaded = load_bundled_schema(text, "bundled", &allowed("v1")).unwrap();
        assert!(validation_errors(&loaded.compiled, &json!({})).is_some());
        let err = load_bundled_schema("{", "bundled", &allowed("v1"))
            .err()
            .expect("malformed schema should fail");
        assert!(err.to_string().contains("bundled"));
    }

    #[test]
    fn version_tokens() {
        assert!(is_valid_version_token("article_topics_v1"));
        assert!(!is_valid_version_token(""));
        assert!(!is_valid_version_token("bad version"));
    }
}
