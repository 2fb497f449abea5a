//! On-disk composer.json test utilities

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

pub const ACF: &str = "advanced-custom-fields/advanced-custom-fields-pro";

/// Write a composer.json with the given sections into a fresh temp dir
pub fn create_test_manifest(
    require: &[(&str, &str)],
    require_dev: &[(&str, &str)],
) -> (TempDir, PathBuf) {
    create_test_manifest_with(require, require_dev, json!({}))
}

/// Same as [`create_test_manifest`], merging `extra_fields` into the root object
pub fn create_test_manifest_with(
    require: &[(&str, &str)],
    require_dev: &[(&str, &str)],
    extra_fields: Value,
) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("composer.json");

    let mut manifest = json!({
        "name": "acme/site",
        "repositories": [
            { "type": "composer", "url": "https://wpackagist.org" }
        ],
        "require": section(require),
        "require-dev": section(require_dev),
    });
    if let (Value::Object(root), Value::Object(extra)) = (&mut manifest, extra_fields) {
        root.extend(extra);
    }

    std::fs::write(&path, serde_json::to_string_pretty(&manifest).unwrap()).unwrap();
    (temp_dir, path)
}

fn section(entries: &[(&str, &str)]) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(name, constraint)| (name.to_string(), json!(constraint)))
            .collect(),
    )
}

/// Read a JSON file back as a value
pub fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}
