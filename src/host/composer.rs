//! File-backed host for a composer.json manifest
//!
//! Reads the root package's dependencies through the tree-sitter parser and
//! edits the `repositories` section through serde_json, keeping key order.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::{CONFIG_KEY, InstallerConfig};
use crate::host::{HostError, Repository, RepositoryManager, RootPackage};
use crate::parser::composer_json::ComposerJsonParser;
use crate::parser::traits::Parser;
use crate::parser::types::{DeclaredDependencies, DependencySet};
use crate::repository::RepositoryDefinition;

/// Repository types Composer can build
pub const KNOWN_REPOSITORY_TYPES: [&str; 15] = [
    "composer",
    "vcs",
    "package",
    "pear",
    "git",
    "git-bitbucket",
    "github",
    "gitlab",
    "svn",
    "fossil",
    "perforce",
    "hg",
    "bitbucket",
    "artifact",
    "path",
];

/// A loaded composer.json acting as the host
#[derive(Debug, Clone)]
pub struct ComposerManifest {
    path: PathBuf,
    document: Map<String, Value>,
    dependencies: DeclaredDependencies,
}

impl ComposerManifest {
    /// Read and parse the manifest at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HostError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| HostError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest `content` that lives (or will live) at `path`
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, HostError> {
        let path = path.into();
        let document = match serde_json::from_str(content) {
            Ok(Value::Object(document)) => document,
            Ok(_) => {
                return Err(HostError::InvalidManifest(format!(
                    "{} must contain a JSON object",
                    path.display()
                )));
            }
            Err(source) => return Err(HostError::Json { path, source }),
        };
        let dependencies = ComposerJsonParser::new().parse(content)?;

        debug!(
            "Loaded {}: {} require, {} require-dev",
            path.display(),
            dependencies.require.len(),
            dependencies.require_dev.len()
        );

        Ok(Self {
            path,
            document,
            dependencies,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the manifest, used to resolve relative paths
    pub fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    pub fn dependencies(&self) -> &DeclaredDependencies {
        &self.dependencies
    }

    /// Installer settings from `extra."acf-pro-installer"`, defaulted when absent
    pub fn config(&self) -> Result<InstallerConfig, HostError> {
        let section = self
            .document
            .get("extra")
            .and_then(|extra| extra.get(CONFIG_KEY));

        match section {
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|source| HostError::Json {
                    path: self.path.clone(),
                    source,
                })
            }
            None => Ok(InstallerConfig::default()),
        }
    }

    /// The `repositories` section as written, if any
    pub fn repositories(&self) -> Option<&Value> {
        self.document.get("repositories")
    }

    /// Serialize the manifest the way Composer writes it
    pub fn to_json_string(&self) -> Result<String, HostError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.document
            .serialize(&mut serializer)
            .map_err(|source| HostError::Json {
                path: self.path.clone(),
                source,
            })?;

        let mut json = String::from_utf8_lossy(&buf).into_owned();
        json.push('\n');
        Ok(json)
    }

    /// Write the manifest back to its path
    pub fn save(&self) -> Result<(), HostError> {
        let json = self.to_json_string()?;
        std::fs::write(&self.path, json).map_err(|source| HostError::Io {
            path: self.path.clone(),
            source,
        })?;
        info!("Wrote {}", self.path.display());
        Ok(())
    }
}

impl RootPackage for ComposerManifest {
    fn requires(&self) -> &DependencySet {
        &self.dependencies.require
    }

    fn dev_requires(&self) -> &DependencySet {
        &self.dependencies.require_dev
    }
}

impl RepositoryManager for ComposerManifest {
    fn create_repository(
        &self,
        kind: &str,
        definition: RepositoryDefinition,
    ) -> Result<Repository, HostError> {
        if !KNOWN_REPOSITORY_TYPES.contains(&kind) {
            return Err(HostError::UnknownRepositoryType(kind.to_string()));
        }

        Ok(Repository {
            kind: kind.to_string(),
            definition,
        })
    }

    fn prepend_repository(&mut self, repository: Repository) {
        let package = repository.definition.package_name().to_string();
        let entry = repository.definition.into_value();

        match self.document.get_mut("repositories") {
            Some(Value::Object(named)) => {
                let mut prepended = Map::new();
                prepended.insert(package.clone(), entry);
                for (name, existing) in std::mem::take(named) {
                    if name != package && !provides_package(&existing, &package) {
                        prepended.insert(name, existing);
                    }
                }
                *named = prepended;
            }
            Some(Value::Array(list)) => {
                list.retain(|existing| !provides_package(existing, &package));
                list.insert(0, entry);
            }
            Some(other) => {
                warn!("Replacing malformed 'repositories' section in {}", self.path.display());
                *other = Value::Array(vec![entry]);
            }
            None => {
                self.document
                    .insert("repositories".to_string(), Value::Array(vec![entry]));
            }
        }

        debug!("Prepended {} repository for {}", repository.kind, package);
    }
}

/// Whether `repository` is a `package` repository for `package`
fn provides_package(repository: &Value, package: &str) -> bool {
    repository.get("type").and_then(Value::as_str) == Some("package")
        && repository
            .get("package")
            .and_then(|p| p.get("name"))
            .and_then(Value::as_str)
            .is_some_and(|name| name.eq_ignore_ascii_case(package))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MANIFEST: &str = r#"{
    "name": "acme/site",
    "repositories": [
        {
            "type": "composer",
            "url": "https://wpackagist.org"
        }
    ],
    "require": {
        "advanced-custom-fields/advanced-custom-fields-pro": "5.9.3"
    },
    "require-dev": {
        "phpunit/phpunit": "^9.5"
    }
}"#;

    fn definition(name: &str, version: &str) -> RepositoryDefinition {
        RepositoryDefinition::from_value(json!({
            "type": "package",
            "package": { "name": name, "version": version }
        }))
        .unwrap()
    }

    fn repository(name: &str, version: &str) -> Repository {
        Repository {
            kind: "package".to_string(),
            definition: definition(name, version),
        }
    }

    #[test]
    fn parse_exposes_dependency_sets() {
        let manifest = ComposerManifest::parse("/srv/site/composer.json", MANIFEST).unwrap();

        assert_eq!(
            manifest
                .requires()
                .get("advanced-custom-fields/advanced-custom-fields-pro")
                .unwrap()
                .pretty_constraint(),
            "5.9.3"
        );
        assert!(manifest.dev_requires().contains("phpunit/phpunit"));
        assert_eq!(manifest.dir(), Path::new("/srv/site"));
    }

    #[test]
    fn parse_rejects_non_object_manifest() {
        let result = ComposerManifest::parse("composer.json", "[]");

        assert!(matches!(result, Err(HostError::InvalidManifest(_))));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let result = ComposerManifest::parse("composer.json", "{");

        assert!(matches!(result, Err(HostError::Json { .. })));
    }

    #[test]
    fn dir_of_bare_file_name_is_current_dir() {
        let manifest = ComposerManifest::parse("composer.json", "{}").unwrap();

        assert_eq!(manifest.dir(), Path::new("."));
    }

    #[test]
    fn config_defaults_when_extra_is_absent() {
        let manifest = ComposerManifest::parse("composer.json", MANIFEST).unwrap();

        assert_eq!(manifest.config().unwrap(), InstallerConfig::default());
    }

    #[test]
    fn config_reads_extra_section() {
        let manifest = ComposerManifest::parse(
            "composer.json",
            r#"{"extra": {"acf-pro-installer": {"enabled": false, "template": "repo.json"}}}"#,
        )
        .unwrap();

        let config = manifest.config().unwrap();
        assert!(!config.enabled);
        assert_eq!(config.template, Some(PathBuf::from("repo.json")));
    }

    #[test]
    fn config_rejects_ill_typed_section() {
        let manifest = ComposerManifest::parse(
            "composer.json",
            r#"{"extra": {"acf-pro-installer": {"enabled": "yes"}}}"#,
        )
        .unwrap();

        assert!(matches!(manifest.config(), Err(HostError::Json { .. })));
    }

    #[test]
    fn create_repository_rejects_unknown_types() {
        let manifest = ComposerManifest::parse("composer.json", "{}").unwrap();

        let result = manifest.create_repository("ftp", definition("vendor/pkg", "1.0.0"));

        assert!(matches!(result, Err(HostError::UnknownRepositoryType(kind)) if kind == "ftp"));
    }

    #[test]
    fn prepend_repository_goes_before_existing_entries() {
        let mut manifest = ComposerManifest::parse("composer.json", MANIFEST).unwrap();

        manifest.prepend_repository(repository("vendor/pkg", "1.2.3"));

        assert_eq!(
            manifest.repositories(),
            Some(&json!([
                { "type": "package", "package": { "name": "vendor/pkg", "version": "1.2.3" } },
                { "type": "composer", "url": "https://wpackagist.org" }
            ]))
        );
    }

    #[test]
    fn prepend_repository_replaces_previous_entry_for_same_package() {
        let mut manifest = ComposerManifest::parse("composer.json", MANIFEST).unwrap();

        manifest.prepend_repository(repository("vendor/pkg", "1.2.3"));
        manifest.prepend_repository(repository("vendor/pkg", "1.2.4"));

        assert_eq!(
            manifest.repositories(),
            Some(&json!([
                { "type": "package", "package": { "name": "vendor/pkg", "version": "1.2.4" } },
                { "type": "composer", "url": "https://wpackagist.org" }
            ]))
        );
    }

    #[test]
    fn prepend_repository_creates_missing_section() {
        let mut manifest = ComposerManifest::parse("composer.json", "{}").unwrap();

        manifest.prepend_repository(repository("vendor/pkg", "1.2.3"));

        assert_eq!(
            manifest.repositories(),
            Some(&json!([
                { "type": "package", "package": { "name": "vendor/pkg", "version": "1.2.3" } }
            ]))
        );
    }

    #[test]
    fn prepend_repository_keeps_named_repositories_named() {
        let mut manifest = ComposerManifest::parse(
            "composer.json",
            r#"{"repositories": {"wpackagist": {"type": "composer", "url": "https://wpackagist.org"}}}"#,
        )
        .unwrap();

        manifest.prepend_repository(repository("vendor/pkg", "1.2.3"));

        let repositories = manifest.repositories().unwrap().as_object().unwrap();
        let names: Vec<&str> = repositories.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["vendor/pkg", "wpackagist"]);
    }

    #[test]
    fn to_json_string_uses_four_space_indent_and_trailing_newline() {
        let manifest = ComposerManifest::parse(
            "composer.json",
            r#"{"name": "acme/site", "require": {"php": ">=7.4"}}"#,
        )
        .unwrap();

        assert_eq!(
            manifest.to_json_string().unwrap(),
            "{\n    \"name\": \"acme/site\",\n    \"require\": {\n        \"php\": \">=7.4\"\n    }\n}\n"
        );
    }

    #[test]
    fn to_json_string_reserializes_numbers() {
        let manifest = ComposerManifest::parse(
            "composer.json",
            r#"{"extra": {"timeout": 1e3}, "require": {}}"#,
        )
        .unwrap();

        assert!(
            manifest
                .to_json_string()
                .unwrap()
                .contains("\"timeout\": 1000.0")
        );
    }
}
