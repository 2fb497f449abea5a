//! Repository template sources

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::config::BUILTIN_TEMPLATE;
use crate::repository::definition::RepositoryDefinition;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template is missing '{0}'")]
    MissingField(&'static str),

    #[error("Invalid template: {0}")]
    Invalid(String),
}

/// Where the repository template comes from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// The definition compiled into the crate
    #[default]
    Builtin,
    /// JSON text supplied by the caller
    Inline(String),
    /// JSON file read on every load
    File(PathBuf),
}

impl TemplateSource {
    /// Load a fresh definition from this source
    pub fn load(&self) -> Result<RepositoryDefinition, TemplateError> {
        let content = match self {
            TemplateSource::Builtin => BUILTIN_TEMPLATE.to_string(),
            TemplateSource::Inline(content) => content.clone(),
            TemplateSource::File(path) => {
                debug!("Loading repository template from {}", path.display());
                std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
                    path: path.clone(),
                    source,
                })?
            }
        };

        RepositoryDefinition::from_value(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TARGET_PACKAGE;
    use tempfile::TempDir;

    #[test]
    fn builtin_template_loads() {
        let definition = TemplateSource::Builtin.load().unwrap();

        assert_eq!(definition.kind(), "package");
        assert_eq!(definition.package_name(), TARGET_PACKAGE);
    }

    #[test]
    fn inline_template_loads() {
        let source = TemplateSource::Inline(
            r#"{"type": "package", "package": {"name": "vendor/pkg", "version": null}}"#
                .to_string(),
        );

        assert_eq!(source.load().unwrap().package_name(), "vendor/pkg");
    }

    #[test]
    fn file_template_is_read_on_every_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("repository.json");
        std::fs::write(
            &path,
            r#"{"type": "package", "package": {"name": "vendor/first"}}"#,
        )
        .unwrap();
        let source = TemplateSource::File(path.clone());

        assert_eq!(source.load().unwrap().package_name(), "vendor/first");

        std::fs::write(
            &path,
            r#"{"type": "package", "package": {"name": "vendor/second"}}"#,
        )
        .unwrap();

        assert_eq!(source.load().unwrap().package_name(), "vendor/second");
    }

    #[test]
    fn missing_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let err = TemplateSource::File(path.clone()).load().unwrap_err();

        assert!(matches!(err, TemplateError::Io { path: p, .. } if p == path));
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = TemplateSource::Inline("{".to_string()).load().unwrap_err();

        assert!(matches!(err, TemplateError::Json(_)));
    }
}
