//! Repository definition record

use serde::Serialize;
use serde_json::{Map, Value};

use crate::repository::template::TemplateError;
use crate::version::validator::ExactVersion;

/// A repository definition as it would appear in composer.json `repositories`.
///
/// Only `package.version` can be changed; every other field is kept as loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RepositoryDefinition {
    fields: Map<String, Value>,
}

impl RepositoryDefinition {
    /// Build a definition from parsed JSON, checking the fields the installer relies on
    pub fn from_value(value: Value) -> Result<Self, TemplateError> {
        let Value::Object(fields) = value else {
            return Err(TemplateError::Invalid(
                "repository definition must be a JSON object".to_string(),
            ));
        };

        match fields.get("type") {
            Some(Value::String(_)) => {}
            Some(_) => return Err(TemplateError::Invalid("'type' must be a string".to_string())),
            None => return Err(TemplateError::MissingField("type")),
        }

        let package = match fields.get("package") {
            Some(Value::Object(package)) => package,
            Some(_) => {
                return Err(TemplateError::Invalid(
                    "'package' must be an object".to_string(),
                ));
            }
            None => return Err(TemplateError::MissingField("package")),
        };

        match package.get("name") {
            Some(Value::String(name)) if !name.is_empty() => {}
            Some(_) => {
                return Err(TemplateError::Invalid(
                    "'package.name' must be a non-empty string".to_string(),
                ));
            }
            None => return Err(TemplateError::MissingField("package.name")),
        }

        Ok(Self { fields })
    }

    /// Repository type understood by the host (e.g. "package")
    pub fn kind(&self) -> &str {
        self.fields
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Fully-qualified name of the package the repository provides
    pub fn package_name(&self) -> &str {
        self.package()
            .and_then(|package| package.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Current `package.version`, if it is a string
    pub fn version(&self) -> Option<&str> {
        self.package()
            .and_then(|package| package.get("version"))
            .and_then(Value::as_str)
    }

    /// Overwrite `package.version`; nothing else is touched
    pub fn set_version(&mut self, version: &ExactVersion) {
        if let Some(Value::Object(package)) = self.fields.get_mut("package") {
            package.insert(
                "version".to_string(),
                Value::String(version.as_str().to_string()),
            );
        }
    }

    pub fn with_version(mut self, version: &ExactVersion) -> Self {
        self.set_version(version);
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    fn package(&self) -> Option<&Map<String, Value>> {
        self.fields.get("package").and_then(Value::as_object)
    }
}
