//! Exact version validation
//!
//! The ACF download endpoint only serves exact `major.minor.patch` versions,
//! each component a single digit (e.g. `5.9.3`).

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::version::error::VersionError;

/// Three single ASCII digits separated by dots, anchored at both ends
static MAJOR_MINOR_PATCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[0-9]\.[0-9]\.[0-9]\z").expect("valid regex"));

/// Same shape with multi-digit components, used only to warn about rejections
static MULTI_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[0-9]+\.[0-9]+\.[0-9]+\z").expect("valid regex"));

/// Check that `version` is an exact single-digit `major.minor.patch` version.
///
/// `package` is only used to build the error message.
pub fn validate(package: &str, version: &str) -> Result<(), VersionError> {
    if MAJOR_MINOR_PATCH.is_match(version) {
        return Ok(());
    }

    if MULTI_DIGIT.is_match(version) {
        warn!(
            "{} {} has a multi-digit component; only single-digit components are accepted",
            package, version
        );
    }

    Err(VersionError::InvalidFormat {
        package: package.to_string(),
        version: version.to_string(),
    })
}

/// A version string that has passed [`validate`].
///
/// Only this type can be written into a repository definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExactVersion(String);

impl ExactVersion {
    pub fn parse(package: &str, version: &str) -> Result<Self, VersionError> {
        validate(package, version)?;
        Ok(Self(version.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExactVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
