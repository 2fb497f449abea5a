use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error(
        "The version constraint of {package} should be exact (with 3 digits). Invalid version string \"{version}\""
    )]
    InvalidFormat { package: String, version: String },
}
