//! Host dependency-manager surface
//!
//! The installer only talks to its host through the two traits below:
//! [`RootPackage`] exposes the project's declared dependencies and
//! [`RepositoryManager`] accepts the generated repository.
//!
//! - composer.rs: File-backed host operating on a composer.json

pub mod composer;

use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::parser::traits::ParseError;
use crate::parser::types::{DeclaredDependencies, DependencySet};
use crate::repository::definition::RepositoryDefinition;

pub use composer::ComposerManifest;

/// The consuming project's declared dependencies
#[cfg_attr(test, automock)]
pub trait RootPackage {
    /// Production dependencies (`require`)
    fn requires(&self) -> &DependencySet;

    /// Development dependencies (`require-dev`)
    fn dev_requires(&self) -> &DependencySet;
}

impl RootPackage for DeclaredDependencies {
    fn requires(&self) -> &DependencySet {
        &self.require
    }

    fn dev_requires(&self) -> &DependencySet {
        &self.require_dev
    }
}

/// Ordered list of repositories consulted during dependency resolution
#[cfg_attr(test, automock)]
pub trait RepositoryManager {
    /// Build a repository of type `kind` from its definition
    fn create_repository(
        &self,
        kind: &str,
        definition: RepositoryDefinition,
    ) -> Result<Repository, HostError>;

    /// Put a repository in front of all others
    fn prepend_repository(&mut self, repository: Repository);
}

/// A repository created by the host
#[derive(Debug, Clone, PartialEq)]
pub struct Repository {
    pub kind: String,
    pub definition: RepositoryDefinition,
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Unknown repository type: {0}")]
    UnknownRepositoryType(String),
}
