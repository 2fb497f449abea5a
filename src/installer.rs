//! Repository injection
//!
//! Ties the pieces together: load the template, find the version the root
//! package requires, validate it, and hand the pinned repository to the host.
//!
//! ```text
//! template ──▶ resolve ──▶ validate ──▶ set version ──▶ create + prepend
//!                 │            │
//!                 ▼            ▼
//!              Skipped   InvalidVersion
//! ```

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};

use crate::host::{ComposerManifest, HostError, Repository, RepositoryManager, RootPackage};
use crate::parser::types::Position;
use crate::repository::template::{TemplateError, TemplateSource};
use crate::version::error::VersionError;
use crate::version::resolver::{resolve, resolve_link};
use crate::version::validator::ExactVersion;

/// The one error surfaced to the host; the host should abort on it
#[derive(Debug, Error)]
pub enum InstallerError {
    #[error(transparent)]
    InvalidVersion(#[from] VersionError),

    /// An invalid version whose declaration was located in the manifest
    #[error("{source}\n  declared at {}:{position}", .manifest.display())]
    InvalidVersionAt {
        source: VersionError,
        manifest: PathBuf,
        position: Position,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Outcome of a successful activation
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Turned off in the manifest's installer settings
    Disabled,
    /// The root package does not declare the template's package
    Skipped,
    /// A repository pinned to the required version was prepended
    Registered { repository: Repository },
}

/// Add the template's repository to `repositories`, pinned to the version
/// `root` declares for the template's package.
///
/// Nothing is registered unless the declared version is an exact
/// `major.minor.patch` with single-digit components.
pub fn activate<P, R>(
    template: &TemplateSource,
    root: &P,
    repositories: &mut R,
) -> Result<Activation, InstallerError>
where
    P: RootPackage + ?Sized,
    R: RepositoryManager + ?Sized,
{
    let definition = template.load()?;
    let package = definition.package_name().to_string();

    let Some(required) = resolve(&package, root.requires(), root.dev_requires()) else {
        info!("{} is not required; skipping", package);
        return Ok(Activation::Skipped);
    };

    let version = ExactVersion::parse(&package, required).inspect_err(|e| warn!("{}", e))?;

    let definition = definition.with_version(&version);
    let kind = definition.kind().to_string();
    let repository = repositories.create_repository(&kind, definition)?;
    repositories.prepend_repository(repository.clone());

    info!("Registered {} repository for {} {}", kind, package, version);

    Ok(Activation::Registered { repository })
}

/// Activate against a composer.json, honouring its `extra` settings.
///
/// `template_override` wins over the configured template. An invalid
/// version is reported with the place it was declared.
pub fn run(
    manifest: &mut ComposerManifest,
    template_override: Option<PathBuf>,
) -> Result<Activation, InstallerError> {
    let config = manifest.config()?;
    if !config.enabled {
        info!("Disabled in {}; nothing to do", manifest.path().display());
        return Ok(Activation::Disabled);
    }

    let template = template_override
        .or_else(|| config.template_path(manifest.dir()))
        .map_or(TemplateSource::Builtin, TemplateSource::File);
    let manifest_path = manifest.path().to_path_buf();

    // Snapshot the dependencies so the manifest can act as the repository manager
    let root = manifest.dependencies().clone();

    activate(&template, &root, manifest).map_err(|err| match err {
        InstallerError::InvalidVersion(source) => {
            let VersionError::InvalidFormat { package, .. } = &source;
            let position = resolve_link(package, root.requires(), root.dev_requires())
                .and_then(|link| link.position);

            match position {
                Some(position) => InstallerError::InvalidVersionAt {
                    source,
                    manifest: manifest_path,
                    position,
                },
                None => InstallerError::InvalidVersion(source),
            }
        }
        other => other,
    })
}
