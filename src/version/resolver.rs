//! Required version lookup
//!
//! Finds the constraint a root package declares for a given package,
//! looking at `require` before `require-dev`.

use tracing::debug;

use crate::parser::types::{DependencySet, Link};

/// Find the link declaring `package`, preferring the production set.
///
/// A package declared in both sets resolves to its `require` entry.
pub fn resolve_link<'a>(
    package: &str,
    require: &'a DependencySet,
    require_dev: &'a DependencySet,
) -> Option<&'a Link> {
    let link = require.get(package).or_else(|| require_dev.get(package));

    match link {
        Some(link) => debug!(
            "Found {} in {}: {}",
            package,
            link.kind,
            link.pretty_constraint()
        ),
        None => debug!("{} is not declared in require or require-dev", package),
    }

    link
}

/// Return the constraint string declared for `package`, if any.
///
/// Absence is not an error: it means the package is not used by the project.
pub fn resolve<'a>(
    package: &str,
    require: &'a DependencySet,
    require_dev: &'a DependencySet,
) -> Option<&'a str> {
    resolve_link(package, require, require_dev).map(Link::pretty_constraint)
}
