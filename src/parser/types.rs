//! Common types for the manifest parser

use std::fmt;

use indexmap::IndexMap;

/// Which dependency section of composer.json a link was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    /// Production dependencies (`require`)
    Require,
    /// Development dependencies (`require-dev`)
    RequireDev,
}

impl DependencyKind {
    /// Returns the composer.json key of the section
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Require => "require",
            DependencyKind::RequireDev => "require-dev",
        }
    }
}

impl std::str::FromStr for DependencyKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "require" => Ok(DependencyKind::Require),
            "require-dev" => Ok(DependencyKind::RequireDev),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location of a constraint string in the manifest (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A declared dependency on another package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Package name as written in the manifest (e.g., "composer/installers")
    pub target: String,
    /// Constraint exactly as the user wrote it (e.g., "^1.0", "5.9.3")
    pub constraint: String,
    /// Section the link was declared in
    pub kind: DependencyKind,
    /// Where the constraint string starts, when parsed from a file
    pub position: Option<Position>,
}

impl Link {
    pub fn new(
        target: impl Into<String>,
        constraint: impl Into<String>,
        kind: DependencyKind,
    ) -> Self {
        Self {
            target: target.into(),
            constraint: constraint.into(),
            kind,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Human-readable constraint, unmodified from the manifest
    pub fn pretty_constraint(&self) -> &str {
        &self.constraint
    }
}

/// Package name to link mapping for one dependency section.
///
/// Keys are stored lower-cased; Composer package names are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    links: IndexMap<String, Link>,
}

impl DependencySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a link, returning the one it replaced (later declarations win)
    pub fn insert(&mut self, link: Link) -> Option<Link> {
        self.links.insert(link.target.to_lowercase(), link)
    }

    pub fn get(&self, package: &str) -> Option<&Link> {
        self.links.get(&package.to_lowercase())
    }

    pub fn contains(&self, package: &str) -> bool {
        self.get(package).is_some()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl FromIterator<Link> for DependencySet {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        let mut set = Self::new();
        for link in iter {
            set.insert(link);
        }
        set
    }
}

/// Both dependency sections of a root package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredDependencies {
    pub require: DependencySet,
    pub require_dev: DependencySet,
}

impl DeclaredDependencies {
    /// Mutable access to the set for `kind`
    pub fn set_mut(&mut self, kind: DependencyKind) -> &mut DependencySet {
        match kind {
            DependencyKind::Require => &mut self.require,
            DependencyKind::RequireDev => &mut self.require_dev,
        }
    }
}
