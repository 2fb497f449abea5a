//! Parser layer
//! - traits.rs: Parser trait definition
//! - types.rs: Common types (Link, DependencySet, DependencyKind)
//! - composer_json.rs: composer.json parser

pub mod composer_json;
pub mod traits;
pub mod types;

pub use composer_json::ComposerJsonParser;
pub use traits::{ParseError, Parser};
pub use types::{DeclaredDependencies, DependencyKind, DependencySet, Link, Position};
