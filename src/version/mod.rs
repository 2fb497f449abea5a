//! Version resolution and validation
//!
//! # Modules
//!
//! - [`resolver`]: Looks up the constraint a root package declares for a package
//! - [`validator`]: Checks that a constraint is an exact single-digit `major.minor.patch`
//! - [`error`]: Error type for invalid versions

pub mod error;
pub mod resolver;
pub mod validator;

pub use error::VersionError;
pub use resolver::{resolve, resolve_link};
pub use validator::{ExactVersion, validate};
