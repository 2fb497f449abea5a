//! Repository definition handling
//!
//! - definition.rs: The repository record handed to the host
//! - template.rs: Where the record is loaded from

pub mod definition;
pub mod template;

pub use definition::RepositoryDefinition;
pub use template::{TemplateError, TemplateSource};
