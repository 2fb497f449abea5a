//! Adds an Advanced Custom Fields PRO `package` repository to a Composer
//! project, pinned to the exact version the project requires.
//!
//! # Modules
//!
//! - [`config`]: Constants, installer settings and data paths
//! - [`parser`]: composer.json dependency extraction
//! - [`version`]: Required version lookup and validation
//! - [`repository`]: Repository definition and template sources
//! - [`host`]: Host traits and the composer.json-backed host
//! - [`installer`]: Activation entry point
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod host;
pub mod installer;
pub mod logging;
pub mod parser;
pub mod repository;
pub mod version;

pub use installer::{Activation, InstallerError, activate};
