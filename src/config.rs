use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Package constants
// =============================================================================

/// Package the built-in repository definition installs
pub const TARGET_PACKAGE: &str = "advanced-custom-fields/advanced-custom-fields-pro";

/// Key under composer.json `extra` holding the installer configuration
pub const CONFIG_KEY: &str = "acf-pro-installer";

/// Environment variable read for the log filter (same syntax as `RUST_LOG`)
pub const LOG_ENV: &str = "ACF_PRO_INSTALLER_LOG";

/// Manifest file name looked up when no path is given
pub const MANIFEST_FILE: &str = "composer.json";

/// Repository definition used when no template file is configured.
///
/// Follows the `package` repository layout recommended on the ACF support forum.
pub const BUILTIN_TEMPLATE: &str = r#"{
    "type": "package",
    "package": {
        "name": "advanced-custom-fields/advanced-custom-fields-pro",
        "version": null,
        "type": "wordpress-plugin",
        "dist": {
            "type": "zip",
            "url": "https://connect.advancedcustomfields.com/index.php?p=pro&a=download"
        },
        "require": {
            "composer/installers": "^1.0 || ^2.0"
        }
    }
}"#;

/// Installer configuration read from `extra."acf-pro-installer"` in composer.json
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct InstallerConfig {
    /// When false, activation does nothing
    pub enabled: bool,
    /// Repository template file, relative to the manifest directory
    pub template: Option<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            template: None,
        }
    }
}

impl InstallerConfig {
    /// Template path resolved against the directory holding the manifest.
    pub fn template_path(&self, manifest_dir: &Path) -> Option<PathBuf> {
        self.template.as_ref().map(|path| {
            if path.is_absolute() {
                path.clone()
            } else {
                manifest_dir.join(path)
            }
        })
    }
}

/// Returns the path to the data directory for acf-pro-installer.
/// Uses $XDG_DATA_HOME/acf-pro-installer if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/acf-pro-installer,
/// or ./acf-pro-installer if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the default path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("acf-pro-installer.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("acf-pro-installer")
}
