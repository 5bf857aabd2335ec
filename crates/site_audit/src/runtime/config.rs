//! Typed configuration loading helpers.

use crate::runtime::error::{AuditError, AuditResult};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Default config file name, looked up under the audited site root.
pub const DEFAULT_CONFIG_FILE: &str = "site-audit.toml";

/// Generic TOML-backed config loader.
///
/// `ConfigLoader<T>` handles only filesystem access and TOML deserialization. Callers are still
/// responsible for semantic validation after the typed value is loaded.
///
/// ```rust
/// # use std::path::Path;
/// # use site_audit::runtime::config::{AuditConfig, ConfigLoader};
/// let loader = ConfigLoader::<AuditConfig>::new(Path::new("/srv/site"), "site-audit.toml");
/// let _ = loader.path();
/// ```
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> ConfigLoader<T>
where
    T: DeserializeOwned,
{
    /// Create a loader for the given root-relative path.
    ///
    /// Absolute paths are used as given.
    pub fn new(root: &Path, relative_path: impl AsRef<Path>) -> Self {
        Self {
            path: root.join(relative_path),
            _marker: PhantomData,
        }
    }

    /// Load and deserialize the configuration file.
    ///
    /// Missing files, unreadable files, and TOML parse failures are all surfaced as
    /// [`AuditErrorCategory::Config`](crate::runtime::error::AuditErrorCategory::Config).
    pub fn load(&self) -> AuditResult<T> {
        let body = fs::read_to_string(&self.path).map_err(|err| {
            AuditError::config(format!("failed to read {}: {err}", self.path.display()))
        })?;
        toml::from_str(&body).map_err(|err| {
            AuditError::config(format!("failed to parse {}: {err}", self.path.display()))
        })
    }

    /// Load the file when it exists, falling back to `T::default()` otherwise.
    pub fn load_or_default(&self) -> AuditResult<T>
    where
        T: Default,
    {
        if !self.path.exists() {
            return Ok(T::default());
        }
        self.load()
    }

    /// Return the config path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Site layout and naming conventions the audit reasons over.
///
/// Every field has a default matching the production site, so an absent config file yields a
/// working audit.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub pages_dir: PathBuf,
    pub logos_dir: PathBuf,
    pub service_worker: PathBuf,
    pub report: PathBuf,
    /// Relative `src` prefix regional pages use to reach the logo directory.
    pub logo_src_prefix: String,
    /// Naming convention every logo file stem ends with.
    pub logo_suffix: String,
    /// Identifier the precache asset list is assigned to in the service worker.
    pub manifest_identifier: String,
    pub pages_route: String,
    pub logos_route: String,
    /// Logo formats the static cache is expected to hold.
    pub cached_logo_extensions: Vec<String>,
    pub page_extension: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("regional/pages"),
            logos_dir: PathBuf::from("assets/logos"),
            service_worker: PathBuf::from("sw.js"),
            report: PathBuf::from("logs/logo_diagnostic_report.txt"),
            logo_src_prefix: "../../assets/logos/".to_string(),
            logo_suffix: "-wtf-logo".to_string(),
            manifest_identifier: "ASSETS_TO_CACHE".to_string(),
            pages_route: "/regional/pages".to_string(),
            logos_route: "/assets/logos".to_string(),
            cached_logo_extensions: vec!["png".to_string()],
            page_extension: "html".to_string(),
        }
    }
}

impl AuditConfig {
    /// Load the audit config for a site root.
    ///
    /// With no explicit path, a missing `site-audit.toml` means defaults. An explicitly
    /// requested file must exist.
    pub fn load(root: &Path, explicit: Option<&Path>) -> AuditResult<Self> {
        let config = match explicit {
            Some(path) => ConfigLoader::<Self>::new(root, path).load()?,
            None => ConfigLoader::<Self>::new(root, DEFAULT_CONFIG_FILE).load_or_default()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every classification meaningless.
    pub fn validate(&self) -> AuditResult<()> {
        if self.cached_logo_extensions.is_empty() {
            return Err(AuditError::config(
                "`cached_logo_extensions` must list at least one extension",
            ));
        }
        for (key, value) in [
            ("manifest_identifier", &self.manifest_identifier),
            ("logo_suffix", &self.logo_suffix),
            ("page_extension", &self.page_extension),
        ] {
            if value.trim().is_empty() {
                return Err(AuditError::config(format!("`{key}` must not be empty")));
            }
        }
        Ok(())
    }
}
