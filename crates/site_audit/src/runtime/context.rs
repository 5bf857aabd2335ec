//! Shared command context passed into command families.

use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::config::AuditConfig;
use crate::runtime::error::{AuditError, AuditResult};
use std::path::{Path, PathBuf};

/// Shared execution context for audit command families.
#[derive(Clone, Debug)]
pub struct CommandContext {
    root: PathBuf,
    artifacts: ArtifactManager,
    config: AuditConfig,
}

impl CommandContext {
    /// Create a context for the given site root, loading its audit config.
    pub fn new(root: Option<PathBuf>, config_path: Option<&Path>) -> AuditResult<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().map_err(|err| {
                AuditError::io(format!("failed to resolve working directory: {err}"))
            })?,
        };
        let config = AuditConfig::load(&root, config_path)?;
        Ok(Self::with_config(root, config))
    }

    /// Create a context from an already-resolved config.
    pub fn with_config(root: PathBuf, config: AuditConfig) -> Self {
        let artifacts = ArtifactManager::new(root.clone());
        Self {
            root,
            artifacts,
            config,
        }
    }

    /// Site root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Shared path resolver.
    pub fn artifacts(&self) -> &ArtifactManager {
        &self.artifacts
    }

    /// Loaded audit config.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Absolute location of the report artifact.
    pub fn report_path(&self) -> PathBuf {
        self.artifacts.resolve_path(&self.config.report)
    }
}
