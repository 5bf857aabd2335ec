//! Path resolution for audit inputs and the report artifact.

use crate::runtime::error::{AuditError, AuditResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Central path policy for an audit run.
///
/// Every configured input and output path is resolved against the audited site root, so checkers
/// never join paths against the process working directory themselves.
#[derive(Clone, Debug)]
pub struct ArtifactManager {
    root: PathBuf,
}

impl ArtifactManager {
    /// Create an artifact manager rooted at the audited site.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve a possibly-relative site path.
    ///
    /// Absolute paths are preserved, while relative paths are anchored to the site root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Ensure a directory exists.
    ///
    /// This helper is idempotent and succeeds when the directory already exists.
    pub fn ensure_dir(&self, path: &Path) -> AuditResult<()> {
        fs::create_dir_all(path)
            .map_err(|err| AuditError::io(format!("failed to create {}: {err}", path.display())))
    }

    /// Ensure the parent directory of an output file exists.
    pub fn ensure_parent(&self, path: &Path) -> AuditResult<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.ensure_dir(parent),
            _ => Ok(()),
        }
    }
}
