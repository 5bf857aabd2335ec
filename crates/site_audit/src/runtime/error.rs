//! Structured audit error types.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

/// Stable error categories for audit runs.
///
/// `Inventory` is the only category that is fatal by construction: without a directory listing
/// there is no ground truth to classify against. `CacheParse` is always recovered by the cache
/// checker and rendered as a report line instead of aborting the run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuditErrorCategory {
    /// Invalid or unreadable configuration.
    Config,
    /// A required asset or page directory is missing or is not a directory.
    Inventory,
    /// Filesystem or general I/O failure.
    Io,
    /// Invalid user input on the command line.
    Validation,
    /// The service-worker precache manifest could not be read or located.
    CacheParse,
}

/// Structured audit error with contextual metadata.
///
/// The formatted display output is CLI-friendly. Optional `operation`, `target`, and `hint`
/// fields can be attached as the error propagates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditError {
    /// High-level error category.
    pub category: AuditErrorCategory,
    /// Human-readable message.
    pub message: String,
    /// Optional operation name.
    pub operation: Option<String>,
    /// Optional path target.
    pub target: Option<String>,
    /// Optional remediation hint.
    pub hint: Option<String>,
}

/// Convenience result type for audit internals.
pub type AuditResult<T> = Result<T, AuditError>;

impl AuditError {
    /// Create an error with the given category and message.
    pub fn new(category: AuditErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            operation: None,
            target: None,
            hint: None,
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(AuditErrorCategory::Config, message)
    }

    /// Create a fatal inventory error for a missing directory.
    pub fn directory_not_found(path: &Path) -> Self {
        Self::new(
            AuditErrorCategory::Inventory,
            format!("directory not found: {}", path.display()),
        )
        .with_path(path)
    }

    /// Create an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(AuditErrorCategory::Io, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AuditErrorCategory::Validation, message)
    }

    /// Create a cache manifest parse error.
    pub fn cache_parse(message: impl Into<String>) -> Self {
        Self::new(AuditErrorCategory::CacheParse, message)
    }

    /// Attach an operation label.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach a target path.
    pub fn with_path(mut self, path: &Path) -> Self {
        self.target = Some(path.display().to_string());
        self
    }

    /// Attach a remediation hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for AuditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(operation) = &self.operation {
            write!(f, " [operation: {operation}]")?;
        }
        if let Some(target) = &self.target {
            write!(f, " [target: {target}]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " [hint: {hint}]")?;
        }
        Ok(())
    }
}

impl std::error::Error for AuditError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_attached_context_in_order() {
        let err = AuditError::config("bad value")
            .with_operation("load config")
            .with_path(Path::new("site-audit.toml"))
            .with_hint("check the `report` key");
        assert_eq!(
            err.to_string(),
            "bad value [operation: load config] [target: site-audit.toml] [hint: check the `report` key]"
        );
    }

    #[test]
    fn directory_not_found_is_an_inventory_error_with_target() {
        let err = AuditError::directory_not_found(Path::new("assets/logos"));
        assert_eq!(err.category, AuditErrorCategory::Inventory);
        assert_eq!(err.target.as_deref(), Some("assets/logos"));
        assert!(err.message.contains("assets/logos"));
    }
}
