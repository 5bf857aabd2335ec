use crate::runtime::artifacts::ArtifactManager;
use crate::runtime::error::{AuditError, AuditResult};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Named report sections, in the order a full pass writes them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportSection {
    LogoMatches,
    HeroParity,
    CacheCoverage,
}

/// How a section reaches the report artifact.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteMode {
    Overwrite,
    Append,
}

impl ReportSection {
    pub fn header(self) -> Option<&'static str> {
        match self {
            ReportSection::LogoMatches => None,
            ReportSection::HeroParity => Some("=== HERO PARITY ==="),
            ReportSection::CacheCoverage => Some("=== CACHE COVERAGE ==="),
        }
    }

    /// Stable machine-readable key.
    pub fn key(self) -> &'static str {
        match self {
            ReportSection::LogoMatches => "logo_matches",
            ReportSection::HeroParity => "hero_parity",
            ReportSection::CacheCoverage => "cache_coverage",
        }
    }

    /// The logo section starts a fresh report; every later section accretes onto it.
    pub fn write_mode(self) -> WriteMode {
        match self {
            ReportSection::LogoMatches => WriteMode::Overwrite,
            ReportSection::HeroParity | ReportSection::CacheCoverage => WriteMode::Append,
        }
    }

    pub fn render(self, lines: &[String]) -> String {
        let mut body = String::new();
        if let Some(header) = self.header() {
            body.push('\n');
            body.push_str(header);
            body.push('\n');
        }
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }
        body
    }
}

/// Destination for rendered report sections.
pub trait ReportSink {
    fn write_section(&mut self, section: ReportSection, lines: &[String]) -> AuditResult<()>;
}

/// Report artifact on disk.
///
/// Concurrent runs against the same path are not coordinated.
#[derive(Clone, Debug)]
pub struct FileReport {
    artifacts: ArtifactManager,
    path: PathBuf,
}

impl FileReport {
    pub fn new(artifacts: &ArtifactManager, relative: &Path) -> Self {
        Self {
            path: artifacts.resolve_path(relative),
            artifacts: artifacts.clone(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for FileReport {
    fn write_section(&mut self, section: ReportSection, lines: &[String]) -> AuditResult<()> {
        self.artifacts.ensure_parent(&self.path)?;
        let mut options = OpenOptions::new();
        match section.write_mode() {
            WriteMode::Overwrite => options.write(true).create(true).truncate(true),
            WriteMode::Append => options.append(true).create(true),
        };
        let write_err = |err: std::io::Error| {
            AuditError::io(format!("failed to write {}: {err}", self.path.display()))
                .with_operation(format!("write {} section", section.key()))
        };
        let mut file = options.open(&self.path).map_err(write_err)?;
        file.write_all(section.render(lines).as_bytes())
            .map_err(write_err)?;
        tracing::debug!(section = section.key(), lines = lines.len(), "wrote report section");
        Ok(())
    }
}

/// In-memory report, rendered exactly as [`FileReport`] would write it.
#[derive(Clone, Debug, Default)]
pub struct MemoryReport {
    body: String,
}

impl MemoryReport {
    pub fn contents(&self) -> &str {
        &self.body
    }
}

impl ReportSink for MemoryReport {
    fn write_section(&mut self, section: ReportSection, lines: &[String]) -> AuditResult<()> {
        if section.write_mode() == WriteMode::Overwrite {
            self.body.clear();
        }
        self.body.push_str(&section.render(lines));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!(
            "site-audit-report-test-{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time")
                .as_nanos()
        ))
    }

    fn sections(sink: &mut dyn ReportSink) {
        sink.write_section(
            ReportSection::LogoMatches,
            &["a.html -> a-wtf-logo.png [MISSING]".to_string()],
        )
        .expect("logo section");
        sink.write_section(ReportSection::HeroParity, &["a.html [HERO OK]".to_string()])
            .expect("hero section");
        sink.write_section(ReportSection::CacheCoverage, &[])
            .expect("cache section");
    }

    const EXPECTED: &str = "a.html -> a-wtf-logo.png [MISSING]\n\
                            \n=== HERO PARITY ===\na.html [HERO OK]\n\
                            \n=== CACHE COVERAGE ===\n";

    #[test]
    fn memory_report_renders_sections_in_write_order() {
        let mut report = MemoryReport::default();
        sections(&mut report);
        assert_eq!(report.contents(), EXPECTED);
    }

    #[test]
    fn file_report_starts_fresh_each_run_then_appends() {
        let root = unique_temp_root();
        let artifacts = ArtifactManager::new(root.clone());
        let mut report = FileReport::new(&artifacts, Path::new("logs/report.txt"));

        fs::create_dir_all(root.join("logs")).expect("create logs");
        fs::write(report.path(), "stale content from an earlier run\n").expect("seed report");

        sections(&mut report);
        sections(&mut report);
        let written = fs::read_to_string(report.path()).expect("read report");
        assert_eq!(written, EXPECTED);

        let _ = fs::remove_dir_all(root);
    }
}
