//! Cross-source consistency engine for the regional site.
//!
//! A pass scans the page and logo directories once, loads the service-worker script, and then
//! hands the same [`AuditInputs`] to each [`Checker`] in turn. Every checker's results are written
//! to the [`ReportSink`] as soon as that checker finishes, so a later checker can never
//! invalidate a section that was already written.

pub mod cache;
pub mod extract;
pub mod hero;
pub mod inventory;
pub mod logos;
pub mod report;

use crate::runtime::context::CommandContext;
use crate::runtime::error::{AuditError, AuditResult};
use cache::CacheChecker;
use hero::HeroChecker;
use inventory::{AssetInventory, PageDocument};
use logos::LogoChecker;
use report::{ReportSection, ReportSink};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::fs;

/// Everything the checkers reason over for one pass.
#[derive(Clone, Debug)]
pub struct AuditInputs {
    pub pages: Vec<PageDocument>,
    pub logos: AssetInventory,
    /// Service-worker source, or the reason it could not be read.
    pub service_worker: AuditResult<String>,
}

impl AuditInputs {
    /// Scan directories and load documents for the configured site.
    ///
    /// Missing directories abort the pass. Unreadable pages are skipped, and an unreadable service
    /// worker is left for the cache checker to report.
    pub fn gather(ctx: &CommandContext) -> AuditResult<Self> {
        let config = ctx.config();
        let logos_dir = ctx.artifacts().resolve_path(&config.logos_dir);
        let pages_dir = ctx.artifacts().resolve_path(&config.pages_dir);

        let logos = AssetInventory::scan(&logos_dir)?;
        let page_inventory = AssetInventory::scan(&pages_dir)?;
        let pages = PageDocument::load_all(&pages_dir, &page_inventory, &config.page_extension);
        if logos.is_empty() {
            tracing::warn!(dir = %logos_dir.display(), "logo directory is empty");
        }
        tracing::info!(
            pages = pages.len(),
            logos = logos.len(),
            "scanned regional pages and logo inventory"
        );

        let sw_path = ctx.artifacts().resolve_path(&config.service_worker);
        let service_worker = fs::read_to_string(&sw_path).map_err(|err| {
            AuditError::cache_parse(format!("failed to read {}: {err}", sw_path.display()))
        });

        Ok(Self {
            pages,
            logos,
            service_worker,
        })
    }
}

/// A classified finding, carrying what is needed to render its report line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CheckResult {
    Match {
        page: String,
        logo: String,
    },
    ExtensionMismatch {
        page: String,
        logo: String,
        alternate: String,
    },
    Missing {
        page: String,
        logo: String,
    },
    HeroOk {
        page: String,
    },
    HeroMismatch {
        page: String,
        missing: Vec<String>,
    },
    Cached {
        path: String,
    },
    NotCached {
        path: String,
    },
    CacheCheckError {
        source: String,
        reason: String,
    },
}

impl CheckResult {
    /// Tag shown in brackets on the report line.
    pub fn tag(&self) -> &'static str {
        match self {
            CheckResult::Match { .. } => "MATCH FOUND",
            CheckResult::ExtensionMismatch { .. } => "EXTENSION MISMATCH",
            CheckResult::Missing { .. } => "MISSING",
            CheckResult::HeroOk { .. } => "HERO OK",
            CheckResult::HeroMismatch { .. } => "HERO MISMATCH",
            CheckResult::Cached { .. } => "CACHED",
            CheckResult::NotCached { .. } => "NOT IN STATIC CACHE",
            CheckResult::CacheCheckError { .. } => "CACHE CHECK ERROR",
        }
    }
}

impl Display for CheckResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tag = self.tag();
        match self {
            CheckResult::Match { page, logo } | CheckResult::Missing { page, logo } => {
                write!(f, "{page} -> {logo} [{tag}]")
            }
            CheckResult::ExtensionMismatch {
                page,
                logo,
                alternate,
            } => write!(f, "{page} -> {logo} [{tag}] ({alternate})"),
            CheckResult::HeroOk { page } => write!(f, "{page} [{tag}]"),
            CheckResult::HeroMismatch { page, missing } => {
                write!(f, "{page} [{tag}] Missing: {}", missing.join(", "))
            }
            CheckResult::Cached { path } | CheckResult::NotCached { path } => {
                write!(f, "{path} [{tag}]")
            }
            CheckResult::CacheCheckError { source, reason } => {
                write!(f, "{source} [{tag}] {reason}")
            }
        }
    }
}

/// One independent check attached to the shared pass inputs.
pub trait Checker {
    fn section(&self) -> ReportSection;

    fn run(&self, inputs: &AuditInputs) -> Vec<CheckResult>;
}

/// Per-section tag counts for a finished pass.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AuditSummary {
    pub sections: BTreeMap<&'static str, BTreeMap<&'static str, usize>>,
}

impl AuditSummary {
    fn record(&mut self, section: ReportSection, results: &[CheckResult]) {
        let counts = self.sections.entry(section.key()).or_default();
        for result in results {
            *counts.entry(result.tag()).or_default() += 1;
        }
    }

    pub fn count(&self, section: ReportSection, tag: &str) -> usize {
        self.sections
            .get(section.key())
            .and_then(|counts| counts.get(tag))
            .copied()
            .unwrap_or(0)
    }
}

/// Logo, hero, and cache checkers in report order.
pub fn default_checkers(ctx: &CommandContext) -> AuditResult<Vec<Box<dyn Checker>>> {
    let checkers: Vec<Box<dyn Checker>> = vec![
        Box::new(LogoChecker::from_config(ctx.config())?),
        Box::new(HeroChecker::default()),
        Box::new(CacheChecker::from_config(ctx.config())?),
    ];
    Ok(checkers)
}

/// Run each checker against the inputs and write its section as soon as it finishes.
pub fn run_checkers(
    inputs: &AuditInputs,
    checkers: &[Box<dyn Checker>],
    sink: &mut dyn ReportSink,
) -> AuditResult<AuditSummary> {
    let mut summary = AuditSummary::default();
    for checker in checkers {
        let section = checker.section();
        let results = checker.run(inputs);
        let lines: Vec<String> = results.iter().map(ToString::to_string).collect();
        sink.write_section(section, &lines)?;
        tracing::info!(section = section.key(), results = results.len(), "section written");
        summary.record(section, &results);
    }
    Ok(summary)
}

/// Full scan-and-report pass for the site described by `ctx`.
pub fn run_full_pass(
    ctx: &CommandContext,
    sink: &mut dyn ReportSink,
) -> AuditResult<AuditSummary> {
    let checkers = default_checkers(ctx)?;
    let inputs = AuditInputs::gather(ctx)?;
    run_checkers(&inputs, &checkers, sink)
}
