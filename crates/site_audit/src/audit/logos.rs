use super::extract::{PatternExtractor, ReferenceExtractor};
use super::inventory::{base_name, extension, AssetInventory};
use super::report::ReportSection;
use super::{AuditInputs, CheckResult, Checker};
use crate::runtime::config::AuditConfig;
use crate::runtime::error::AuditResult;

/// Reconciles logo references in regional pages against the logo directory.
#[derive(Clone, Debug)]
pub struct LogoChecker<E = PatternExtractor> {
    extractor: E,
}

impl LogoChecker {
    pub fn from_config(config: &AuditConfig) -> AuditResult<Self> {
        Ok(Self::with_extractor(PatternExtractor::logo_sources(
            &config.logo_src_prefix,
            &config.logo_suffix,
        )?))
    }
}

impl<E: ReferenceExtractor> LogoChecker<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self { extractor }
    }
}

impl<E: ReferenceExtractor> Checker for LogoChecker<E> {
    fn section(&self) -> ReportSection {
        ReportSection::LogoMatches
    }

    fn run(&self, inputs: &AuditInputs) -> Vec<CheckResult> {
        inputs
            .pages
            .iter()
            .flat_map(|page| self.extractor.references(page))
            .map(|reference| classify_logo(&reference.origin, &reference.value, &inputs.logos))
            .collect()
    }
}

/// Classify one logo reference.
///
/// An exact name wins. Otherwise the first inventory entry (in sorted order) sharing the base
/// name under a different extension is reported as the alternate.
pub fn classify_logo(page: &str, logo: &str, inventory: &AssetInventory) -> CheckResult {
    if inventory.contains(logo) {
        return CheckResult::Match {
            page: page.to_string(),
            logo: logo.to_string(),
        };
    }

    let base = base_name(logo);
    let alternate = inventory
        .iter()
        .find(|entry| extension(entry).is_some() && base_name(entry) == base);

    match alternate {
        Some(alternate) => CheckResult::ExtensionMismatch {
            page: page.to_string(),
            logo: logo.to_string(),
            alternate: alternate.to_string(),
        },
        None => CheckResult::Missing {
            page: page.to_string(),
            logo: logo.to_string(),
        },
    }
}
