use super::report::ReportSection;
use super::{AuditInputs, CheckResult, Checker};

/// Markup every regional hero block must contain, in reporting order.
pub const REQUIRED_HERO_FRAGMENTS: &[&str] = &[
    "<section class=\"region-hero\">",
    "<div class=\"hero-flag\">",
    "class=\"hero-logo\"",
    "<h1 class=\"region-title\">",
    "<span class=\"wtf-text\">WatchTheFall</span>",
];

/// Structural parity check over the hero block of each regional page.
#[derive(Clone, Debug)]
pub struct HeroChecker {
    fragments: &'static [&'static str],
}

impl Default for HeroChecker {
    fn default() -> Self {
        Self {
            fragments: REQUIRED_HERO_FRAGMENTS,
        }
    }
}

impl Checker for HeroChecker {
    fn section(&self) -> ReportSection {
        ReportSection::HeroParity
    }

    fn run(&self, inputs: &AuditInputs) -> Vec<CheckResult> {
        inputs
            .pages
            .iter()
            .map(|page| {
                let missing = missing_fragments(&page.text, self.fragments);
                if missing.is_empty() {
                    CheckResult::HeroOk {
                        page: page.name.clone(),
                    }
                } else {
                    CheckResult::HeroMismatch {
                        page: page.name.clone(),
                        missing: missing.into_iter().map(str::to_string).collect(),
                    }
                }
            })
            .collect()
    }
}

/// Required fragments absent from `text`, in required-list order.
pub fn missing_fragments<'a>(text: &str, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|fragment| !text.contains(*fragment))
        .collect()
}
