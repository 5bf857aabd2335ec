use super::extract::{locate_asset_list, PatternExtractor, ReferenceExtractor};
use super::report::ReportSection;
use super::{AuditInputs, CheckResult, Checker};
use crate::runtime::config::AuditConfig;
use crate::runtime::error::AuditResult;
use std::collections::HashSet;

/// Checks that the service-worker precache list covers every page and cacheable logo.
#[derive(Clone, Debug)]
pub struct CacheChecker<E = PatternExtractor> {
    extractor: E,
    manifest_identifier: String,
    source: String,
    pages_route: String,
    logos_route: String,
    cached_logo_extensions: Vec<String>,
}

impl CacheChecker {
    pub fn from_config(config: &AuditConfig) -> AuditResult<Self> {
        Ok(Self::with_extractor(PatternExtractor::quoted_paths()?, config))
    }
}

impl<E: ReferenceExtractor> CacheChecker<E> {
    pub fn with_extractor(extractor: E, config: &AuditConfig) -> Self {
        Self {
            extractor,
            manifest_identifier: config.manifest_identifier.clone(),
            source: config.service_worker.display().to_string(),
            pages_route: config.pages_route.clone(),
            logos_route: config.logos_route.clone(),
            cached_logo_extensions: config.cached_logo_extensions.clone(),
        }
    }

    /// Absolute paths the static cache must hold: every loaded page, then every cacheable logo.
    pub fn expected_paths(&self, inputs: &AuditInputs) -> Vec<String> {
        let pages = inputs
            .pages
            .iter()
            .map(|page| route_path(&self.pages_route, &page.name));
        let logos = inputs
            .logos
            .with_extensions(&self.cached_logo_extensions)
            .map(|name| route_path(&self.logos_route, name));
        pages.chain(logos).collect()
    }

    fn cached_entries(&self, inputs: &AuditInputs) -> AuditResult<HashSet<String>> {
        let script = inputs.service_worker.as_ref().map_err(Clone::clone)?;
        let literal = locate_asset_list(script, &self.manifest_identifier)?;
        Ok(self.extractor.extract(&literal).into_iter().collect())
    }
}

impl<E: ReferenceExtractor> Checker for CacheChecker<E> {
    fn section(&self) -> ReportSection {
        ReportSection::CacheCoverage
    }

    fn run(&self, inputs: &AuditInputs) -> Vec<CheckResult> {
        let cached = match self.cached_entries(inputs) {
            Ok(cached) => cached,
            Err(err) => {
                tracing::warn!(source = %self.source, error = %err, "cache coverage check skipped");
                return vec![CheckResult::CacheCheckError {
                    source: self.source.clone(),
                    reason: err.message,
                }];
            }
        };
        tracing::debug!(entries = cached.len(), "parsed precache manifest");

        self.expected_paths(inputs)
            .into_iter()
            .map(|path| {
                if cached.contains(&path) {
                    CheckResult::Cached { path }
                } else {
                    CheckResult::NotCached { path }
                }
            })
            .collect()
    }
}

fn route_path(route: &str, name: &str) -> String {
    format!("{}/{name}", route.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::inventory::{AssetInventory, PageDocument};
    use crate::runtime::error::AuditError;
    use pretty_assertions::assert_eq;

    const SERVICE_WORKER: &str = r#"
const CACHE_NAME = 'wtf-v4-cache-v5';
const ASSETS_TO_CACHE = [
    '/',                     // Root
    '/index.html',
    '/regional/pages/france.html',
    '/assets/logos/france-wtf-logo.png',
    "/assets/logos/france-wtf-logo.jpg",
];
self.addEventListener('install', () => {});
"#;

    fn inputs(service_worker: AuditResult<String>) -> AuditInputs {
        AuditInputs {
            pages: vec![
                PageDocument::new("france.html", ""),
                PageDocument::new("germany.html", ""),
            ],
            logos: AssetInventory::from_names([
                "france-wtf-logo.png",
                "france-wtf-logo.jpg",
                "germany-wtf-logo.PNG",
                "germany-wtf-logo.svg",
            ]),
            service_worker,
        }
    }

    fn lines(results: Vec<CheckResult>) -> Vec<String> {
        results.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn classifies_pages_then_png_logos_only() {
        let checker = CacheChecker::from_config(&AuditConfig::default()).expect("checker");
        let results = checker.run(&inputs(Ok(SERVICE_WORKER.to_string())));
        assert_eq!(
            lines(results),
            vec![
                "/regional/pages/france.html [CACHED]",
                "/regional/pages/germany.html [NOT IN STATIC CACHE]",
                "/assets/logos/france-wtf-logo.png [CACHED]",
                "/assets/logos/germany-wtf-logo.PNG [NOT IN STATIC CACHE]",
            ]
        );
    }

    #[test]
    fn only_loaded_pages_are_expected() {
        let checker = CacheChecker::from_config(&AuditConfig::default()).expect("checker");
        let mut inputs = inputs(Ok(SERVICE_WORKER.to_string()));
        inputs.pages.truncate(1);
        inputs.logos = AssetInventory::default();
        assert_eq!(
            checker.expected_paths(&inputs),
            vec!["/regional/pages/france.html"]
        );
    }

    #[test]
    fn comment_brackets_inside_the_manifest_do_not_hide_entries() {
        let checker = CacheChecker::from_config(&AuditConfig::default()).expect("checker");
        let script = "const ASSETS_TO_CACHE = [\n  '/', // root [stable]\n  \
                      '/regional/pages/france.html',\n  '/regional/pages/germany.html'\n];"
            .to_string();
        let mut inputs = inputs(Ok(script));
        inputs.logos = AssetInventory::default();
        assert_eq!(
            lines(checker.run(&inputs)),
            vec![
                "/regional/pages/france.html [CACHED]",
                "/regional/pages/germany.html [CACHED]",
            ]
        );
    }

    #[test]
    fn missing_literal_yields_a_single_error_line() {
        let checker = CacheChecker::from_config(&AuditConfig::default()).expect("checker");
        let script = "self.addEventListener('fetch', () => {});".to_string();
        let results = checker.run(&inputs(Ok(script)));
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].to_string(),
            "sw.js [CACHE CHECK ERROR] could not find `ASSETS_TO_CACHE` asset list literal"
        );
    }

    #[test]
    fn unreadable_service_worker_carries_the_read_failure() {
        let checker = CacheChecker::from_config(&AuditConfig::default()).expect("checker");
        let results = checker.run(&inputs(Err(AuditError::cache_parse(
            "failed to read sw.js: No such file or directory",
        ))));
        assert_eq!(
            lines(results),
            vec!["sw.js [CACHE CHECK ERROR] failed to read sw.js: No such file or directory"]
        );
    }

    #[test]
    fn route_path_tolerates_trailing_slash() {
        assert_eq!(route_path("/assets/logos/", "a.png"), "/assets/logos/a.png");
        assert_eq!(route_path("/assets/logos", "a.png"), "/assets/logos/a.png");
    }
}
