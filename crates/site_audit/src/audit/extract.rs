use super::inventory::PageDocument;
use crate::runtime::error::{AuditError, AuditResult};
use regex::Regex;

/// An identifier extracted from a page, with the page it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reference {
    pub value: String,
    pub origin: String,
}

/// Turns raw text into the ordered identifiers it references.
///
/// An empty result is a valid answer, not an error.
pub trait ReferenceExtractor {
    fn extract(&self, text: &str) -> Vec<String>;

    fn references(&self, page: &PageDocument) -> Vec<Reference> {
        self.extract(&page.text)
            .into_iter()
            .map(|value| Reference {
                value,
                origin: page.name.clone(),
            })
            .collect()
    }
}

/// Regex-backed extractor.
///
/// Each match yields its first participating capture group, or the whole match when the pattern
/// has no groups.
#[derive(Clone, Debug)]
pub struct PatternExtractor {
    pattern: Regex,
}

impl PatternExtractor {
    pub fn new(pattern: &str) -> AuditResult<Self> {
        let pattern = Regex::new(pattern).map_err(|err| {
            AuditError::config(format!("invalid extraction pattern `{pattern}`: {err}"))
        })?;
        Ok(Self { pattern })
    }

    /// Logo `src` attributes under `prefix` whose file stem ends with `suffix`.
    pub fn logo_sources(prefix: &str, suffix: &str) -> AuditResult<Self> {
        Self::new(&format!(
            r#"src="{}([^"]*{}\.[^"]*)""#,
            regex::escape(prefix),
            regex::escape(suffix)
        ))
    }

    /// Single- or double-quoted absolute paths.
    pub fn quoted_paths() -> AuditResult<Self> {
        Self::new(r#"'(/[^'\n]*)'|"(/[^"\n]*)""#)
    }
}

impl ReferenceExtractor for PatternExtractor {
    fn extract(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let matched = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .next()
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str().to_string());
                matched
            })
            .collect()
    }
}

/// Body of the bracketed list literal assigned to `identifier`, with comments blanked out.
///
/// Brackets inside quoted strings and comments do not close the list.
pub fn locate_asset_list(script: &str, identifier: &str) -> AuditResult<String> {
    let pattern = Regex::new(&format!(r"\b{}\s*=\s*\[", regex::escape(identifier)))
        .map_err(|err| AuditError::cache_parse(format!("invalid manifest identifier: {err}")))?;

    let open = pattern.find(script).ok_or_else(|| {
        AuditError::cache_parse(format!("could not find `{identifier}` asset list literal"))
    })?;
    list_body(&script[open.end()..]).ok_or_else(|| {
        AuditError::cache_parse(format!("`{identifier}` asset list literal is never closed"))
    })
}

/// Text up to the `]` that closes an already opened list.
fn list_body(rest: &str) -> Option<String> {
    let mut body = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = rest.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(open) = quote {
            body.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    body.push(escaped);
                }
            } else if c == open {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => {
                quote = Some(c);
                body.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        body.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                body.push(' ');
            }
            '[' => {
                depth += 1;
                body.push(c);
            }
            ']' if depth == 0 => return Some(body),
            ']' => {
                depth -= 1;
                body.push(c);
            }
            _ => body.push(c),
        }
    }
    None
}
