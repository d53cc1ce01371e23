// src/network/extract.rs
//! Locating the JSON payload embedded in the ckpool status page
//!
//! The page is HTML with one JSON object pasted into it. The default
//! strategy takes the widest brace-delimited region that contains a marker
//! field name: from the first `{` that is followed by the marker to the last
//! `}` in the page.

use crate::utils::error::DashboardError;
use lazy_static::lazy_static;
use regex::Regex;

/// Field name that identifies the worker payload
pub const WORKER_MARKER: &str = "workername";

lazy_static! {
    static ref WORKER_REGION: Regex =
        region_pattern(WORKER_MARKER).expect("worker region pattern is valid");
}

fn region_pattern(marker: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r#"(?s)\{{.*"{}".*\}}"#, regex::escape(marker)))
}

/// Strategy for pulling the payload text out of a page
pub trait PayloadExtractor: Send + Sync {
    /// Returns the payload slice, or `None` if the page carries none
    fn extract<'a>(&self, page: &'a str) -> Option<&'a str>;
}

/// Greedy regex match of a brace region containing a quoted marker
#[derive(Debug, Clone)]
pub struct BraceRegionExtractor {
    pattern: Regex,
}

impl BraceRegionExtractor {
    /// Extractor for the worker status payload
    pub fn worker_payload() -> Self {
        BraceRegionExtractor {
            pattern: WORKER_REGION.clone(),
        }
    }

    /// Extractor keyed on an arbitrary field name
    ///
    /// # Errors
    /// Returns `DashboardError::InputError` if the marker yields an oversized pattern
    pub fn with_marker(marker: &str) -> Result<Self, DashboardError> {
        let pattern = region_pattern(marker)
            .map_err(|e| DashboardError::InputError(format!("Bad marker '{}': {}", marker, e)))?;
        Ok(BraceRegionExtractor { pattern })
    }
}

impl Default for BraceRegionExtractor {
    fn default() -> Self {
        Self::worker_payload()
    }
}

impl PayloadExtractor for BraceRegionExtractor {
    fn extract<'a>(&self, page: &'a str) -> Option<&'a str> {
        self.pattern.find(page).map(|m| m.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_embedded_in_html() {
        let page = r#"<html><body><pre>{"worker": [{"workername": "bc1q.rig"}]}</pre></body></html>"#;
        let found = BraceRegionExtractor::worker_payload().extract(page);
        assert_eq!(found, Some(r#"{"worker": [{"workername": "bc1q.rig"}]}"#));
    }

    #[test]
    fn match_spans_to_last_closing_brace() {
        let page = "<style>a{color:red}</style>\n<pre>{\"workername\": \"x\"}</pre><script>f(){}</script>";
        let found = BraceRegionExtractor::worker_payload().extract(page).unwrap();
        // Greedy: starts at the first brace and ends at the last one in the page.
        assert!(found.starts_with("{color:red}"));
        assert!(found.ends_with("f(){}"));
    }

    #[test]
    fn page_without_marker_yields_none() {
        let page = r#"<html>{"error": "unknown user"}</html>"#;
        assert_eq!(BraceRegionExtractor::worker_payload().extract(page), None);
    }

    #[test]
    fn custom_marker_is_escaped() {
        let extractor = BraceRegionExtractor::with_marker("a.b").unwrap();
        assert_eq!(extractor.extract(r#"{"a.b": 1}"#), Some(r#"{"a.b": 1}"#));
        assert_eq!(extractor.extract(r#"{"axb": 1}"#), None);
    }
}
