//! Junk / accessory-only title denylist.

use super::Filter;
use crate::sources::RawListing;

/// Default denylist: damaged or junk condition, and accessory-only listings.
pub const DEFAULT_JUNK_KEYWORDS: &[&str] = &[
    "ジャンク",
    "JUNK",
    "junk",
    "故障",
    "破損",
    "難あり",
    "部品取り",
    "ケース",
    "カバー",
    "フィルム",
    "保護",
    "箱のみ",
    "空箱",
    "モックアップ",
    "模型",
];

/// Rejects listings whose title contains a denylisted term.
///
/// Matching is a plain substring test. Case-sensitive unless built with
/// [`JunkFilter::ignore_case`].
pub struct JunkFilter {
    terms: Vec<String>,
    ignore_case: bool,
}

impl JunkFilter {
    /// Creates a case-sensitive filter.
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms, ignore_case: false }
    }

    /// Creates a filter that lowercases both terms and titles.
    pub fn ignore_case(terms: Vec<String>) -> Self {
        Self { terms: terms.into_iter().map(|t| t.to_lowercase()).collect(), ignore_case: true }
    }

    /// Creates a filter with the built-in denylist.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_JUNK_KEYWORDS.iter().map(|t| t.to_string()).collect())
    }

    /// Returns true when the title contains any denylisted term.
    pub fn is_junk(&self, title: &str) -> bool {
        if self.ignore_case {
            let title = title.to_lowercase();
            self.terms.iter().any(|t| title.contains(t.as_str()))
        } else {
            self.terms.iter().any(|t| title.contains(t.as_str()))
        }
    }
}

impl Filter for JunkFilter {
    fn matches(&self, listing: &RawListing) -> bool {
        !self.is_junk(&listing.title)
    }

    fn description(&self) -> String {
        let mode = if self.ignore_case { ", any case" } else { "" };
        format!("Exclude junk ({} terms{})", self.terms.len(), mode)
    }
}
