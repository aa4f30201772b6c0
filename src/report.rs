//! Result types produced by the commands and rendered by the formatter.

use crate::error::ScoutError;
use crate::input::Keyword;
use crate::pricing::{Alert, MarketPrice, Opportunity};
use crate::sources::{Marketplace, RawListing};
use serde::Serialize;

/// What happened when a source was asked for listings.
///
/// Keeps "nothing matched" apart from "could not fetch" and "markup
/// changed" so each can be reported on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// Listings were read; the count is before filtering.
    Listings(usize),
    /// The page had no listings.
    Empty,
    /// The request failed or returned a non-success status.
    FetchFailed(String),
    /// The page was fetched but its structure was not recognised.
    LayoutChanged(String),
}

impl SourceOutcome {
    /// Splits a source result into its outcome and the listings it carried.
    pub fn split(result: Result<Vec<RawListing>, ScoutError>) -> (Self, Vec<RawListing>) {
        match result {
            Ok(listings) if listings.is_empty() => (SourceOutcome::Empty, listings),
            Ok(listings) => (SourceOutcome::Listings(listings.len()), listings),
            Err(e) if e.is_layout() => (SourceOutcome::LayoutChanged(e.to_string()), Vec::new()),
            Err(e) => (SourceOutcome::FetchFailed(e.to_string()), Vec::new()),
        }
    }

    /// True when the source could not be read at all.
    pub fn is_failure(&self) -> bool {
        matches!(self, SourceOutcome::FetchFailed(_) | SourceOutcome::LayoutChanged(_))
    }

    /// Short description for table output.
    pub fn summary(&self) -> String {
        match self {
            SourceOutcome::Listings(n) => format!("{} listings", n),
            SourceOutcome::Empty => "no listings found".to_string(),
            SourceOutcome::FetchFailed(reason) => format!("fetch failed ({})", reason),
            SourceOutcome::LayoutChanged(reason) => format!("page layout changed ({})", reason),
        }
    }
}

/// An outbound search link; constructed, never fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketLink {
    pub marketplace: Marketplace,
    pub url: String,
}

impl MarketLink {
    /// Links to the marketplaces that are not scraped.
    pub fn for_keyword(keyword: &str) -> Vec<MarketLink> {
        Marketplace::all()
            .iter()
            .filter(|m| !m.is_scraped())
            .map(|&marketplace| MarketLink { marketplace, url: marketplace.search_url(keyword) })
            .collect()
    }
}

/// Reference prices for a keyword.
#[derive(Debug, Clone, Serialize)]
pub struct MarketReport {
    pub keyword: Keyword,
    /// Mean of filtered sold listings.
    pub sold_price: Option<MarketPrice>,
    pub sold_source: SourceOutcome,
    /// Lowest retail offer.
    pub retail_price: Option<MarketPrice>,
    pub retail_source: SourceOutcome,
}

/// Why the opportunity scan did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanHalt {
    /// No sold listings survived filtering, so there is no market price.
    NoMarketPrice,
}

/// Full result of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub market: MarketReport,
    pub shipping_cost: u64,
    /// Present when the scan stopped before looking at active listings.
    pub halted: Option<ScanHalt>,
    pub active_source: Option<SourceOutcome>,
    /// Ranked best first.
    pub opportunities: Vec<Opportunity>,
    pub alert: Alert,
    pub links: Vec<MarketLink>,
}
