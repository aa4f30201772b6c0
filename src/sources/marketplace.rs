//! Marketplaces the scout knows about and their public search URLs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported marketplaces.
///
/// Yahoo! Auctions and Rakuten are scraped; Mercari and Amazon only get
/// outbound search links in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marketplace {
    YahooAuctions,
    Rakuten,
    Mercari,
    AmazonJp,
}

impl Marketplace {
    /// Human-readable marketplace name.
    pub fn name(&self) -> &'static str {
        match self {
            Marketplace::YahooAuctions => "Yahoo! Auctions",
            Marketplace::Rakuten => "Rakuten",
            Marketplace::Mercari => "Mercari",
            Marketplace::AmazonJp => "Amazon JP",
        }
    }

    /// Production base URL.
    pub fn base_url(&self) -> &'static str {
        match self {
            Marketplace::YahooAuctions => "https://auctions.yahoo.co.jp",
            Marketplace::Rakuten => "https://search.rakuten.co.jp",
            Marketplace::Mercari => "https://jp.mercari.com",
            Marketplace::AmazonJp => "https://www.amazon.co.jp",
        }
    }

    /// Public search page for a keyword, suitable for a browser link.
    pub fn search_url(&self, keyword: &str) -> String {
        let kw = urlencoding::encode(keyword);
        match self {
            Marketplace::YahooAuctions => format!("{}/search/search?p={}", self.base_url(), kw),
            Marketplace::Rakuten => format!("{}/search/mall/{}/", self.base_url(), kw),
            Marketplace::Mercari => format!("{}/search?keyword={}", self.base_url(), kw),
            Marketplace::AmazonJp => format!("{}/s?k={}", self.base_url(), kw),
        }
    }

    /// Whether listings from this marketplace are fetched and parsed.
    pub fn is_scraped(&self) -> bool {
        matches!(self, Marketplace::YahooAuctions | Marketplace::Rakuten)
    }

    /// Returns all marketplaces.
    pub fn all() -> &'static [Marketplace] {
        &[Marketplace::YahooAuctions, Marketplace::Rakuten, Marketplace::Mercari, Marketplace::AmazonJp]
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
