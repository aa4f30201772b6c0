//! Data models handed from sources to the pricing pipeline.

use crate::sources::Marketplace;
use serde::{Deserialize, Serialize};

/// A listing as read off a search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    /// Listing title
    pub title: String,
    /// Price in whole yen
    pub price: u64,
    /// Link to the listing
    pub url: String,
    /// Thumbnail URL if the card had one
    pub image_url: Option<String>,
}

impl RawListing {
    /// Creates a listing without an image.
    pub fn new(title: impl Into<String>, price: u64, url: impl Into<String>) -> Self {
        Self { title: title.into(), price, url: url.into(), image_url: None }
    }

    /// Attaches a thumbnail URL.
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

/// Which result page to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// Closed auctions, used as the market price reference.
    Sold,
    /// Currently open listings, the purchase candidates.
    Active { buy_now_only: bool },
    /// Retail marketplace offers, used as a new-price reference.
    Retail,
}

impl Feed {
    /// Marketplace that serves this feed.
    pub fn marketplace(&self) -> Marketplace {
        match self {
            Feed::Sold | Feed::Active { .. } => Marketplace::YahooAuctions,
            Feed::Retail => Marketplace::Rakuten,
        }
    }

    /// Short label used in logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            Feed::Sold => "sold",
            Feed::Active { .. } => "active",
            Feed::Retail => "retail",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_listing_builder() {
        let listing = RawListing::new("Nintendo Switch", 21800, "https://example.com/a1")
            .with_image("https://example.com/a1.jpg");
        assert_eq!(listing.title, "Nintendo Switch");
        assert_eq!(listing.price, 21800);
        assert_eq!(listing.image_url.as_deref(), Some("https://example.com/a1.jpg"));
    }

    #[test]
    fn test_feed_marketplace() {
        assert_eq!(Feed::Sold.marketplace(), Marketplace::YahooAuctions);
        assert_eq!(Feed::Active { buy_now_only: true }.marketplace(), Marketplace::YahooAuctions);
        assert_eq!(Feed::Retail.marketplace(), Marketplace::Rakuten);
    }

    #[test]
    fn test_raw_listing_serde() {
        let listing = RawListing::new("Test", 1000, "https://example.com");
        let json = serde_json::to_string(&listing).unwrap();
        assert!(json.contains("\"price\":1000"));
        let parsed: RawListing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, listing);
    }
}
