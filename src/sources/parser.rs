//! HTML parser for marketplace search result pages.

use crate::error::ScoutError;
use crate::sources::models::RawListing;
use crate::sources::selectors::{auction, retail};
use crate::sources::Marketplace;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

/// Extracts an integer yen amount from price text.
///
/// Leading currency glyphs and whitespace are skipped, thousands separators
/// are dropped, and only the first run of digits is read, so a range like
/// "1,000円～2,000円" yields the lower bound. Returns `None` when the text
/// holds no digits.
pub fn parse_price(text: &str) -> Option<u64> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return None;
    }

    digits.parse().ok()
}

struct CardSelectors {
    result: &'static Selector,
    title_link: &'static Selector,
    price: &'static Selector,
    image: &'static Selector,
}

/// Parser for marketplace search pages.
pub struct Parser {
    marketplace: Marketplace,
}

impl Parser {
    /// Creates a parser for the given marketplace.
    pub fn new(marketplace: Marketplace) -> Self {
        Self { marketplace }
    }

    fn selectors(&self) -> Option<CardSelectors> {
        match self.marketplace {
            Marketplace::YahooAuctions => Some(CardSelectors {
                result: &auction::RESULT,
                title_link: &auction::TITLE_LINK,
                price: &auction::PRICE,
                image: &auction::IMAGE,
            }),
            Marketplace::Rakuten => Some(CardSelectors {
                result: &retail::RESULT,
                title_link: &retail::TITLE_LINK,
                price: &retail::PRICE,
                image: &retail::IMAGE,
            }),
            Marketplace::Mercari | Marketplace::AmazonJp => None,
        }
    }

    /// Parses every listing card on a search page.
    ///
    /// A page without any cards is a legitimate empty result. A page with
    /// cards of which none can be read means the markup changed, and is
    /// reported as [`ScoutError::Layout`].
    pub fn parse_listings(&self, html: &str) -> Result<Vec<RawListing>, ScoutError> {
        let selectors = self.selectors().ok_or_else(|| ScoutError::Layout {
            marketplace: self.marketplace,
            detail: "marketplace is not scraped".to_string(),
        })?;

        let document = Html::parse_document(html);
        let mut listings = Vec::new();
        let mut cards = 0usize;

        for element in document.select(selectors.result) {
            cards += 1;
            match self.parse_card(element, &selectors) {
                Some(listing) => {
                    trace!("Parsed listing: {} - {}", listing.price, listing.title);
                    listings.push(listing);
                }
                None => trace!("Skipping unreadable card"),
            }
        }

        if cards > 0 && listings.is_empty() {
            return Err(ScoutError::Layout {
                marketplace: self.marketplace,
                detail: format!("{} cards found but none had a title and price", cards),
            });
        }

        debug!("Parsed {} listings from {} cards on {}", listings.len(), cards, self.marketplace);

        Ok(listings)
    }

    /// Reads one card. Cards without a title or a parseable price are skipped.
    fn parse_card(&self, element: ElementRef, selectors: &CardSelectors) -> Option<RawListing> {
        let link = element.select(selectors.title_link).next()?;

        let title = link.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            return None;
        }

        let price_text = element.select(selectors.price).next()?.text().collect::<String>();
        let price = parse_price(&price_text)?;

        let url = link.value().attr("href").map(|href| self.absolute_url(href)).unwrap_or_default();

        let image_url = element.select(selectors.image).next().and_then(|e| {
            e.value().attr("src").or_else(|| e.value().attr("data-src")).map(String::from)
        });

        Some(RawListing { title, price, url, image_url })
    }

    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http") {
            href.to_string()
        } else {
            format!("{}{}", self.marketplace.base_url(), href)
        }
    }
}
