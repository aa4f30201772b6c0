//! CSS selectors for marketplace search pages.
//!
//! Update this file when a marketplace changes its HTML structure.
//! When parsing fails, capture an HTML sample, update the selectors and add
//! a fixture under `tests/fixtures/`.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for Yahoo! Auctions search and closed-search pages.
pub mod auction {
    use super::*;

    /// Listing card.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("li.Product").unwrap());

    /// Title link (text is the title, href the listing URL).
    pub static TITLE_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("a.Product__titleLink").unwrap());

    /// Price text, e.g. "3,980円".
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("span.Product__priceValue, .Product__priceValue").unwrap());

    /// Thumbnail.
    pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "img.Product__imageData, \
             .Product__image img",
        )
        .unwrap()
    });
}

/// Selectors for Rakuten search pages.
pub mod retail {
    use super::*;

    /// Result item container.
    pub static RESULT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.searchresultitem, .dui-card.searchresultitem").unwrap());

    /// Title link.
    pub static TITLE_LINK: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "h2 a, \
             .title a, \
             .content.title a",
        )
        .unwrap()
    });

    /// Price text, e.g. "12,800".
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("._price, .important").unwrap());

    /// Thumbnail.
    pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "img._verticallyaligned, \
             .image img",
        )
        .unwrap()
    });
}
