//! Marketplace sources: HTTP client, page parsing and listing models.

pub mod client;
pub mod marketplace;
pub mod models;
pub mod parser;
pub mod selectors;

pub use client::{Endpoints, ListingSource, MarketClient};
pub use marketplace::Marketplace;
pub use models::{Feed, RawListing};
pub use parser::{parse_price, Parser};
