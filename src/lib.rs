//! resale-scout - Resale arbitrage scanner for Japanese marketplaces
//!
//! Estimates a market price from sold Yahoo! Auctions listings, checks the
//! Rakuten retail price, and ranks open listings by expected profit.

pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod input;
pub mod pricing;
pub mod report;
pub mod sources;

pub use config::Config;
pub use error::ScoutError;
pub use input::Keyword;
pub use pricing::{Alert, MarketPrice, Opportunity};
pub use report::{MarketReport, ScanReport, SourceOutcome};
pub use sources::{Marketplace, RawListing};
