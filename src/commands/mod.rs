//! CLI command implementations.

pub mod links;
pub mod market;
pub mod scan;

pub use links::LinksCommand;
pub use market::{market_snapshot, MarketCommand};
pub use scan::ScanCommand;
