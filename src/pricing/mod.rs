//! Market price aggregation and profit ranking.

pub mod aggregate;
pub mod profit;

pub use aggregate::{mean_price, min_price, MarketPrice, Method};
pub use profit::{estimate_profit, rank, Alert, Opportunity, RESALE_FACTOR};
