//! Reference market price from a set of listings.

use crate::sources::RawListing;
use serde::{Deserialize, Serialize};

/// How a market price was reduced from its listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Mean,
    Min,
}

/// An aggregated price together with the number of listings behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub value: u64,
    pub sample_size: usize,
    pub method: Method,
}

impl MarketPrice {
    /// The price, or zero when there was nothing to aggregate.
    pub fn value_or_zero(price: Option<MarketPrice>) -> u64 {
        price.map(|p| p.value).unwrap_or(0)
    }
}

/// Arithmetic mean of listing prices, truncated to whole yen.
///
/// Returns `None` for an empty set so that "no data" never reads as a
/// price of zero.
pub fn mean_price(listings: &[RawListing]) -> Option<MarketPrice> {
    if listings.is_empty() {
        return None;
    }

    let total: u128 = listings.iter().map(|l| u128::from(l.price)).sum();
    let value = (total / listings.len() as u128) as u64;

    Some(MarketPrice { value, sample_size: listings.len(), method: Method::Mean })
}

/// Lowest listing price.
pub fn min_price(listings: &[RawListing]) -> Option<MarketPrice> {
    let value = listings.iter().map(|l| l.price).min()?;
    Some(MarketPrice { value, sample_size: listings.len(), method: Method::Min })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listings(prices: &[u64]) -> Vec<RawListing> {
        prices.iter().map(|&p| RawListing::new("x", p, "u")).collect()
    }

    #[test]
    fn test_mean_price() {
        let price = mean_price(&listings(&[10000, 12000, 14000])).unwrap();
        assert_eq!(price.value, 12000);
        assert_eq!(price.sample_size, 3);
        assert_eq!(price.method, Method::Mean);
    }

    #[test]
    fn test_mean_truncates() {
        let price = mean_price(&listings(&[1000, 1001])).unwrap();
        assert_eq!(price.value, 1000);
    }

    #[test]
    fn test_mean_empty_is_none() {
        let price = mean_price(&[]);
        assert!(price.is_none());
        assert_eq!(MarketPrice::value_or_zero(price), 0);
    }

    #[test]
    fn test_mean_large_values() {
        let price = mean_price(&listings(&[u64::MAX, u64::MAX])).unwrap();
        assert_eq!(price.value, u64::MAX);
    }

    #[test]
    fn test_min_price() {
        let price = min_price(&listings(&[32978, 29800, 31000])).unwrap();
        assert_eq!(price.value, 29800);
        assert_eq!(price.method, Method::Min);
        assert!(min_price(&[]).is_none());
    }
}
