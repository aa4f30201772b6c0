//! Minimum price floor.

use super::Filter;
use crate::sources::RawListing;

/// Drops listings priced below a floor.
///
/// Cheap listings on a keyword search are usually accessories or parts, so
/// they are kept out of both the market average and the candidates.
pub struct MinPriceFilter {
    floor: u64,
}

impl MinPriceFilter {
    /// Creates a filter with the given floor in yen.
    pub fn new(floor: u64) -> Self {
        Self { floor }
    }
}

impl Filter for MinPriceFilter {
    fn matches(&self, listing: &RawListing) -> bool {
        listing.price >= self.floor
    }

    fn description(&self) -> String {
        format!("Price: >= {} yen", self.floor)
    }
}
