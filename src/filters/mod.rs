//! Listing noise filters with composable chains.

pub mod junk;
pub mod price;

use crate::config::Config;
use crate::sources::RawListing;

pub use junk::{JunkFilter, DEFAULT_JUNK_KEYWORDS};
pub use price::MinPriceFilter;

/// Trait for filtering listings.
pub trait Filter: Send + Sync {
    /// Returns true if the listing passes the filter.
    fn matches(&self, listing: &RawListing) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Builds the chain described by the configuration.
    pub fn from_config(config: &Config) -> Self {
        FilterChainBuilder::new()
            .junk(config.exclude_junk, config.junk_keywords.clone(), config.junk_ignore_case)
            .min_price(config.min_price)
            .build()
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a listing passes all filters.
    pub fn matches(&self, listing: &RawListing) -> bool {
        self.filters.iter().all(|f| f.matches(listing))
    }

    /// Filters a collection of listings, keeping page order.
    pub fn apply(&self, listings: Vec<RawListing>) -> Vec<RawListing> {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a FilterChain.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Adds the junk denylist filter.
    pub fn junk(mut self, enabled: bool, terms: Vec<String>, ignore_case: bool) -> Self {
        if enabled && !terms.is_empty() {
            if ignore_case {
                self.chain.add(JunkFilter::ignore_case(terms));
            } else {
                self.chain.add(JunkFilter::new(terms));
            }
        }
        self
    }

    /// Adds a minimum price floor.
    pub fn min_price(mut self, floor: Option<u64>) -> Self {
        if let Some(floor) = floor {
            self.chain.add(MinPriceFilter::new(floor));
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_listing(title: &str, price: u64) -> RawListing {
        RawListing::new(title, price, "https://example.com")
    }

    fn default_terms() -> Vec<String> {
        DEFAULT_JUNK_KEYWORDS.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_filter_chain_new() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_filter_chain_empty_matches_all() {
        let chain = FilterChain::default();
        assert!(chain.matches(&make_listing("ジャンク", 1)));
    }

    #[test]
    fn test_filter_chain_apply_keeps_order() {
        let chain = FilterChainBuilder::new().junk(true, default_terms(), false).build();

        let listings = vec![
            make_listing("C 美品", 10000),
            make_listing("B ジャンク", 2000),
            make_listing("A 中古", 9000),
        ];

        let filtered = chain.apply(listings);
        let titles: Vec<_> = filtered.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["C 美品", "A 中古"]);
    }

    #[test]
    fn test_min_price_floor_enabled_and_disabled() {
        let cheap = make_listing("iPhone 12", 2500);

        let with_floor = FilterChainBuilder::new().min_price(Some(3000)).build();
        assert!(!with_floor.matches(&cheap));

        let without_floor = FilterChainBuilder::new().min_price(None).build();
        assert!(without_floor.matches(&cheap));
    }

    #[test]
    fn test_builder_no_filters_when_disabled() {
        let chain = FilterChainBuilder::new()
            .junk(false, default_terms(), false)
            .min_price(None)
            .build();
        assert!(chain.is_empty());

        // Enabled with no terms adds nothing either
        let chain = FilterChainBuilder::new().junk(true, Vec::new(), false).build();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_from_config_defaults() {
        let config = Config::default();
        let chain = FilterChain::from_config(&config);

        assert_eq!(chain.len(), 2);
        assert!(chain.matches(&make_listing("iPhone 12 64GB", 30000)));
        assert!(!chain.matches(&make_listing("iPhone 12 ジャンク", 30000)));
        assert!(!chain.matches(&make_listing("iPhone 12 64GB", 1000)));
    }

    #[test]
    fn test_from_config_ignore_case() {
        let config = Config { junk_ignore_case: true, min_price: None, ..Config::default() };
        let chain = FilterChain::from_config(&config);

        assert_eq!(chain.len(), 1);
        assert!(!chain.matches(&make_listing("iPhone Junk", 30000)));
    }

    #[test]
    fn test_descriptions() {
        let chain = FilterChainBuilder::new()
            .junk(true, default_terms(), false)
            .min_price(Some(5000))
            .build();

        let descriptions = chain.descriptions();
        assert_eq!(descriptions.len(), 2);
        assert!(descriptions[0].contains("junk"));
        assert!(descriptions[1].contains("5000"));
    }
}
