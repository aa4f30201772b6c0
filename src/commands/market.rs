//! Market check command: sold-listing average and retail minimum.

use crate::config::Config;
use crate::filters::FilterChain;
use crate::format::Formatter;
use crate::input::Keyword;
use crate::pricing::{mean_price, min_price};
use crate::report::{MarketReport, SourceOutcome};
use crate::sources::{Feed, ListingSource, MarketClient};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Fetches sold and retail listings and reduces them to reference prices.
///
/// Sold listings are averaged, retail offers give their minimum. Both go
/// through the same filter chain.
pub async fn market_snapshot(
    source: &impl ListingSource,
    keyword: &Keyword,
    filters: &FilterChain,
) -> MarketReport {
    let (sold_source, sold) = SourceOutcome::split(source.fetch_listings(Feed::Sold, keyword.as_str()).await);
    if sold_source.is_failure() {
        warn!("Sold listings unavailable: {}", sold_source.summary());
    }

    let sold = filters.apply(sold);
    let sold_price = mean_price(&sold);
    debug!("{} sold listings after filtering, mean {:?}", sold.len(), sold_price.map(|p| p.value));

    let (retail_source, retail) =
        SourceOutcome::split(source.fetch_listings(Feed::Retail, keyword.as_str()).await);
    if retail_source.is_failure() {
        warn!("Retail listings unavailable: {}", retail_source.summary());
    }

    let retail = filters.apply(retail);
    let retail_price = min_price(&retail);

    MarketReport { keyword: keyword.clone(), sold_price, sold_source, retail_price, retail_source }
}

/// Executes a market check.
pub struct MarketCommand {
    config: Config,
}

impl MarketCommand {
    /// Creates a new market command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the check against the live marketplaces and returns formatted output.
    pub async fn execute(&self, keyword: &Keyword) -> Result<String> {
        let client =
            MarketClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_source(&client, keyword).await
    }

    /// Runs the check with a provided source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl ListingSource,
        keyword: &Keyword,
    ) -> Result<String> {
        let report = self.report_with_source(source, keyword).await;
        Ok(Formatter::new(self.config.format).format_market(&report))
    }

    /// Builds the report without formatting it.
    pub async fn report_with_source(
        &self,
        source: &impl ListingSource,
        keyword: &Keyword,
    ) -> MarketReport {
        info!("Checking market for: {}", keyword);

        let filters = FilterChain::from_config(&self.config);
        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }

        market_snapshot(source, keyword, &filters).await
    }
}
