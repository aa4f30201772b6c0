//! Scan command: market price, then ranked opportunities among active listings.

use crate::commands::market::market_snapshot;
use crate::config::Config;
use crate::filters::FilterChain;
use crate::format::Formatter;
use crate::input::Keyword;
use crate::pricing::{rank, Alert};
use crate::report::{MarketLink, ScanHalt, ScanReport, SourceOutcome};
use crate::sources::{Feed, ListingSource, MarketClient};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Executes a full scan.
pub struct ScanCommand {
    config: Config,
}

impl ScanCommand {
    /// Creates a new scan command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scan against the live marketplaces and returns formatted output.
    pub async fn execute(&self, keyword: &Keyword) -> Result<String> {
        let client =
            MarketClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_source(&client, keyword).await
    }

    /// Runs the scan with a provided source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &impl ListingSource,
        keyword: &Keyword,
    ) -> Result<String> {
        let report = self.report_with_source(source, keyword).await;
        Ok(Formatter::new(self.config.format).format_scan(&report))
    }

    /// Builds the scan report without formatting it.
    pub async fn report_with_source(&self, source: &impl ListingSource, keyword: &Keyword) -> ScanReport {
        info!("Scanning for: {}", keyword);

        let filters = FilterChain::from_config(&self.config);
        if !filters.is_empty() {
            debug!("Active filters: {}", filters.descriptions().join(", "));
        }

        let market = market_snapshot(source, keyword, &filters).await;
        let links = MarketLink::for_keyword(keyword.as_str());

        let Some(market_price) = market.sold_price else {
            warn!("No sold listings left after filtering, skipping opportunity scan");
            return ScanReport {
                market,
                shipping_cost: self.config.shipping_cost,
                halted: Some(ScanHalt::NoMarketPrice),
                active_source: None,
                opportunities: Vec::new(),
                alert: Alert::NoCandidates,
                links,
            };
        };

        let feed = Feed::Active { buy_now_only: self.config.buy_now_only };
        let (active_source, active) =
            SourceOutcome::split(source.fetch_listings(feed, keyword.as_str()).await);
        if active_source.is_failure() {
            warn!("Active listings unavailable: {}", active_source.summary());
        }

        let mut candidates = filters.apply(active);
        candidates.truncate(self.config.max_items);
        debug!("Scoring {} active listings against {}", candidates.len(), market_price.value);

        let opportunities = rank(market_price.value, self.config.shipping_cost, candidates);
        let alert = Alert::evaluate(&opportunities, self.config.alert_threshold);

        if alert.is_triggered() {
            info!("Profit alert for '{}'", keyword);
        }

        ScanReport {
            market,
            shipping_cost: self.config.shipping_cost,
            halted: None,
            active_source: Some(active_source),
            opportunities,
            alert,
            links,
        }
    }
}
