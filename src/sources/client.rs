//! HTTP client for marketplace requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::error::ScoutError;
use crate::sources::models::{Feed, RawListing};
use crate::sources::parser::Parser;
use crate::sources::Marketplace;
use anyhow::{Context, Result};
use async_trait::async_trait;
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;
use wreq_util::Emulation;

/// Anything that can turn a keyword into listings for a feed.
///
/// The pricing pipeline only sees this trait, so markup or site changes stay
/// behind it. Also the seam used to mock sources in tests.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches and parses one result page for `keyword`.
    async fn fetch_listings(&self, feed: Feed, keyword: &str) -> Result<Vec<RawListing>, ScoutError>;
}

/// Base URLs of the scraped marketplaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auction: String,
    pub retail: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auction: Marketplace::YahooAuctions.base_url().to_string(),
            retail: Marketplace::Rakuten.base_url().to_string(),
        }
    }
}

impl Endpoints {
    /// Points both marketplaces at one server (for testing).
    pub fn single(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self { auction: base_url.clone(), retail: base_url }
    }

    /// Builds the request URL for a feed.
    pub fn feed_url(&self, feed: Feed, keyword: &str) -> String {
        let kw = urlencoding::encode(keyword);
        match feed {
            Feed::Sold => format!("{}/closedsearch/closedsearch?p={}", self.auction, kw),
            Feed::Active { buy_now_only: true } => {
                format!("{}/search/search?p={}&fixed=1", self.auction, kw)
            }
            Feed::Active { buy_now_only: false } => {
                format!("{}/search/search?p={}", self.auction, kw)
            }
            Feed::Retail => format!("{}/search/mall/{}/", self.retail, kw),
        }
    }
}

/// Marketplace HTTP client with browser impersonation and request pacing.
pub struct MarketClient {
    client: Client,
    endpoints: Endpoints,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl MarketClient {
    /// Creates a new client against the production marketplaces.
    pub async fn new(config: &Config) -> Result<Self> {
        Self::with_endpoints(config, Endpoints::default()).await
    }

    /// Creates a new client with custom base URLs (for testing).
    pub async fn with_endpoints(config: &Config, endpoints: Endpoints) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            endpoints,
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Performs a GET request and returns the body.
    async fn get(&self, marketplace: Marketplace, url: &str) -> Result<String, ScoutError> {
        self.delay().await;

        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
            .header("Accept-Language", "ja-JP,ja;q=0.9,en;q=0.8")
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|e| ScoutError::Fetch { marketplace, reason: e.to_string() })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            if status == 503 || status == 429 {
                warn!("{} is throttling requests. Consider a proxy or a longer --delay.", marketplace);
            }
            return Err(ScoutError::Status { marketplace, status: status.as_u16() });
        }

        response.text().await.map_err(|e| ScoutError::Fetch {
            marketplace,
            reason: format!("failed to read response body: {}", e),
        })
    }

    /// Adds a random delay between requests.
    async fn delay(&self) {
        if self.delay_ms == 0 {
            return;
        }

        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };

        let total_delay = self.delay_ms + jitter;
        debug!("Delaying {}ms", total_delay);
        tokio::time::sleep(Duration::from_millis(total_delay)).await;
    }
}

#[async_trait]
impl ListingSource for MarketClient {
    async fn fetch_listings(&self, feed: Feed, keyword: &str) -> Result<Vec<RawListing>, ScoutError> {
        let marketplace = feed.marketplace();
        let url = self.endpoints.feed_url(feed, keyword);

        info!("Fetching {} listings for '{}' from {}", feed.label(), keyword, marketplace);
        let html = self.get(marketplace, &url).await?;

        Parser::new(marketplace).parse_listings(&html)
    }
}
