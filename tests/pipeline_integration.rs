//! Integration tests for parsing and the scan pipeline using fixture files.

use async_trait::async_trait;
use resale_scout::commands::{MarketCommand, ScanCommand};
use resale_scout::config::{Config, OutputFormat};
use resale_scout::filters::FilterChain;
use resale_scout::input::Keyword;
use resale_scout::pricing::Alert;
use resale_scout::report::SourceOutcome;
use resale_scout::sources::{Endpoints, Feed, ListingSource, MarketClient, Marketplace, Parser, RawListing};
use resale_scout::ScoutError;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CLOSED_FIXTURE: &str = include_str!("fixtures/yahoo_closed.html");
const ACTIVE_FIXTURE: &str = include_str!("fixtures/yahoo_active.html");
const RETAIL_FIXTURE: &str = include_str!("fixtures/rakuten.html");

fn make_test_config() -> Config {
    Config { delay_ms: 0, delay_jitter_ms: 0, ..Config::default() }
}

fn keyword() -> Keyword {
    Keyword::from_text("iPhone 12").unwrap()
}

/// Serves the fixture pages without any network.
struct FixtureSource;

#[async_trait]
impl ListingSource for FixtureSource {
    async fn fetch_listings(&self, feed: Feed, _keyword: &str) -> Result<Vec<RawListing>, ScoutError> {
        let html = match feed {
            Feed::Sold => CLOSED_FIXTURE,
            Feed::Active { .. } => ACTIVE_FIXTURE,
            Feed::Retail => RETAIL_FIXTURE,
        };
        Parser::new(feed.marketplace()).parse_listings(html)
    }
}

#[test]
fn test_parse_closed_auctions() {
    let listings = Parser::new(Marketplace::YahooAuctions).parse_listings(CLOSED_FIXTURE).unwrap();

    // Card without a price is skipped
    assert_eq!(listings.len(), 5);

    let first = &listings[0];
    assert_eq!(first.title, "Apple iPhone 12 64GB ブラック SIMフリー");
    assert_eq!(first.price, 30000);
    assert_eq!(first.url, "https://page.auctions.yahoo.co.jp/jp/auction/c1000000001");
    assert!(first.image_url.as_deref().unwrap().ends_with("c1.jpg"));
}

#[test]
fn test_parse_active_relative_link() {
    let listings = Parser::new(Marketplace::YahooAuctions).parse_listings(ACTIVE_FIXTURE).unwrap();

    assert_eq!(listings.len(), 4);
    assert_eq!(listings[2].url, "https://auctions.yahoo.co.jp/jp/auction/a2000000003");
}

#[test]
fn test_parse_retail() {
    let listings = Parser::new(Marketplace::Rakuten).parse_listings(RETAIL_FIXTURE).unwrap();

    let prices: Vec<u64> = listings.iter().map(|l| l.price).collect();
    assert_eq!(prices, vec![52800, 49800, 980]);
    assert_eq!(listings[1].title, "iPhone 12 64GB 未使用品");
}

#[test]
fn test_filter_integration() {
    let listings = Parser::new(Marketplace::YahooAuctions).parse_listings(CLOSED_FIXTURE).unwrap();

    let filtered = FilterChain::from_config(&make_test_config()).apply(listings);

    // Junk, accessory and below-floor listings are gone
    let prices: Vec<u64> = filtered.iter().map(|l| l.price).collect();
    assert_eq!(prices, vec![30000, 34000]);
}

#[test]
fn test_scan_pipeline_from_fixtures() {
    let cmd = ScanCommand::new(make_test_config());
    let report = tokio_test::block_on(cmd.report_with_source(&FixtureSource, &keyword()));

    assert_eq!(report.market.sold_price.unwrap().value, 32000);
    assert_eq!(report.market.retail_price.unwrap().value, 49800);
    assert_eq!(report.active_source, Some(SourceOutcome::Listings(4)));

    // 32000 * 0.9 - 750 = 28050 before purchase price
    let profits: Vec<i64> = report.opportunities.iter().map(|o| o.profit).collect();
    assert_eq!(profits, vec![8050, 4050, 550]);

    match &report.alert {
        Alert::Triggered { best, threshold } => {
            assert_eq!(best.listing.title, "iPhone 12 本体のみ");
            assert_eq!(*threshold, 2000);
        }
        other => panic!("expected alert, got {:?}", other),
    }
}

#[tokio::test]
async fn test_scan_against_mock_marketplaces() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/closedsearch/closedsearch"))
        .and(query_param("p", "iPhone 12"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CLOSED_FIXTURE))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/search"))
        .and(query_param("fixed", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ACTIVE_FIXTURE))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/search/mall/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RETAIL_FIXTURE))
        .mount(&server)
        .await;

    let config = make_test_config();
    let client = MarketClient::with_endpoints(&config, Endpoints::single(server.uri())).await.unwrap();

    let report = ScanCommand::new(config).report_with_source(&client, &keyword()).await;

    assert_eq!(report.market.sold_price.unwrap().value, 32000);
    assert_eq!(report.opportunities.len(), 3);
    assert!(report.alert.is_triggered());
}

#[tokio::test]
async fn test_market_when_retail_is_down() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/closedsearch/closedsearch"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CLOSED_FIXTURE))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/search/mall/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = Config { format: OutputFormat::Json, ..make_test_config() };
    let client = MarketClient::with_endpoints(&config, Endpoints::single(server.uri())).await.unwrap();

    let cmd = MarketCommand::new(config);
    let report = cmd.report_with_source(&client, &keyword()).await;

    assert_eq!(report.sold_price.unwrap().value, 32000);
    assert!(report.retail_price.is_none());
    assert!(matches!(report.retail_source, SourceOutcome::FetchFailed(ref r) if r.contains("503")));

    let output = cmd.execute_with_source(&client, &keyword()).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["retail_source"]["status"], "fetch_failed");
}

#[tokio::test]
async fn test_scan_halts_on_changed_layout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/closedsearch/closedsearch"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<ul><li class="Product"><div class="Renamed">iPhone</div></li></ul>"#),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/search/mall/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let config = make_test_config();
    let client = MarketClient::with_endpoints(&config, Endpoints::single(server.uri())).await.unwrap();

    let report = ScanCommand::new(config).report_with_source(&client, &keyword()).await;

    assert!(matches!(report.market.sold_source, SourceOutcome::LayoutChanged(_)));
    assert_eq!(report.market.retail_source, SourceOutcome::Empty);
    assert!(report.halted.is_some());
    assert!(report.active_source.is_none());
}
