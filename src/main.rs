//! resale-scout - Resale arbitrage scanner for Japanese marketplaces
//!
//! Browser-emulating fetches of Yahoo! Auctions and Rakuten, ranked by profit.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use resale_scout::commands::{LinksCommand, MarketCommand, ScanCommand};
use resale_scout::config::{Config, OutputFormat};
use resale_scout::input::Keyword;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "resale-scout",
    version,
    about = "Find underpriced listings on Yahoo! Auctions",
    long_about = "Estimates a market price from sold auctions, checks Rakuten retail prices, \
                  and ranks open buy-it-now listings by expected resale profit."
)]
struct Cli {
    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SCOUT_PROXY")]
    proxy: Option<String>,

    /// Delay between requests in milliseconds
    #[arg(long, global = true, env = "SCOUT_DELAY")]
    delay: Option<u64>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Keyword typed or scanned.
#[derive(Args)]
struct KeywordArgs {
    /// Search keyword
    #[arg(required_unless_present = "barcode")]
    keyword: Option<String>,

    /// Barcode payload (JAN/EAN/UPC digits or QR text); takes precedence
    #[arg(short, long)]
    barcode: Option<String>,
}

impl KeywordArgs {
    fn resolve(&self) -> Result<Keyword> {
        Ok(Keyword::resolve(self.keyword.as_deref(), self.barcode.as_deref())?)
    }
}

/// Filter overrides shared by scan and market.
#[derive(Args)]
struct FilterArgs {
    /// Minimum listing price in yen
    #[arg(long, conflicts_with = "no_min_price")]
    min_price: Option<u64>,

    /// Disable the minimum price floor
    #[arg(long)]
    no_min_price: bool,

    /// Keep junk and accessory-only listings
    #[arg(long)]
    include_junk: bool,

    /// Match junk terms regardless of case
    #[arg(long)]
    ignore_case: bool,
}

impl FilterArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(floor) = self.min_price {
            config.min_price = Some(floor);
        }
        if self.no_min_price {
            config.min_price = None;
        }
        if self.include_junk {
            config.exclude_junk = false;
        }
        if self.ignore_case {
            config.junk_ignore_case = true;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan active listings for profitable buys
    #[command(alias = "s")]
    Scan {
        #[command(flatten)]
        input: KeywordArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Shipping cost in yen
        #[arg(long)]
        shipping: Option<u64>,

        /// Profit (yen) that raises the alert
        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i64>,

        /// Include auctions, not just buy-it-now listings
        #[arg(long)]
        auctions: bool,

        /// Maximum number of active listings to score
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Show sold-average and retail prices
    #[command(alias = "m")]
    Market {
        #[command(flatten)]
        input: KeywordArgs,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Print search links for marketplaces that are not scanned
    #[command(alias = "l")]
    Links {
        #[command(flatten)]
        input: KeywordArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(delay) = cli.delay {
        config.delay_ms = delay;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }

    match cli.command {
        Commands::Scan { input, filters, shipping, threshold, auctions, max } => {
            let keyword = input.resolve()?;

            filters.apply(&mut config);
            if let Some(shipping) = shipping {
                config.shipping_cost = shipping;
            }
            if let Some(threshold) = threshold {
                config.alert_threshold = threshold;
            }
            if auctions {
                config.buy_now_only = false;
            }
            if let Some(max) = max {
                config.max_items = max;
            }

            let cmd = ScanCommand::new(config);
            let output = cmd.execute(&keyword).await?;
            println!("{}", output);
        }

        Commands::Market { input, filters } => {
            let keyword = input.resolve()?;
            filters.apply(&mut config);

            let cmd = MarketCommand::new(config);
            let output = cmd.execute(&keyword).await?;
            println!("{}", output);
        }

        Commands::Links { input } => {
            let keyword = input.resolve()?;
            println!("{}", LinksCommand::new(config).execute(&keyword));
        }
    }

    Ok(())
}
