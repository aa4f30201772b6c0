//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::filters::DEFAULT_JUNK_KEYWORDS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
///
/// Built once per run and passed by reference into the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shipping cost deducted from every profit estimate (yen)
    #[serde(default = "default_shipping_cost")]
    pub shipping_cost: u64,

    /// Best profit at or above this raises the alert (yen)
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: i64,

    /// Filter: drop junk / accessory-only titles
    #[serde(default = "default_true")]
    pub exclude_junk: bool,

    /// Filter: denylisted title terms
    #[serde(default = "default_junk_keywords")]
    pub junk_keywords: Vec<String>,

    /// Filter: match denylist terms regardless of case
    #[serde(default)]
    pub junk_ignore_case: bool,

    /// Filter: minimum listing price (yen), None disables the floor
    #[serde(default = "default_min_price")]
    pub min_price: Option<u64>,

    /// Only scan buy-it-now listings
    #[serde(default = "default_true")]
    pub buy_now_only: bool,

    /// Maximum number of active listings to score
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Base delay between requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_shipping_cost() -> u64 {
    750
}

fn default_alert_threshold() -> i64 {
    2000
}

fn default_true() -> bool {
    true
}

fn default_junk_keywords() -> Vec<String> {
    DEFAULT_JUNK_KEYWORDS.iter().map(|t| t.to_string()).collect()
}

fn default_min_price() -> Option<u64> {
    Some(3000)
}

fn default_max_items() -> usize {
    10
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_delay_jitter_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shipping_cost: default_shipping_cost(),
            alert_threshold: default_alert_threshold(),
            exclude_junk: true,
            junk_keywords: default_junk_keywords(),
            junk_ignore_case: false,
            min_price: default_min_price(),
            buy_now_only: true,
            max_items: default_max_items(),
            proxy: None,
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            format: OutputFormat::Table,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("resale-scout").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides. Unparseable values are ignored.
    pub fn with_env(mut self) -> Self {
        if let Ok(proxy) = std::env::var("SCOUT_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(delay) = std::env::var("SCOUT_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        if let Ok(shipping) = std::env::var("SCOUT_SHIPPING") {
            if let Ok(s) = shipping.parse() {
                self.shipping_cost = s;
            }
        }

        if let Ok(threshold) = std::env::var("SCOUT_THRESHOLD") {
            if let Ok(t) = threshold.parse() {
                self.alert_threshold = t;
            }
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
