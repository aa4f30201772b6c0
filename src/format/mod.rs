//! Output formatting for scan and market reports (table, JSON, markdown, CSV).

use crate::config::OutputFormat;
use crate::input::{Keyword, Origin};
use crate::pricing::{Alert, MarketPrice, Method};
use crate::report::{MarketLink, MarketReport, ScanHalt, ScanReport, SourceOutcome};
use serde::Serialize;

/// Formats reports for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a full scan.
    pub fn format_scan(&self, report: &ScanReport) -> String {
        match self.format {
            OutputFormat::Json => Self::json(report),
            OutputFormat::Table => self.table_scan(report),
            OutputFormat::Markdown => self.markdown_scan(report),
            OutputFormat::Csv => self.csv_scan(report),
        }
    }

    /// Formats a market check.
    pub fn format_market(&self, report: &MarketReport) -> String {
        match self.format {
            OutputFormat::Json => Self::json(report),
            OutputFormat::Table => self.table_market(report),
            OutputFormat::Markdown => self.markdown_market(report),
            OutputFormat::Csv => self.csv_market(report),
        }
    }

    /// Formats outbound search links.
    pub fn format_links(&self, keyword: &Keyword, links: &[MarketLink]) -> String {
        match self.format {
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct Links<'a> {
                    keyword: &'a Keyword,
                    links: &'a [MarketLink],
                }
                Self::json(&Links { keyword, links })
            }
            OutputFormat::Table => {
                let mut lines = vec![format!("Search links for: {}", keyword)];
                for link in links {
                    lines.push(format!("  {:<12} {}", link.marketplace.name(), link.url));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => links
                .iter()
                .map(|l| format!("- [{}]({})", l.marketplace.name(), l.url))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Csv => {
                let mut lines = vec!["marketplace,url".to_string()];
                for link in links {
                    lines.push(format!("{},{}", Self::csv_escape(link.marketplace.name()), link.url));
                }
                lines.join("\n")
            }
        }
    }

    // JSON formatting

    fn json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    // Table formatting

    fn table_market_lines(report: &MarketReport) -> Vec<String> {
        vec![
            format!("Keyword:   {} ({})", report.keyword, origin_label(report.keyword.origin)),
            format!("Market:    {}", price_line(report.sold_price, &report.sold_source)),
            format!("Retail:    {}", price_line(report.retail_price, &report.retail_source)),
        ]
    }

    fn table_market(&self, report: &MarketReport) -> String {
        Self::table_market_lines(report).join("\n")
    }

    fn table_scan(&self, report: &ScanReport) -> String {
        let profit_width = 12;
        let price_width = 12;
        let title_width = 50;

        let mut lines = Self::table_market_lines(&report.market);
        lines.push(format!("Shipping:  {}", yen(report.shipping_cost)));
        lines.push(String::new());

        if let Some(ScanHalt::NoMarketPrice) = report.halted {
            lines.push(
                "Warning: no market price available, active listings were not scanned".to_string(),
            );
        } else if report.opportunities.is_empty() {
            let detail = report.active_source.as_ref().map(|s| s.summary()).unwrap_or_default();
            lines.push(format!("Warning: no active listings to score ({})", detail));
        } else {
            lines.push(format!(
                "{:>profit_width$}  {:>price_width$}  {}",
                "Profit", "Price", "Title"
            ));
            lines.push(format!(
                "{:-<profit_width$}  {:-<price_width$}  {:-<title_width$}",
                "", "", ""
            ));

            for opportunity in &report.opportunities {
                lines.push(format!(
                    "{:>profit_width$}  {:>price_width$}  {}",
                    yen(opportunity.profit),
                    yen(opportunity.listing.price),
                    truncate(&opportunity.listing.title, title_width)
                ));
            }

            lines.push(String::new());
            lines.push(format!("Total: {} candidates", report.opportunities.len()));
        }

        match &report.alert {
            Alert::Triggered { best, threshold } => {
                lines.push(String::new());
                lines.push(format!(
                    "*** PROFIT ALERT: {} (threshold {}) ***",
                    yen(best.profit),
                    yen(*threshold)
                ));
                lines.push(format!("{}  {}", yen(best.listing.price), best.listing.title));
                lines.push(best.listing.url.clone());
            }
            Alert::Below { best_profit, threshold, shortfall } => {
                lines.push(format!(
                    "Best profit: {} ({} short of {})",
                    yen(*best_profit),
                    yen(*shortfall),
                    yen(*threshold)
                ));
            }
            Alert::NoCandidates => {}
        }

        if !report.links.is_empty() {
            lines.push(String::new());
            lines.push("Search elsewhere:".to_string());
            for link in &report.links {
                lines.push(format!("  {:<12} {}", link.marketplace.name(), link.url));
            }
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_market_lines(report: &MarketReport) -> Vec<String> {
        vec![
            format!("## {}", report.keyword),
            String::new(),
            format!(
                "- **Market price:** {}",
                price_line(report.sold_price, &report.sold_source)
            ),
            format!(
                "- **Retail price:** {}",
                price_line(report.retail_price, &report.retail_source)
            ),
        ]
    }

    fn markdown_market(&self, report: &MarketReport) -> String {
        Self::markdown_market_lines(report).join("\n")
    }

    fn markdown_scan(&self, report: &ScanReport) -> String {
        let mut lines = Self::markdown_market_lines(&report.market);
        lines.push(format!("- **Shipping:** {}", yen(report.shipping_cost)));
        lines.push(String::new());

        if report.halted.is_some() {
            lines.push("> No market price available, active listings were not scanned.".to_string());
        } else if report.opportunities.is_empty() {
            lines.push("*No active listings to score*".to_string());
        } else {
            lines.push("| # | Profit | Price | Title | Image |".to_string());
            lines.push("|---|--------|-------|-------|-------|".to_string());

            for (i, opportunity) in report.opportunities.iter().enumerate() {
                let image = opportunity
                    .listing
                    .image_url
                    .as_ref()
                    .map(|url| format!("![]({})", url))
                    .unwrap_or_default();

                lines.push(format!(
                    "| {} | {} | {} | [{}]({}) | {} |",
                    i + 1,
                    yen(opportunity.profit),
                    yen(opportunity.listing.price),
                    truncate(&opportunity.listing.title, 40).replace('|', "\\|"),
                    opportunity.listing.url,
                    image
                ));
            }
        }

        match &report.alert {
            Alert::Triggered { best, .. } => {
                lines.push(String::new());
                lines.push(format!(
                    "> **Profit alert:** {} on [{}]({})",
                    yen(best.profit),
                    best.listing.title,
                    best.listing.url
                ));
            }
            Alert::Below { best_profit, shortfall, .. } => {
                lines.push(String::new());
                lines.push(format!(
                    "*Best profit {}, {} below threshold*",
                    yen(*best_profit),
                    yen(*shortfall)
                ));
            }
            Alert::NoCandidates => {}
        }

        if !report.links.is_empty() {
            lines.push(String::new());
            for link in &report.links {
                lines.push(format!("- [{}]({})", link.marketplace.name(), link.url));
            }
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_scan(&self, report: &ScanReport) -> String {
        let mut lines = vec!["rank,profit,price,title,url,image_url".to_string()];

        for (i, opportunity) in report.opportunities.iter().enumerate() {
            lines.push(format!(
                "{},{},{},{},{},{}",
                i + 1,
                opportunity.profit,
                opportunity.listing.price,
                Self::csv_escape(&opportunity.listing.title),
                opportunity.listing.url,
                opportunity.listing.image_url.as_deref().unwrap_or_default()
            ));
        }

        lines.join("\n")
    }

    fn csv_market(&self, report: &MarketReport) -> String {
        let mut lines = vec!["feed,method,price,sample_size,status".to_string()];

        for (feed, price, source) in [
            ("sold", report.sold_price, &report.sold_source),
            ("retail", report.retail_price, &report.retail_source),
        ] {
            let method = price.map(|p| method_label(p.method)).unwrap_or_default();
            let value = price.map(|p| p.value.to_string()).unwrap_or_default();
            let samples = price.map(|p| p.sample_size.to_string()).unwrap_or_default();
            lines.push(format!(
                "{},{},{},{},{}",
                feed,
                method,
                value,
                samples,
                Self::csv_escape(&source.summary())
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Formats an amount in yen with thousands separators, e.g. `-1,200円`.
pub fn yen(amount: impl Into<i128>) -> String {
    let amount = amount.into();
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-{}円", grouped)
    } else {
        format!("{}円", grouped)
    }
}

/// Cuts a title to `max` characters, never splitting a character.
fn truncate(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        let kept: String = title.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        title.to_string()
    }
}

fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::Text => "text",
        Origin::Barcode => "barcode",
    }
}

fn method_label(method: Method) -> &'static str {
    match method {
        Method::Mean => "mean",
        Method::Min => "lowest",
    }
}

fn price_line(price: Option<MarketPrice>, source: &SourceOutcome) -> String {
    match (price, source) {
        (Some(p), _) => {
            format!("{} ({} of {} listings)", yen(p.value), method_label(p.method), p.sample_size)
        }
        (None, SourceOutcome::Listings(n)) => format!("N/A (all {} listings filtered out)", n),
        (None, source) => format!("N/A ({})", source.summary()),
    }
}
