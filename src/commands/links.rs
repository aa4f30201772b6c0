//! Links command: outbound search URLs for marketplaces that are not scraped.

use crate::config::Config;
use crate::format::Formatter;
use crate::input::Keyword;
use crate::report::MarketLink;

/// Prints search links without fetching anything.
pub struct LinksCommand {
    config: Config,
}

impl LinksCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn execute(&self, keyword: &Keyword) -> String {
        let links = MarketLink::for_keyword(keyword.as_str());
        Formatter::new(self.config.format).format_links(keyword, &links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_links_command_json() {
        let config = Config { format: OutputFormat::Json, ..Config::default() };
        let keyword = Keyword::from_barcode("4902370548495").unwrap();

        let output = LinksCommand::new(config).execute(&keyword);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["keyword"]["origin"], "barcode");
        assert_eq!(value["links"].as_array().unwrap().len(), 2);
        assert!(value["links"][0]["url"].as_str().unwrap().contains("4902370548495"));
    }
}
