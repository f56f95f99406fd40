pub mod cli;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::template::PageUrlTemplate;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tabelog-scrape")]
#[command(about = "Scrape Tabelog restaurant listings into a rating-ranked CSV")]
pub struct CliConfig {
    /// Listing page URL template with a single {page} placeholder
    #[arg(long, default_value = "https://tabelog.com/tw/tokyo/rstLst/{page}/")]
    pub base_url_template: String,

    /// Number of listing pages to visit
    #[arg(long, default_value = "10")]
    pub page_count: u32,

    /// Run the browser without a visible window
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub headless: bool,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Address of a running WebDriver server (e.g. chromedriver)
    #[arg(long, default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Fixed delay after each navigation, for client-side rendering
    #[arg(long, default_value = "5")]
    pub settle_secs: u64,

    /// Per-element visibility wait timeout
    #[arg(long, default_value = "10")]
    pub wait_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url_template(&self) -> &str {
        &self.base_url_template
    }

    fn page_count(&self) -> u32 {
        self.page_count
    }

    fn headless(&self) -> bool {
        self.headless
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn webdriver_url(&self) -> &str {
        &self.webdriver_url
    }

    fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_secs)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("base_url_template", &self.base_url_template)?;
        // 樣板必須剛好有一個 {page} 佔位符
        let template = PageUrlTemplate::parse(&self.base_url_template)?;
        validate_url("base_url_template", &template.url_for(1))?;
        validate_positive_number("page_count", self.page_count as usize, 1)?;
        validate_path("output_path", &self.output_path)?;
        validate_url("webdriver_url", &self.webdriver_url)?;
        validate_range("settle_secs", self.settle_secs, 0, 60)?;
        validate_range("wait_secs", self.wait_secs, 1, 120)?;
        Ok(())
    }
}
