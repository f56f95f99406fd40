use crate::core::{ListingBlock, Session};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use std::time::Duration;
use thirtyfour::prelude::*;

// Tabelog 列表頁的結構標記
const LISTING_BLOCK_CLASS: &str = "list-rst";
const RATING_XPATH: &str = ".//span[contains(@class, 'c-rating__val')]";
const AREA_GENRE_CLASS: &str = "list-rst__area-genre";

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// A live Chrome session behind a WebDriver server.
pub struct WebSession {
    driver: WebDriver,
}

impl WebSession {
    /// Start a session. Fails fatally when the WebDriver server is not
    /// reachable or the browser cannot start.
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if headless {
            caps.set_headless()?;
        }

        let driver = WebDriver::new(webdriver_url, caps).await?;
        Ok(Self { driver })
    }
}

#[async_trait]
impl Session for WebSession {
    type Block = WebBlock;

    async fn goto(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn listing_blocks(&self) -> Result<Vec<WebBlock>> {
        let elements = self.driver.find_all(By::ClassName(LISTING_BLOCK_CLASS)).await?;
        Ok(elements.into_iter().map(|element| WebBlock { element }).collect())
    }

    async fn close(&self) -> Result<()> {
        self.driver.clone().quit().await?;
        Ok(())
    }
}

/// One `list-rst` element on the page.
pub struct WebBlock {
    element: WebElement,
}

impl WebBlock {
    async fn visible_text(&self, by: By, timeout: Duration) -> Result<String> {
        let found = self
            .element
            .query(by)
            .wait(timeout, POLL_INTERVAL)
            .and_displayed()
            .first()
            .await?;
        Ok(found.text().await?)
    }
}

#[async_trait]
impl ListingBlock for WebBlock {
    async fn title_link(&self) -> Result<(String, String)> {
        let anchor = self.element.find(By::Tag("a")).await?;
        let name = anchor.text().await?;
        let link = anchor
            .attr("href")
            .await?
            .ok_or_else(|| ScrapeError::ProcessingError {
                message: "Listing anchor has no href attribute".to_string(),
            })?;
        Ok((name, link))
    }

    async fn rating_text(&self, timeout: Duration) -> Result<String> {
        self.visible_text(By::XPath(RATING_XPATH), timeout).await
    }

    async fn area_genre_text(&self, timeout: Duration) -> Result<String> {
        self.visible_text(By::ClassName(AREA_GENRE_CLASS), timeout)
            .await
    }
}
