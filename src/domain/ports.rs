use crate::domain::model::{Listing, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url_template(&self) -> &str;
    fn page_count(&self) -> u32;
    fn headless(&self) -> bool;
    fn output_path(&self) -> &str;
    fn webdriver_url(&self) -> &str;
    fn settle_delay(&self) -> Duration;
    fn element_timeout(&self) -> Duration;
}

/// One listing block on a directory page.
#[async_trait]
pub trait ListingBlock: Send + Sync {
    /// Visible text and target URL of the block's first anchor.
    async fn title_link(&self) -> Result<(String, String)>;

    /// Rating text, waiting up to `timeout` for the rating element to become visible.
    async fn rating_text(&self, timeout: Duration) -> Result<String>;

    /// Raw area/genre text, waiting up to `timeout` for the element to become visible.
    async fn area_genre_text(&self, timeout: Duration) -> Result<String>;
}

/// A live browser session. Used strictly sequentially; `close` must be
/// invoked exactly once per acquired session.
#[async_trait]
pub trait Session: Send + Sync {
    type Block: ListingBlock;

    async fn goto(&self, url: &str) -> Result<()>;
    async fn listing_blocks(&self) -> Result<Vec<Self::Block>>;
    async fn close(&self) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Listing>>;
    async fn transform(&self, listings: Vec<Listing>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;

    /// Release held resources. The engine calls this on every exit path.
    async fn close(&self) -> Result<()>;
}
