use crate::core::{
    harvester, ConfigProvider, Listing, Pipeline, RankedListing, Session, Storage, TransformResult,
};
use crate::utils::error::{Result, ScrapeError};
use crate::utils::template::PageUrlTemplate;
use async_trait::async_trait;
use std::cmp::Ordering;

const OUTPUT_FILE: &str = "restaurants.csv";
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct ScrapePipeline<S: Session, St: Storage, C: ConfigProvider> {
    session: S,
    storage: St,
    config: C,
}

impl<S: Session, St: Storage, C: ConfigProvider> ScrapePipeline<S, St, C> {
    pub fn new(session: S, storage: St, config: C) -> Self {
        Self {
            session,
            storage,
            config,
        }
    }
}

/// Numeric coercion for the rendered rating text. Anything that does not
/// parse ("-", "", "N/A") becomes a missing value, never an error.
fn parse_rating(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Descending by rating; missing ratings sort last. `sort_by` is stable, so
/// ties and missing values keep their prior (page, in-page) relative order.
fn rank_listings(listings: Vec<Listing>) -> Vec<RankedListing> {
    let mut ranked: Vec<RankedListing> = listings
        .into_iter()
        .map(|listing| RankedListing {
            rating: parse_rating(&listing.rating),
            name: listing.name,
            area: listing.area,
            link: listing.link,
        })
        .collect();

    ranked.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    ranked
}

fn render_csv(ranked: &[RankedListing]) -> Result<String> {
    // 標頭自己寫，空結果也要有標頭列
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(["name", "rating", "area", "link"])?;
    for row in ranked {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ScrapeError::ProcessingError {
            message: format!("Failed to finish CSV buffer: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| ScrapeError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

#[async_trait]
impl<S: Session, St: Storage, C: ConfigProvider> Pipeline for ScrapePipeline<S, St, C> {
    async fn extract(&self) -> Result<Vec<Listing>> {
        // 啟動前已驗證過，這裡再解析一次取得樣板
        let template = PageUrlTemplate::parse(self.config.base_url_template())?;

        let report = harvester::harvest(
            &self.session,
            &template,
            self.config.page_count(),
            self.config.settle_delay(),
            self.config.element_timeout(),
        )
        .await?;

        if !report.skipped.is_empty() {
            tracing::info!("Skipped {} listings during harvest", report.skipped.len());
        }

        Ok(report.listings)
    }

    async fn transform(&self, listings: Vec<Listing>) -> Result<TransformResult> {
        let ranked = rank_listings(listings);
        let csv_output = render_csv(&ranked)?;

        Ok(TransformResult { ranked, csv_output })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), OUTPUT_FILE);

        // 前置 BOM，讓試算表軟體以 UTF-8 開啟
        let mut data = Vec::with_capacity(UTF8_BOM.len() + result.csv_output.len());
        data.extend_from_slice(UTF8_BOM);
        data.extend_from_slice(result.csv_output.as_bytes());

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(OUTPUT_FILE, &data).await?;

        Ok(output_path)
    }

    async fn close(&self) -> Result<()> {
        self.session.close().await
    }
}
