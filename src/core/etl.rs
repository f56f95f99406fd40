use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Run the full scrape. The pipeline is closed on every exit path; a
    /// stage error takes precedence over a close error.
    pub async fn run(&self) -> Result<String> {
        let outcome = self.run_stages().await;

        // 不論成敗都要釋放瀏覽器 session
        let close_outcome = self.pipeline.close().await;

        let output_path = outcome?;
        close_outcome?;
        Ok(output_path)
    }

    async fn run_stages(&self) -> Result<String> {
        println!("Starting scrape...");

        println!("Harvesting listings...");
        let listings = self.pipeline.extract().await?;
        println!("Harvested {} listings", listings.len());

        println!("Ranking listings...");
        let result = self.pipeline.transform(listings).await?;
        println!("Ranked {} listings", result.ranked.len());

        println!("Writing output...");
        let output_path = self.pipeline.load(result).await?;
        println!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}
