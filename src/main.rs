use clap::Parser;
use tabelog_scrape::utils::{logger, validation::Validate};
use tabelog_scrape::{CliConfig, LocalStorage, ScrapeEngine, ScrapePipeline, WebSession};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting tabelog-scrape");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 瀏覽器啟動失敗視為致命錯誤
    let session = match WebSession::connect(&config.webdriver_url, config.headless).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to start browser session: {}", e);
            eprintln!("❌ Failed to start browser session: {}", e);
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ScrapePipeline::new(session, storage, config);
    let engine = ScrapeEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("Scrape completed successfully");
            println!("✅ Scrape completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}
