use crate::core::{HarvestReport, Listing, ListingBlock, Session};
use crate::utils::error::Result;
use crate::utils::template::PageUrlTemplate;
use std::time::Duration;

/// Walk listing pages in order and extract every listing block.
///
/// Stops early at the first page with zero blocks (the directory's natural
/// end-of-results condition). A failure inside a single listing skips that
/// listing only; navigation failures propagate.
pub async fn harvest<S: Session>(
    session: &S,
    template: &PageUrlTemplate,
    page_count: u32,
    settle: Duration,
    timeout: Duration,
) -> Result<HarvestReport> {
    let mut report = HarvestReport::default();

    for page in 1..=page_count {
        let url = template.url_for(page);
        tracing::debug!("Loading page {}: {}", page, url);
        session.goto(&url).await?;

        // 等待前端渲染完成
        tokio::time::sleep(settle).await;

        let blocks = session.listing_blocks().await?;
        if blocks.is_empty() {
            tracing::info!("No listings on page {}, stopping", page);
            break;
        }

        tracing::debug!("Found {} listing blocks on page {}", blocks.len(), page);

        for (index, block) in blocks.iter().enumerate() {
            match extract_listing(block, timeout).await {
                Ok(listing) => report.listings.push(listing),
                Err(e) => {
                    let cause = format!("page {} listing {}: {}", page, index + 1, e);
                    tracing::warn!("Failed to extract listing ({})", cause);
                    report.skipped.push(cause);
                }
            }
        }
    }

    Ok(report)
}

/// All-or-nothing extraction of one listing block. Field order matters: a
/// failure partway through discards everything read so far.
async fn extract_listing<B: ListingBlock>(block: &B, timeout: Duration) -> Result<Listing> {
    let (name, link) = block.title_link().await?;
    let rating = block.rating_text(timeout).await?;
    let area_genre = block.area_genre_text(timeout).await?;

    // 只取 " / " 之前的地點，後面的類別清單捨棄
    let area = area_genre
        .split(" / ")
        .next()
        .unwrap_or(&area_genre)
        .trim()
        .to_string();

    Ok(Listing {
        name,
        rating,
        area,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ScrapeError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct FakeBlock {
        name: String,
        link: String,
        rating: Option<String>,
        area_genre: String,
    }

    impl FakeBlock {
        fn new(name: &str, link: &str, rating: &str, area_genre: &str) -> Self {
            Self {
                name: name.to_string(),
                link: link.to_string(),
                rating: Some(rating.to_string()),
                area_genre: area_genre.to_string(),
            }
        }

        fn with_rating_timeout(name: &str, link: &str, area_genre: &str) -> Self {
            Self {
                name: name.to_string(),
                link: link.to_string(),
                rating: None,
                area_genre: area_genre.to_string(),
            }
        }
    }

    #[async_trait]
    impl ListingBlock for FakeBlock {
        async fn title_link(&self) -> Result<(String, String)> {
            Ok((self.name.clone(), self.link.clone()))
        }

        async fn rating_text(&self, _timeout: Duration) -> Result<String> {
            self.rating
                .clone()
                .ok_or_else(|| ScrapeError::ProcessingError {
                    message: "Timed out waiting for rating element".to_string(),
                })
        }

        async fn area_genre_text(&self, _timeout: Duration) -> Result<String> {
            Ok(self.area_genre.clone())
        }
    }

    struct FakeSession {
        pages: Vec<Vec<FakeBlock>>,
        visited: Arc<Mutex<Vec<String>>>,
        current: AtomicUsize,
    }

    impl FakeSession {
        fn new(pages: Vec<Vec<FakeBlock>>) -> Self {
            Self {
                pages,
                visited: Arc::new(Mutex::new(Vec::new())),
                current: AtomicUsize::new(0),
            }
        }

        fn visited_urls(&self) -> Vec<String> {
            self.visited.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Session for FakeSession {
        type Block = FakeBlock;

        async fn goto(&self, url: &str) -> Result<()> {
            let mut visited = self.visited.lock().unwrap();
            self.current.store(visited.len(), Ordering::SeqCst);
            visited.push(url.to_string());
            Ok(())
        }

        async fn listing_blocks(&self) -> Result<Vec<FakeBlock>> {
            let index = self.current.load(Ordering::SeqCst);
            Ok(self.pages.get(index).cloned().unwrap_or_default())
        }

        async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    fn template() -> PageUrlTemplate {
        PageUrlTemplate::parse("https://example.com/list/{page}/").unwrap()
    }

    #[tokio::test]
    async fn test_harvest_collects_all_listings_in_page_order() {
        let session = FakeSession::new(vec![
            vec![
                FakeBlock::new("A", "u1", "4.10", "X / cat1"),
                FakeBlock::new("B", "u2", "3.20", "Y / cat2"),
            ],
            vec![FakeBlock::new("C", "u3", "3.80", "Z / cat3")],
        ]);

        let report = harvest(&session, &template(), 2, Duration::ZERO, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(report.listings.len(), 3);
        assert_eq!(report.listings[0].name, "A");
        assert_eq!(report.listings[1].name, "B");
        assert_eq!(report.listings[2].name, "C");
        assert!(report.skipped.is_empty());
    }

    #[tokio::test]
    async fn test_harvest_stops_at_first_empty_page() {
        let session = FakeSession::new(vec![
            vec![FakeBlock::new("A", "u1", "4.10", "X / cat1")],
            vec![],
            vec![FakeBlock::new("Ghost", "u9", "5.00", "W / cat9")],
        ]);

        let report = harvest(&session, &template(), 5, Duration::ZERO, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(report.listings.len(), 1);
        // 第二頁是空的，之後的頁面不應再被造訪
        assert_eq!(
            session.visited_urls(),
            vec![
                "https://example.com/list/1/".to_string(),
                "https://example.com/list/2/".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_harvest_skips_listing_on_rating_timeout() {
        let session = FakeSession::new(vec![vec![
            FakeBlock::new("A", "u1", "4.10", "X / cat1"),
            FakeBlock::with_rating_timeout("B", "u2", "Y / cat2"),
            FakeBlock::new("C", "u3", "3.20", "Z / cat3"),
        ]]);

        let report = harvest(&session, &template(), 1, Duration::ZERO, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(report.listings.len(), 2);
        assert_eq!(report.listings[0].name, "A");
        assert_eq!(report.listings[1].name, "C");
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].contains("listing 2"));
    }

    #[tokio::test]
    async fn test_area_keeps_only_text_before_separator() {
        let session = FakeSession::new(vec![vec![FakeBlock::new(
            "燒肉店",
            "u1",
            "3.60",
            "銀座一丁目車站 / 燒肉, 烤內臟, 創新",
        )]]);

        let report = harvest(&session, &template(), 1, Duration::ZERO, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(report.listings[0].area, "銀座一丁目車站");
    }

    #[tokio::test]
    async fn test_area_without_separator_is_kept_whole() {
        let session = FakeSession::new(vec![vec![FakeBlock::new("A", "u1", "3.60", " 新宿 ")]]);

        let report = harvest(&session, &template(), 1, Duration::ZERO, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(report.listings[0].area, "新宿");
    }
}
