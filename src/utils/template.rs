use crate::utils::error::{Result, ScrapeError};

pub const PAGE_PLACEHOLDER: &str = "{page}";

/// 分頁 URL 樣板，例如 `https://tabelog.com/tw/tokyo/rstLst/{page}/`
#[derive(Debug, Clone)]
pub struct PageUrlTemplate {
    template: String,
}

impl PageUrlTemplate {
    /// The template must contain exactly one `{page}` placeholder.
    pub fn parse(template: &str) -> Result<Self> {
        match template.matches(PAGE_PLACEHOLDER).count() {
            0 => Err(ScrapeError::InvalidConfigValueError {
                field: "base_url_template".to_string(),
                value: template.to_string(),
                reason: format!("Template must contain a {} placeholder", PAGE_PLACEHOLDER),
            }),
            1 => Ok(Self {
                template: template.to_string(),
            }),
            n => Err(ScrapeError::InvalidConfigValueError {
                field: "base_url_template".to_string(),
                value: template.to_string(),
                reason: format!("Template contains {} {} placeholders, expected exactly one", n, PAGE_PLACEHOLDER),
            }),
        }
    }

    pub fn url_for(&self, page: u32) -> String {
        self.template.replace(PAGE_PLACEHOLDER, &page.to_string())
    }
}
