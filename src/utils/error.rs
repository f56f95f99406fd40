use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("WebDriver error: {0}")]
    WebDriverError(#[from] thirtyfour::error::WebDriverError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
