pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{etl::ScrapeEngine, pipeline::ScrapePipeline, session::WebSession};
pub use utils::error::{Result, ScrapeError};
