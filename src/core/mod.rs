pub mod etl;
pub mod harvester;
pub mod pipeline;
pub mod session;

pub use crate::domain::model::{HarvestReport, Listing, RankedListing, TransformResult};
pub use crate::domain::ports::{ConfigProvider, ListingBlock, Pipeline, Session, Storage};
pub use crate::utils::error::Result;
