use serde::{Deserialize, Serialize};

/// One listing as read off the page, rating still in its rendered text form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub rating: String,
    pub area: String,
    pub link: String,
}

/// One output row. A rating that failed numeric coercion is `None` and
/// serializes as an empty CSV field.
#[derive(Debug, Clone, Serialize)]
pub struct RankedListing {
    pub name: String,
    pub rating: Option<f64>,
    pub area: String,
    pub link: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub ranked: Vec<RankedListing>,
    pub csv_output: String,
}

/// Harvest outcome: surviving listings plus the causes of every skipped one.
#[derive(Debug, Clone, Default)]
pub struct HarvestReport {
    pub listings: Vec<Listing>,
    pub skipped: Vec<String>,
}
