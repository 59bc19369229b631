//! Wire types for the image search endpoint.
//!
//! Only the fields this tool consumes are modeled; everything else in the
//! response is ignored by serde.

use serde::Deserialize;

/// Top-level search endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Result items in API order.
    pub results: Vec<ImageHit>,
}

/// One image search hit with display and download URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageHit {
    /// Identifier, unique within a page (duplicates may occur across pages).
    pub id: String,
    /// Image variant URLs.
    pub urls: ImageUrls,
    /// Accessible text description; absent or null for some images.
    pub alt_description: Option<String>,
}

/// Image variant URLs from a search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageUrls {
    /// Thumbnail-sized variant, used for display.
    pub small: String,
    /// Full-resolution variant, used for downloads.
    pub full: String,
}

impl ImageHit {
    /// Description text for display, empty when the API provided none.
    #[must_use]
    pub fn description(&self) -> &str {
        self.alt_description.as_deref().unwrap_or("")
    }
}
