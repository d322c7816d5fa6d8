//! Product record shared between the origin store and the cache.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Publication state of a product in the origin store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Published,
    Sold,
    Archived,
}

impl ProductStatus {
    /// Estados visibles en el listado publico.
    pub const PUBLICLY_VISIBLE: [ProductStatus; 2] = [ProductStatus::Published, ProductStatus::Sold];

    /// Returns the lowercase wire form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Sold => "sold",
            Self::Archived => "archived",
        }
    }

    /// True when the product appears in the public listing.
    pub fn is_publicly_visible(&self) -> bool {
        matches!(self, Self::Published | Self::Sold)
    }
}

/// A catalog record as the origin store serves it.
///
/// The JSON serialization of this struct is what gets stored in the cache,
/// so the field names are a wire contract shared with previously cached
/// payloads. Renaming a field silently invalidates every live entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub title_en: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    pub price: f64,
    pub image_url: String,
    pub status: ProductStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
