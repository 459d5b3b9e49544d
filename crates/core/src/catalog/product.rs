//! Product documents as supplied by the catalog store.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::skin_type::{self, SkinType};
use crate::types::{Price, ProductId, ProductStatus};

/// A catalog product.
///
/// Read-only from the engines' point of view. Field names follow the
/// document store's camelCase JSON. `skinTypes` may be stored either as a
/// comma-separated string or as a list; it is normalized to canonical tags
/// on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default, deserialize_with = "skin_type::deserialize_canonical")]
    pub skin_types: BTreeSet<SkinType>,
    pub price: Price,
    /// Average review rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub best_seller: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether shoppers can see this product at all.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.status.is_visible()
    }
}
