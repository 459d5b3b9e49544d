//! Status enums for catalog entities.

use serde::{Deserialize, Serialize};

/// Publication status of a product document.
///
/// Only `Published` products are ever shown to shoppers. Drafts are being
/// authored in the admin surface; archived products are kept for order
/// history but no longer sold. Any other stored status loads as `Unknown`
/// and is treated like a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Published,
    Archived,
    #[serde(other)]
    Unknown,
}

impl ProductStatus {
    /// Whether products with this status are visible in the storefront.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Published)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Published => write!(f, "published"),
            Self::Archived => write!(f, "archived"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}
