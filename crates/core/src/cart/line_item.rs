//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::types::{IdError, Price, ProductId, VariantKey};

/// Identity of a line item: one product in one variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: ProductId,
    pub variant_key: Option<VariantKey>,
}

impl LineKey {
    /// Parse a key from raw caller input.
    ///
    /// # Errors
    ///
    /// Returns an error if `product_id` is blank or either part is too long.
    pub fn parse(product_id: &str, variant_key: Option<&str>) -> Result<Self, IdError> {
        Ok(Self {
            product_id: ProductId::parse(product_id)?,
            variant_key: VariantKey::parse_optional(variant_key)?,
        })
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.variant_key {
            Some(variant) => write!(f, "{}/{variant}", self.product_id),
            None => write!(f, "{}", self.product_id),
        }
    }
}

/// One distinct purchasable selection in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub(crate) key: LineKey,
    pub(crate) unit_price: Price,
    pub(crate) quantity: u32,
}

impl LineItem {
    /// The product/variant pair this line represents.
    #[must_use]
    pub const fn key(&self) -> &LineKey {
        &self.key
    }

    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.key.product_id
    }

    #[must_use]
    pub const fn variant_key(&self) -> Option<&VariantKey> {
        self.key.variant_key.as_ref()
    }

    /// Price per unit, captured when the line was first added.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        self.unit_price
    }

    /// Always at least one.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}
