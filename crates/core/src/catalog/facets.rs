//! Facet counts for the filter sidebar.

use std::collections::BTreeMap;

use serde::Serialize;

use super::product::Product;
use crate::skin_type::SkinType;
use crate::types::PriceRange;

/// What the published catalog actually contains, per filter dimension.
///
/// The sidebar offers only values with a non-zero count, so shoppers are not
/// invited to pick a brand that would empty the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub brands: BTreeMap<String, usize>,
    pub categories: BTreeMap<String, usize>,
    pub skin_types: BTreeMap<SkinType, usize>,
    /// Cheapest and most expensive published price, if any product is
    /// published.
    pub price_bounds: Option<PriceRange>,
}

/// Count published products per brand, category and canonical skin type.
#[must_use]
pub fn facets(products: &[Product]) -> Facets {
    products
        .iter()
        .filter(|p| p.is_published())
        .fold(Facets::default(), |mut facets, product| {
            *facets.brands.entry(product.brand.clone()).or_default() += 1;
            *facets
                .categories
                .entry(product.category.clone())
                .or_default() += 1;
            for skin_type in &product.skin_types {
                *facets.skin_types.entry(*skin_type).or_default() += 1;
            }
            facets.price_bounds = Some(match facets.price_bounds {
                None => PriceRange::new(product.price, product.price),
                Some(bounds) => PriceRange::new(
                    bounds.min().min(product.price),
                    bounds.max().max(product.price),
                ),
            });
            facets
        })
}
