//! Filtering, sorting and curated product lists.

use super::criteria::{FilterCriteria, SortKey};
use super::product::Product;

/// Maximum number of products in a curated homepage list.
///
/// This is a display policy only. Callers that need more products should
/// request a dedicated collection page.
pub const CURATED_LIST_LIMIT: usize = 8;

/// Filter `products` by `criteria`, then sort by its sort key.
///
/// Sorting is stable, so products that compare equal keep their catalog
/// order and repeated calls return the same sequence.
#[must_use]
pub fn apply<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let mut matched: Vec<&Product> = products.iter().filter(|p| criteria.matches(p)).collect();
    sort_products(&mut matched, criteria.sort());
    tracing::trace!(
        total = products.len(),
        matched = matched.len(),
        sort = %criteria.sort(),
        "Applied catalog filters"
    );
    matched
}

fn sort_products(products: &mut [&Product], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::RatingDesc => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::PriceAsc => products.sort_by_key(|p| p.price),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}

/// Published best-sellers, highest rated first, capped at
/// [`CURATED_LIST_LIMIT`].
#[must_use]
pub fn best_sellers(products: &[Product]) -> Vec<&Product> {
    best_sellers_limited(products, CURATED_LIST_LIMIT)
}

/// [`best_sellers`] with an explicit cap.
#[must_use]
pub fn best_sellers_limited(products: &[Product], limit: usize) -> Vec<&Product> {
    apply(products, &FilterCriteria::sorted_by(SortKey::RatingDesc))
        .into_iter()
        .filter(|p| p.best_seller)
        .take(limit)
        .collect()
}

/// Published featured products in catalog order, capped at
/// [`CURATED_LIST_LIMIT`].
#[must_use]
pub fn featured(products: &[Product]) -> Vec<&Product> {
    featured_limited(products, CURATED_LIST_LIMIT)
}

/// [`featured`] with an explicit cap.
#[must_use]
pub fn featured_limited(products: &[Product], limit: usize) -> Vec<&Product> {
    apply(products, &FilterCriteria::new())
        .into_iter()
        .filter(|p| p.featured)
        .take(limit)
        .collect()
}
