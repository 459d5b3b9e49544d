//! Catalog filtering and sorting.
//!
//! The engine is pure derivation over a product snapshot supplied by the
//! caller:
//!
//! - [`FilterCriteria`] holds the shopper's active filters and sort key and
//!   is mutated through [`FilterCriteria::apply_filter`],
//!   [`FilterCriteria::remove_filter`] and [`FilterCriteria::clear_all`].
//! - [`derive_chips`] renders the criteria as removable [`FilterChip`]s.
//! - [`apply`] filters and sorts a product slice; [`best_sellers`] and
//!   [`featured`] are the curated homepage lists built on top of it.
//! - [`facets`] counts what the published catalog contains, for the sidebar.
//!
//! Nothing is cached. Every call recomputes from the slice it is given, so a
//! stale snapshot simply produces a stale (but consistent) result.

mod chips;
mod criteria;
mod facets;
mod product;
mod query;

pub use chips::{FilterChip, derive_chips};
pub use criteria::{Filter, FilterCriteria, FilterDimension, SortKey};
pub use facets::{Facets, facets};
pub use product::Product;
pub use query::{
    CURATED_LIST_LIMIT, apply, best_sellers, best_sellers_limited, featured, featured_limited,
};
