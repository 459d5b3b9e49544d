//! Filter and sort criteria.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::chips::{FilterChip, derive_chips};
use super::product::Product;
use crate::skin_type::{self, SkinType};
use crate::types::{Price, PriceRange};

/// Product ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum SortKey {
    /// Catalog order, untouched.
    #[default]
    Relevance,
    RatingDesc,
    PriceAsc,
    PriceDesc,
    /// Most recently created first.
    Newest,
}

impl SortKey {
    pub const ALL: [Self; 5] = [
        Self::Relevance,
        Self::RatingDesc,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Newest,
    ];

    /// The kebab-case name used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::RatingDesc => "rating-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "newest",
        }
    }

    /// Label for the sort dropdown and the sort chip.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::RatingDesc => "Top Rated",
            Self::PriceAsc => "Price: Low to High",
            Self::PriceDesc => "Price: High to Low",
            Self::Newest => "Newest",
        }
    }

    /// Parse a sort name. Unknown names fall back to [`SortKey::Relevance`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_default()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SortKey {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<SortKey> for &'static str {
    fn from(key: SortKey) -> Self {
        key.as_str()
    }
}

/// The dimensions a shopper can narrow or order the catalog by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterDimension {
    Brand,
    Category,
    SkinType,
    Price,
    Sort,
}

impl FilterDimension {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Category => "category",
            Self::SkinType => "skinType",
            Self::Price => "price",
            Self::Sort => "sort",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One constraint value in one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "value", rename_all = "camelCase")]
pub enum Filter {
    Brand(String),
    Category(String),
    /// A skin-type tag; normalized when applied.
    SkinType(String),
    Price(PriceRange),
    Sort(SortKey),
}

impl Filter {
    #[must_use]
    pub const fn dimension(&self) -> FilterDimension {
        match self {
            Self::Brand(_) => FilterDimension::Brand,
            Self::Category(_) => FilterDimension::Category,
            Self::SkinType(_) => FilterDimension::SkinType,
            Self::Price(_) => FilterDimension::Price,
            Self::Sort(_) => FilterDimension::Sort,
        }
    }

    /// Build a filter from raw UI input such as a query-string pair.
    ///
    /// Price values are written `min-max` (e.g. `10-25.50`). Sort values use
    /// the kebab-case names; an unknown sort name means relevance. Returns
    /// `None` for a price that cannot be read.
    #[must_use]
    pub fn parse(dimension: FilterDimension, value: &str) -> Option<Self> {
        let value = value.trim();
        Some(match dimension {
            FilterDimension::Brand => Self::Brand(value.to_owned()),
            FilterDimension::Category => Self::Category(value.to_owned()),
            FilterDimension::SkinType => Self::SkinType(value.to_owned()),
            FilterDimension::Price => Self::Price(parse_price_range(value)?),
            FilterDimension::Sort => Self::Sort(SortKey::from_name(value)),
        })
    }
}

fn parse_price_range(value: &str) -> Option<PriceRange> {
    let (min, max) = value.split_once('-')?;
    let bound = |s: &str| {
        s.trim()
            .trim_start_matches('$')
            .parse::<Decimal>()
            .ok()
            .and_then(|amount| Price::new(amount).ok())
    };
    Some(PriceRange::new(bound(min)?, bound(max)?))
}

/// The shopper's current narrowing and ordering intent.
///
/// Values within one dimension are OR-combined; populated dimensions are
/// AND-combined; an empty dimension imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    brands: BTreeSet<String>,
    categories: BTreeSet<String>,
    skin_types: BTreeSet<String>,
    price_range: Option<PriceRange>,
    sort: SortKey,
}

impl FilterCriteria {
    /// No filters, relevance order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// No filters, ordered by `sort`.
    #[must_use]
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn brands(&self) -> &BTreeSet<String> {
        &self.brands
    }

    #[must_use]
    pub const fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Normalized skin-type tags. May contain tags outside the canonical set,
    /// which simply match nothing.
    #[must_use]
    pub const fn skin_types(&self) -> &BTreeSet<String> {
        &self.skin_types
    }

    #[must_use]
    pub const fn price_range(&self) -> Option<PriceRange> {
        self.price_range
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    /// Whether any filter or a non-default sort is active.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Add a value to a set dimension, or set the price range or sort.
    ///
    /// Applying a value that is already present is a no-op, as is a blank
    /// value. Returns whether the criteria changed.
    pub fn apply_filter(&mut self, filter: Filter) -> bool {
        let changed = match filter {
            Filter::Brand(brand) => insert_trimmed(&mut self.brands, &brand),
            Filter::Category(category) => insert_trimmed(&mut self.categories, &category),
            Filter::SkinType(tags) => skin_type::normalize(tags.as_str())
                .into_iter()
                .fold(false, |changed, tag| self.skin_types.insert(tag) | changed),
            Filter::Price(range) => self.price_range.replace(range) != Some(range),
            Filter::Sort(sort) => std::mem::replace(&mut self.sort, sort) != sort,
        };
        if changed {
            tracing::debug!(criteria = ?self, "Filter applied");
        }
        changed
    }

    /// Remove the constraint a chip represents.
    ///
    /// Price and sort chips reset their dimension to the unconstrained
    /// default. Removing a chip whose value is already gone is a no-op.
    /// Returns whether the criteria changed.
    pub fn remove_filter(&mut self, chip: &FilterChip) -> bool {
        self.remove(chip.filter())
    }

    /// Remove a constraint value. See [`FilterCriteria::remove_filter`].
    pub fn remove(&mut self, filter: &Filter) -> bool {
        match filter {
            Filter::Brand(brand) => self.brands.remove(brand.trim()),
            Filter::Category(category) => self.categories.remove(category.trim()),
            Filter::SkinType(tags) => skin_type::normalize(tags.as_str())
                .iter()
                .fold(false, |changed, tag| self.skin_types.remove(tag) | changed),
            Filter::Price(_) => self.price_range.take().is_some(),
            Filter::Sort(_) => std::mem::take(&mut self.sort) != SortKey::Relevance,
        }
    }

    /// Reset to no filters and relevance order.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Active filter chips. See [`derive_chips`].
    pub fn chips(&self) -> impl Iterator<Item = FilterChip> + Clone + '_ {
        derive_chips(self)
    }

    /// Whether a product passes every populated dimension. Unpublished
    /// products never pass.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        product.is_published()
            && (self.brands.is_empty() || self.brands.contains(&product.brand))
            && (self.categories.is_empty() || self.categories.contains(&product.category))
            && (self.skin_types.is_empty()
                || self
                    .skin_types
                    .iter()
                    .filter_map(|tag| SkinType::parse(tag))
                    .any(|tag| product.skin_types.contains(&tag)))
            && self
                .price_range
                .is_none_or(|range| range.contains(product.price))
    }
}

fn insert_trimmed(set: &mut BTreeSet<String>, value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && set.insert(value.to_owned())
}
