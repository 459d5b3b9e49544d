//! Removable filter chips.
//!
//! Chips are a display-only view of [`FilterCriteria`]. Removing one goes
//! back through [`FilterCriteria::remove_filter`], so the criteria stay the
//! single source of truth.

use serde::Serialize;

use super::criteria::{Filter, FilterCriteria, FilterDimension, SortKey};
use crate::skin_type::SkinType;

/// One active constraint, ready to render as a removable pill.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FilterChip {
    #[serde(flatten)]
    filter: Filter,
    label: String,
}

impl FilterChip {
    fn new(filter: Filter) -> Self {
        let label = match &filter {
            Filter::Brand(value) | Filter::Category(value) => value.clone(),
            Filter::SkinType(tag) => {
                SkinType::parse(tag).map_or_else(|| tag.clone(), |t| t.label().to_owned())
            }
            Filter::Price(range) => range.to_string(),
            Filter::Sort(key) => format!("Sort: {}", key.label()),
        };
        Self { filter, label }
    }

    /// The dimension this chip belongs to.
    #[must_use]
    pub const fn dimension(&self) -> FilterDimension {
        self.filter.dimension()
    }

    /// The constraint value this chip stands for.
    #[must_use]
    pub const fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Human-readable text for the pill.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// One chip per active value, in the fixed order brand, category, skin type,
/// price, sort.
///
/// The sequence is lazy and borrows `criteria`; clone the iterator to walk it
/// again. Relevance order is the default and never produces a sort chip.
pub fn derive_chips(criteria: &FilterCriteria) -> impl Iterator<Item = FilterChip> + Clone + '_ {
    let brands = criteria
        .brands()
        .iter()
        .map(|brand| Filter::Brand(brand.clone()));
    let categories = criteria
        .categories()
        .iter()
        .map(|category| Filter::Category(category.clone()));
    let skin_types = criteria
        .skin_types()
        .iter()
        .map(|tag| Filter::SkinType(tag.clone()));
    let price = criteria.price_range().into_iter().map(Filter::Price);
    let sort = Some(criteria.sort())
        .filter(|key| *key != SortKey::Relevance)
        .into_iter()
        .map(Filter::Sort);

    brands
        .chain(categories)
        .chain(skin_types)
        .chain(price)
        .chain(sort)
        .map(FilterChip::new)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{Price, PriceRange};

    fn populated() -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        criteria.apply_filter(Filter::Sort(SortKey::PriceDesc));
        criteria.apply_filter(Filter::Price(PriceRange::new(
            Price::new(Decimal::from(10)).unwrap(),
            Price::new(Decimal::from(40)).unwrap(),
        )));
        criteria.apply_filter(Filter::SkinType("sensitive, mature".into()));
        criteria.apply_filter(Filter::Category("serums".into()));
        criteria.apply_filter(Filter::Brand("Lumen".into()));
        criteria.apply_filter(Filter::Brand("Aster".into()));
        criteria
    }

    #[test]
    fn test_empty_criteria_has_no_chips() {
        assert_eq!(derive_chips(&FilterCriteria::new()).count(), 0);
    }

    #[test]
    fn test_chips_follow_dimension_order() {
        let criteria = populated();
        let dimensions: Vec<_> = derive_chips(&criteria).map(|c| c.dimension()).collect();
        assert_eq!(
            dimensions,
            [
                FilterDimension::Brand,
                FilterDimension::Brand,
                FilterDimension::Category,
                FilterDimension::SkinType,
                FilterDimension::SkinType,
                FilterDimension::Price,
                FilterDimension::Sort,
            ]
        );
    }

    #[test]
    fn test_chip_labels() {
        let criteria = populated();
        let labels: Vec<_> = derive_chips(&criteria).map(|c| c.label().to_owned()).collect();
        assert_eq!(
            labels,
            [
                "Aster",
                "Lumen",
                "serums",
                "mature",
                "Sensitive",
                "$10.00 - $40.00",
                "Sort: Price: High to Low",
            ]
        );
    }

    #[test]
    fn test_chips_are_restartable() {
        let criteria = populated();
        let chips = derive_chips(&criteria);
        let first: Vec<_> = chips.clone().collect();
        let second: Vec<_> = chips.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_removing_every_chip_resets_criteria() {
        let mut criteria = populated();
        let chips: Vec<_> = criteria.chips().collect();
        for chip in &chips {
            assert!(criteria.remove_filter(chip));
            assert!(!criteria.chips().any(|c| &c == chip));
            assert!(!criteria.remove_filter(chip));
        }
        assert!(criteria.is_default());
    }

    #[test]
    fn test_chip_json_shape() {
        let mut criteria = FilterCriteria::new();
        criteria.apply_filter(Filter::SkinType("Dry".into()));
        let chip = criteria.chips().next().unwrap();
        assert_eq!(
            serde_json::to_value(&chip).unwrap(),
            serde_json::json!({"dimension": "skinType", "value": "dry", "label": "Dry"})
        );
    }
}
