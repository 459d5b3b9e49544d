//! Shopping cart line-item state machine.
//!
//! A [`Cart`] holds at most one [`LineItem`] per `(product, variant)` pair.
//! Adding a pair that is already present increments its quantity; driving a
//! quantity to zero removes the line. Totals are never stored: the item count
//! and subtotal are computed from the current lines on every read.
//!
//! Every fallible operation validates its input before touching the cart, so
//! a failed call leaves the cart exactly as it was.
//!
//! The cart does no I/O. Hosts persist it through [`Cart::serialize`] and
//! [`Cart::restore`] (see [`snapshot`]), and hosts that share one cart across
//! threads wrap it in a [`SharedCart`].

mod line_item;
mod shared;
pub mod snapshot;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{IdError, Price, PriceError};

pub use line_item::{LineItem, LineKey};
pub use shared::SharedCart;
pub use snapshot::{LineItemRecord, Restored, SnapshotError};

/// Errors returned by cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity on add was not a positive integer, or does not fit a line.
    #[error("quantity must be a positive integer, got {0}")]
    InvalidQuantity(i64),

    /// The resulting quantity would exceed the available stock.
    #[error("only {available} in stock, requested {requested}")]
    OutOfStock {
        /// Quantity the line would have had after the add.
        requested: u64,
        /// Stock limit supplied by the caller.
        available: u32,
    },

    /// An identifier or price was empty or malformed, or the cart total
    /// would no longer be representable.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<IdError> for CartError {
    fn from(err: IdError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<PriceError> for CartError {
    fn from(err: PriceError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Request to add a product to the cart.
///
/// ```
/// use dewdrop_core::cart::{AddItem, Cart};
/// use rust_decimal::Decimal;
///
/// let mut cart = Cart::new();
/// cart.add_item(AddItem::new("vitamin-c-serum", Decimal::new(2800, 2)).variant("30ml").quantity(2))
///     .unwrap();
/// assert_eq!(cart.item_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    product_id: String,
    variant_key: Option<String>,
    unit_price: Decimal,
    quantity: i64,
    stock_limit: Option<u32>,
}

impl AddItem {
    /// Add one unit of `product_id` at `unit_price`, with no variant.
    #[must_use]
    pub fn new(product_id: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            product_id: product_id.into(),
            variant_key: None,
            unit_price,
            quantity: 1,
            stock_limit: None,
        }
    }

    /// Select a size, shade, or other variant.
    #[must_use]
    pub fn variant(mut self, variant_key: impl Into<String>) -> Self {
        self.variant_key = Some(variant_key.into());
        self
    }

    /// Number of units to add.
    #[must_use]
    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Maximum quantity the line may reach, as reported by the stock source.
    #[must_use]
    pub fn stock_limit(mut self, limit: u32) -> Self {
        self.stock_limit = Some(limit);
        self
    }
}

/// An insertion-ordered set of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add units of a product, merging into an existing line for the same
    /// pair. Returns the line's quantity after the add.
    ///
    /// The unit price of an existing line is kept; the price in `item` is only
    /// captured when the line is created.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidArgument`] for a blank product id, a negative
    ///   price, or a cart total that would overflow
    /// - [`CartError::InvalidQuantity`] for a non-positive quantity
    /// - [`CartError::OutOfStock`] if the line would exceed `stock_limit`
    pub fn add_item(&mut self, item: AddItem) -> Result<u32, CartError> {
        let key = LineKey::parse(&item.product_id, item.variant_key.as_deref())?;
        let unit_price = Price::new(item.unit_price)?;
        let quantity = positive_quantity(item.quantity)?;

        let position = self.position(&key);
        let existing = position.and_then(|idx| self.items.get(idx));
        let current = existing.map_or(0, LineItem::quantity);
        let line_price = existing.map_or(unit_price, LineItem::unit_price);

        let requested = u64::from(current) + u64::from(quantity);
        if let Some(available) = item.stock_limit
            && requested > u64::from(available)
        {
            return Err(CartError::OutOfStock {
                requested,
                available,
            });
        }
        let new_quantity =
            u32::try_from(requested).map_err(|_| CartError::InvalidQuantity(item.quantity))?;
        self.ensure_total(&key, line_price, new_quantity)?;

        match position.and_then(|idx| self.items.get_mut(idx)) {
            Some(line) => line.quantity = new_quantity,
            None => self.items.push(LineItem {
                key: key.clone(),
                unit_price,
                quantity: new_quantity,
            }),
        }

        tracing::debug!(line = %key, quantity = new_quantity, "Added to cart");
        Ok(new_quantity)
    }

    /// Set a line's quantity directly. A quantity of zero or less removes the
    /// line. Returns the new quantity, or `None` if no line remains.
    ///
    /// Updating a pair that is not in the cart does nothing.
    ///
    /// # Errors
    ///
    /// - [`CartError::InvalidArgument`] for a blank product id, or a cart
    ///   total that would overflow
    /// - [`CartError::InvalidQuantity`] if `quantity` does not fit a line
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        variant_key: Option<&str>,
        quantity: i64,
    ) -> Result<Option<u32>, CartError> {
        let key = LineKey::parse(product_id, variant_key)?;
        if quantity <= 0 {
            self.remove(&key);
            return Ok(None);
        }
        let quantity = positive_quantity(quantity)?;

        let Some(idx) = self.position(&key) else {
            return Ok(None);
        };
        let Some(unit_price) = self.items.get(idx).map(LineItem::unit_price) else {
            return Ok(None);
        };
        self.ensure_total(&key, unit_price, quantity)?;
        if let Some(line) = self.items.get_mut(idx) {
            line.quantity = quantity;
        }
        tracing::debug!(line = %key, quantity, "Updated cart quantity");
        Ok(Some(quantity))
    }

    /// Remove a line. Removing a pair that is not in the cart is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidArgument`] for a blank product id.
    pub fn remove_item(
        &mut self,
        product_id: &str,
        variant_key: Option<&str>,
    ) -> Result<Option<LineItem>, CartError> {
        let key = LineKey::parse(product_id, variant_key)?;
        Ok(self.remove(&key))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines, for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of every line total.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by its raw identifiers.
    #[must_use]
    pub fn get(&self, product_id: &str, variant_key: Option<&str>) -> Option<&LineItem> {
        let key = LineKey::parse(product_id, variant_key).ok()?;
        self.items.iter().find(|line| line.key == key)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, key: &LineKey) -> Option<usize> {
        self.items.iter().position(|line| &line.key == key)
    }

    /// Subtotal the cart would have with `key` set to `quantity` units at
    /// `unit_price`, or `None` if it cannot be represented.
    fn subtotal_with(&self, key: &LineKey, unit_price: Price, quantity: u32) -> Option<Price> {
        let changed = unit_price.checked_mul(quantity)?;
        self.items
            .iter()
            .filter(|line| &line.key != key)
            .try_fold(changed, |total, line| total.checked_add(line.line_total()))
    }

    fn ensure_total(&self, key: &LineKey, unit_price: Price, quantity: u32) -> Result<(), CartError> {
        match self.subtotal_with(key, unit_price, quantity) {
            Some(_) => Ok(()),
            None => Err(CartError::InvalidArgument(format!(
                "cart total would be too large with {quantity} x {key}"
            ))),
        }
    }

    fn remove(&mut self, key: &LineKey) -> Option<LineItem> {
        let idx = self.position(key)?;
        let removed = self.items.remove(idx);
        tracing::debug!(line = %key, "Removed from cart");
        Some(removed)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Convert caller input into a line quantity.
fn positive_quantity(quantity: i64) -> Result<u32, CartError> {
    match u32::try_from(quantity) {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(CartError::InvalidQuantity(quantity)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dollars(amount: i64) -> Decimal {
        Decimal::from(amount)
    }

    fn price(amount: i64) -> Price {
        Price::new(dollars(amount)).unwrap()
    }

    // =========================================================================
    // add_item
    // =========================================================================

    #[test]
    fn test_add_creates_line() {
        let mut cart = Cart::new();
        let quantity = cart.add_item(AddItem::new("cleanser", dollars(18))).unwrap();

        assert_eq!(quantity, 1);
        assert_eq!(cart.len(), 1);
        let line = cart.get("cleanser", None).unwrap();
        assert_eq!(line.unit_price(), price(18));
        assert_eq!(line.variant_key(), None);
    }

    #[test]
    fn test_add_same_pair_merges() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("toner", dollars(22)).variant("200ml").quantity(2))
            .unwrap();
        let quantity = cart
            .add_item(AddItem::new("toner", dollars(22)).variant("200ml").quantity(3))
            .unwrap();

        assert_eq!(quantity, 5);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_add_different_variants_are_distinct() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("toner", dollars(22)).variant("200ml"))
            .unwrap();
        cart.add_item(AddItem::new("toner", dollars(12)).variant("100ml"))
            .unwrap();
        cart.add_item(AddItem::new("toner", dollars(22))).unwrap();

        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_blank_variant_matches_no_variant() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("balm", dollars(9))).unwrap();
        cart.add_item(AddItem::new("balm", dollars(9)).variant("  "))
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("balm", Some("")).unwrap().quantity(), 2);
    }

    #[test]
    fn test_add_keeps_first_unit_price() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("mask", dollars(30))).unwrap();
        cart.add_item(AddItem::new("mask", dollars(25))).unwrap();

        assert_eq!(cart.get("mask", None).unwrap().unit_price(), price(30));
        assert_eq!(cart.subtotal(), price(60));
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        for quantity in [0, -1, i64::MIN] {
            let err = cart
                .add_item(AddItem::new("mask", dollars(30)).quantity(quantity))
                .unwrap_err();
            assert_eq!(err, CartError::InvalidQuantity(quantity));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_quantity_overflow() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("mask", dollars(30)).quantity(i64::from(u32::MAX)))
            .unwrap();
        let err = cart.add_item(AddItem::new("mask", dollars(30))).unwrap_err();

        assert_eq!(err, CartError::InvalidQuantity(1));
        assert_eq!(cart.item_count(), u64::from(u32::MAX));
    }

    #[test]
    fn test_add_rejects_blank_product_id() {
        let mut cart = Cart::new();
        let err = cart.add_item(AddItem::new("  ", dollars(5))).unwrap_err();
        assert!(matches!(err, CartError::InvalidArgument(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let mut cart = Cart::new();
        let err = cart
            .add_item(AddItem::new("mask", Decimal::new(-100, 2)))
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidArgument(_)));
    }

    #[test]
    fn test_add_beyond_stock_limit_fails_without_mutation() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("spf", dollars(20)).quantity(2).stock_limit(3))
            .unwrap();

        let err = cart
            .add_item(AddItem::new("spf", dollars(20)).quantity(2).stock_limit(3))
            .unwrap_err();

        assert_eq!(
            err,
            CartError::OutOfStock {
                requested: 4,
                available: 3
            }
        );
        assert_eq!(cart.get("spf", None).unwrap().quantity(), 2);
    }

    #[test]
    fn test_add_up_to_stock_limit_succeeds() {
        let mut cart = Cart::new();
        let quantity = cart
            .add_item(AddItem::new("spf", dollars(20)).quantity(3).stock_limit(3))
            .unwrap();
        assert_eq!(quantity, 3);
    }

    #[test]
    fn test_new_line_beyond_stock_limit_is_not_created() {
        let mut cart = Cart::new();
        let err = cart
            .add_item(AddItem::new("spf", dollars(20)).quantity(1).stock_limit(0))
            .unwrap_err();
        assert!(matches!(err, CartError::OutOfStock { .. }));
        assert!(cart.is_empty());
    }

    // =========================================================================
    // update_quantity / remove_item
    // =========================================================================

    #[test]
    fn test_add_rejects_unrepresentable_total() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("gold-mask", Decimal::MAX)).unwrap();

        let err = cart
            .add_item(AddItem::new("diamond-serum", Decimal::MAX))
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidArgument(_)));

        let err = cart
            .add_item(AddItem::new("gold-mask", Decimal::ONE))
            .unwrap_err();
        assert!(matches!(err, CartError::InvalidArgument(_)));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.subtotal().amount(), Decimal::MAX);
    }

    #[test]
    fn test_update_rejects_unrepresentable_total() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("gold-mask", Decimal::MAX)).unwrap();

        let err = cart.update_quantity("gold-mask", None, 2).unwrap_err();
        assert!(matches!(err, CartError::InvalidArgument(_)));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal().amount(), Decimal::MAX);
    }

    #[test]
    fn test_update_sets_quantity() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("serum", dollars(40)).quantity(4))
            .unwrap();

        assert_eq!(cart.update_quantity("serum", None, 1).unwrap(), Some(1));
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        let mut a = Cart::new();
        let mut b = Cart::new();
        for cart in [&mut a, &mut b] {
            cart.add_item(AddItem::new("serum", dollars(40)).variant("15ml"))
                .unwrap();
            cart.add_item(AddItem::new("cream", dollars(35))).unwrap();
        }

        a.update_quantity("serum", Some("15ml"), 0).unwrap();
        b.remove_item("serum", Some("15ml")).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_update_negative_removes() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("serum", dollars(40))).unwrap();
        assert_eq!(cart.update_quantity("serum", None, -3).unwrap(), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_missing_line_is_noop() {
        let mut cart = Cart::new();
        assert_eq!(cart.update_quantity("ghost", None, 2).unwrap(), None);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_rejects_blank_product_id() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.update_quantity("", None, 1),
            Err(CartError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_remove_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("serum", dollars(40))).unwrap();
        assert_eq!(cart.remove_item("serum", Some("50ml")).unwrap(), None);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_preserves_order_of_remaining_lines() {
        let mut cart = Cart::new();
        for id in ["a", "b", "c"] {
            cart.add_item(AddItem::new(id, dollars(1))).unwrap();
        }
        cart.remove_item("b", None).unwrap();

        let ids: Vec<_> = cart.items().iter().map(|l| l.product_id().as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    // =========================================================================
    // Derived totals
    // =========================================================================

    #[test]
    fn test_totals_follow_mutations() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("oil", Decimal::new(1250, 2)).quantity(2))
            .unwrap();
        cart.add_item(AddItem::new("mist", Decimal::new(800, 2)))
            .unwrap();
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal().amount(), Decimal::new(3300, 2));

        cart.update_quantity("oil", None, 5).unwrap();
        assert_eq!(cart.item_count(), 6);
        assert_eq!(cart.subtotal().amount(), Decimal::new(7050, 2));

        cart.clear();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.subtotal(), Price::ZERO);
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("oil", Decimal::new(1250, 2)).quantity(3))
            .unwrap();
        assert_eq!(
            cart.get("oil", None).unwrap().line_total().amount(),
            Decimal::new(3750, 2)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CartError::InvalidQuantity(0).to_string(),
            "quantity must be a positive integer, got 0"
        );
        assert_eq!(
            CartError::OutOfStock {
                requested: 5,
                available: 2
            }
            .to_string(),
            "only 2 in stock, requested 5"
        );
    }
}
