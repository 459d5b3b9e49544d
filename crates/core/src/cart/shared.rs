//! Thread-safe cart handle.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{AddItem, Cart, CartError, LineItem, LineItemRecord, Restored};
use crate::types::Price;

/// A cloneable handle to one cart shared between threads.
///
/// Each operation runs inside a single critical section, so two rapid "add to
/// cart" calls for the same pair both land: the read-modify-write on the
/// quantity is never interleaved.
///
/// A poisoned lock is recovered rather than reported. Single operations
/// validate before mutating, and [`SharedCart::with`] works on a copy that is
/// only committed when its closure returns, so a panic in another holder
/// cannot leave a half-applied change behind.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<Cart>>,
}

impl SharedCart {
    /// Create a handle to an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing cart, e.g. one returned by [`Cart::restore`].
    #[must_use]
    pub fn from_cart(cart: Cart) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cart)),
        }
    }

    /// Rebuild a shared cart from records. See [`Cart::restore`].
    #[must_use]
    pub fn restore<I>(records: I) -> (Self, usize)
    where
        I: IntoIterator<Item = LineItemRecord>,
    {
        let Restored { cart, skipped } = Cart::restore(records);
        (Self::from_cart(cart), skipped)
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`Cart::add_item`].
    ///
    /// # Errors
    ///
    /// Same as [`Cart::add_item`].
    pub fn add_item(&self, item: AddItem) -> Result<u32, CartError> {
        self.lock().add_item(item)
    }

    /// See [`Cart::update_quantity`].
    ///
    /// # Errors
    ///
    /// Same as [`Cart::update_quantity`].
    pub fn update_quantity(
        &self,
        product_id: &str,
        variant_key: Option<&str>,
        quantity: i64,
    ) -> Result<Option<u32>, CartError> {
        self.lock().update_quantity(product_id, variant_key, quantity)
    }

    /// See [`Cart::remove_item`].
    ///
    /// # Errors
    ///
    /// Same as [`Cart::remove_item`].
    pub fn remove_item(
        &self,
        product_id: &str,
        variant_key: Option<&str>,
    ) -> Result<Option<LineItem>, CartError> {
        self.lock().remove_item(product_id, variant_key)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lock().item_count()
    }

    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lock().subtotal()
    }

    /// Records for persistence, taken under one lock.
    #[must_use]
    pub fn serialize(&self) -> Vec<LineItemRecord> {
        self.lock().serialize()
    }

    /// A consistent copy of the cart at this instant.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Run several operations as one atomic unit.
    ///
    /// `f` edits a copy of the cart, which replaces the shared cart once `f`
    /// returns. If `f` panics, the shared cart is left as it was.
    pub fn with<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut guard = self.lock();
        let mut draft = guard.clone();
        let result = f(&mut draft);
        *guard = draft;
        result
    }
}
