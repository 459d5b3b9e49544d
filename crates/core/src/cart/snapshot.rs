//! Flat cart snapshots for host-side persistence.
//!
//! The cart survives page reloads by being written to whatever storage the
//! host owns (local storage, a session row, a file). The snapshot is a plain
//! list of [`LineItemRecord`]s. Restoring is lenient: each record is checked
//! against the line-item rules on its own, bad records are skipped and
//! counted, and the rest of the cart comes back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cart, LineItem, LineKey, positive_quantity};
use crate::types::Price;

/// Errors that make a whole snapshot document unreadable.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not valid JSON, or could not be encoded.
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is valid JSON but not a list of records.
    #[error("snapshot must be a JSON array of line items")]
    NotAnArray,
}

/// One persisted line item.
///
/// Fields are loose (`String`, signed quantity) so that stale or
/// hand-edited snapshots still deserialize and can be validated record by
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRecord {
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant_key: Option<String>,
    pub unit_price: Decimal,
    pub quantity: i64,
}

impl From<&LineItem> for LineItemRecord {
    fn from(line: &LineItem) -> Self {
        Self {
            product_id: line.product_id().to_string(),
            variant_key: line.variant_key().map(ToString::to_string),
            unit_price: line.unit_price().amount(),
            quantity: i64::from(line.quantity()),
        }
    }
}

/// Result of restoring a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Restored {
    /// The rebuilt cart.
    pub cart: Cart,
    /// Number of records that were dropped as malformed.
    pub skipped: usize,
}

impl Cart {
    /// Flatten the cart into persistable records, in line order.
    #[must_use]
    pub fn serialize(&self) -> Vec<LineItemRecord> {
        self.items().iter().map(LineItemRecord::from).collect()
    }

    /// Rebuild a cart from records.
    ///
    /// A record is skipped if its product id is blank, its price is negative,
    /// its quantity is not positive, it repeats a pair already restored, or
    /// it would push the subtotal past what a price can represent.
    #[must_use]
    pub fn restore<I>(records: I) -> Restored
    where
        I: IntoIterator<Item = LineItemRecord>,
    {
        let mut restored = Restored::default();
        for (index, record) in records.into_iter().enumerate() {
            match validate(&record, &restored.cart) {
                Ok(line) => restored.cart.items.push(line),
                Err(reason) => {
                    tracing::warn!(index, reason, "Skipping malformed cart record");
                    restored.skipped += 1;
                }
            }
        }
        restored
    }

    /// Encode the snapshot as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(&self.serialize())?)
    }

    /// Rebuild a cart from a JSON array of records.
    ///
    /// Each element is decoded on its own, so an element with the wrong shape
    /// is skipped like any other malformed record.
    ///
    /// # Errors
    ///
    /// Returns an error only if `json` is not a JSON array.
    pub fn restore_json(json: &str) -> Result<Restored, SnapshotError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Array(elements) = document else {
            return Err(SnapshotError::NotAnArray);
        };

        let mut undecodable = 0;
        let records: Vec<LineItemRecord> = elements
            .into_iter()
            .enumerate()
            .filter_map(|(index, element)| {
                serde_json::from_value(element)
                    .map_err(|e| {
                        tracing::warn!(index, error = %e, "Skipping undecodable cart record");
                        undecodable += 1;
                    })
                    .ok()
            })
            .collect();

        let mut restored = Self::restore(records);
        restored.skipped += undecodable;
        Ok(restored)
    }
}

fn validate(record: &LineItemRecord, cart: &Cart) -> Result<LineItem, &'static str> {
    let key = LineKey::parse(&record.product_id, record.variant_key.as_deref())
        .map_err(|_| "invalid identifier")?;
    let unit_price = Price::new(record.unit_price).map_err(|_| "negative unit price")?;
    let quantity = positive_quantity(record.quantity).map_err(|_| "invalid quantity")?;
    if cart.position(&key).is_some() {
        return Err("duplicate line");
    }
    if cart.subtotal_with(&key, unit_price, quantity).is_none() {
        return Err("total too large");
    }
    Ok(LineItem {
        key,
        unit_price,
        quantity,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::AddItem;

    fn record(product_id: &str, variant_key: Option<&str>, cents: i64, quantity: i64) -> LineItemRecord {
        LineItemRecord {
            product_id: product_id.to_owned(),
            variant_key: variant_key.map(str::to_owned),
            unit_price: Decimal::new(cents, 2),
            quantity,
        }
    }

    #[test]
    fn test_serialize_preserves_order() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("b", Decimal::ONE)).unwrap();
        cart.add_item(AddItem::new("a", Decimal::from(2)).variant("tin").quantity(3))
            .unwrap();

        assert_eq!(
            cart.serialize(),
            vec![record("b", None, 100, 1), record("a", Some("tin"), 200, 3)]
        );
    }

    #[test]
    fn test_restore_roundtrip() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("cleanser", Decimal::new(1800, 2)).quantity(2))
            .unwrap();
        cart.add_item(AddItem::new("serum", Decimal::new(4200, 2)).variant("30ml"))
            .unwrap();
        cart.update_quantity("serum", Some("30ml"), 4).unwrap();

        let restored = Cart::restore(cart.serialize());
        assert_eq!(restored.skipped, 0);
        assert_eq!(restored.cart, cart);
    }

    #[test]
    fn test_restore_skips_malformed_records() {
        let restored = Cart::restore(vec![
            record("ok", None, 500, 1),
            record("", None, 500, 1),
            record("neg-price", None, -500, 1),
            record("zero", None, 500, 0),
            record("negative", None, 500, -2),
            record("too-many", None, 500, i64::from(u32::MAX) + 1),
            record("ok", None, 700, 9),
        ]);

        assert_eq!(restored.skipped, 6);
        assert_eq!(restored.cart.len(), 1);
        let line = restored.cart.get("ok", None).unwrap();
        assert_eq!(line.quantity(), 1);
        assert_eq!(line.unit_price().amount(), Decimal::new(500, 2));
    }

    #[test]
    fn test_restore_skips_records_that_overflow_the_total() {
        let huge = |product_id: &str, quantity| LineItemRecord {
            product_id: product_id.to_owned(),
            variant_key: None,
            unit_price: Decimal::MAX,
            quantity,
        };

        let restored = Cart::restore(vec![huge("a", 2), huge("b", 1), huge("c", 1)]);

        assert_eq!(restored.skipped, 2);
        assert_eq!(restored.cart.len(), 1);
        assert_eq!(restored.cart.subtotal().amount(), Decimal::MAX);
    }

    #[test]
    fn test_restore_json_roundtrip() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("mist", Decimal::new(1499, 2)).quantity(2))
            .unwrap();

        let json = cart.to_json().unwrap();
        let restored = Cart::restore_json(&json).unwrap();
        assert_eq!(restored.cart, cart);
        assert_eq!(restored.skipped, 0);
    }

    #[test]
    fn test_restore_json_skips_undecodable_elements() {
        let json = r#"[
            {"productId": "mist", "unitPrice": "14.99", "quantity": 2},
            {"productId": "balm", "unitPrice": "not a price", "quantity": 1},
            {"productId": "oil"},
            "garbage",
            {"productId": "oil", "variantKey": "10ml", "unitPrice": 31, "quantity": 1}
        ]"#;

        let restored = Cart::restore_json(json).unwrap();
        assert_eq!(restored.skipped, 3);
        assert_eq!(restored.cart.len(), 2);
        assert_eq!(restored.cart.item_count(), 3);
    }

    #[test]
    fn test_restore_json_rejects_non_array() {
        assert!(matches!(
            Cart::restore_json(r#"{"items": []}"#),
            Err(SnapshotError::NotAnArray)
        ));
        assert!(matches!(
            Cart::restore_json("not json"),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record("mist", None, 1499, 2)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"productId": "mist", "unitPrice": "14.99", "quantity": 2})
        );
    }
}
