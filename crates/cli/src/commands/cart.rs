//! Cart snapshot commands.
//!
//! Each command restores the cart from the snapshot file, applies one
//! operation, writes the snapshot back and prints the resulting cart. A
//! missing snapshot file is an empty cart.
//!
//! # Usage
//!
//! ```bash
//! dewdrop cart add gel-cleanser --price 18.00
//! dewdrop cart add vitamin-c-serum --variant 30ml --price 28.00 -q 2 --stock-limit 5
//! dewdrop cart update vitamin-c-serum --variant 30ml 0
//! dewdrop --cart /tmp/cart.json cart show --json
//! ```

use std::io::{self, Write};
use std::path::Path;

use dewdrop_core::cart::{AddItem, Cart, LineItemRecord};
use serde::Serialize;

use super::{OutputFormat, write_json};
use crate::error::{CliError, Result};

/// Restore a cart from its snapshot file.
pub fn load(path: &Path) -> Result<Cart> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No cart snapshot, starting empty");
            return Ok(Cart::new());
        }
        Err(source) => {
            return Err(CliError::File {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let restored = Cart::restore_json(&contents)?;
    if restored.skipped > 0 {
        tracing::warn!(
            path = %path.display(),
            skipped = restored.skipped,
            "Dropped malformed cart records"
        );
    }
    Ok(restored.cart)
}

/// Write a cart snapshot file, creating parent directories as needed.
pub fn save(path: &Path, cart: &Cart) -> Result<()> {
    let file_error = |source| CliError::File {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_error)?;
    }
    std::fs::write(path, cart.to_json()?).map_err(file_error)?;
    tracing::debug!(path = %path.display(), lines = cart.len(), "Saved cart snapshot");
    Ok(())
}

/// Load, mutate, save and print.
fn modify<T>(
    path: &Path,
    format: OutputFormat,
    op: impl FnOnce(&mut Cart) -> Result<T>,
) -> Result<T> {
    let mut cart = load(path)?;
    let value = op(&mut cart)?;
    save(path, &cart)?;
    print_cart(&cart, format)?;
    Ok(value)
}

pub fn show(path: &Path, format: OutputFormat) -> Result<()> {
    print_cart(&load(path)?, format)
}

pub fn add(path: &Path, item: AddItem, format: OutputFormat) -> Result<()> {
    let quantity = modify(path, format, |cart| Ok(cart.add_item(item)?))?;
    tracing::info!(quantity, "Added to cart");
    Ok(())
}

pub fn update(
    path: &Path,
    product_id: &str,
    variant_key: Option<&str>,
    quantity: i64,
    format: OutputFormat,
) -> Result<()> {
    let updated = modify(path, format, |cart| {
        Ok(cart.update_quantity(product_id, variant_key, quantity)?)
    })?;
    match updated {
        Some(quantity) => tracing::info!(product_id, quantity, "Updated quantity"),
        None => tracing::info!(product_id, "Line is not in the cart"),
    }
    Ok(())
}

pub fn remove(
    path: &Path,
    product_id: &str,
    variant_key: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let removed = modify(path, format, |cart| {
        Ok(cart.remove_item(product_id, variant_key)?)
    })?;
    if removed.is_none() {
        tracing::info!(product_id, "Line was not in the cart");
    }
    Ok(())
}

pub fn clear(path: &Path, format: OutputFormat) -> Result<()> {
    modify(path, format, |cart| {
        cart.clear();
        Ok(())
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartOutput {
    items: Vec<LineItemRecord>,
    item_count: u64,
    subtotal: String,
}

fn print_cart(cart: &Cart, format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    write_cart(&mut out, cart, format)
}

fn write_cart(out: &mut impl Write, cart: &Cart, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return write_json(
            out,
            &CartOutput {
                items: cart.serialize(),
                item_count: cart.item_count(),
                subtotal: cart.subtotal().display(),
            },
        );
    }

    if cart.is_empty() {
        writeln!(out, "Cart is empty.")?;
        return Ok(());
    }
    for line in cart {
        let variant = line.variant_key().map_or("-", |v| v.as_str());
        writeln!(
            out,
            "{:<24} {:<10} {:>4} x {:>9} = {:>9}",
            line.product_id(),
            variant,
            line.quantity(),
            line.unit_price().display(),
            line.line_total().display()
        )?;
    }
    writeln!(
        out,
        "{} items, subtotal {}",
        cart.item_count(),
        cart.subtotal()
    )?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::commands::test_support;

    #[test]
    fn test_missing_snapshot_is_empty_cart() {
        let cart = load(&test_support::temp_path("never-written.json")).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = test_support::temp_path("nested");
        let path = dir.join("cart.json");

        let mut cart = Cart::new();
        cart.add_item(AddItem::new("serum", Decimal::new(2800, 2)).variant("30ml").quantity(2))
            .unwrap();
        save(&path, &cart).unwrap();

        assert_eq!(load(&path).unwrap(), cart);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_drops_bad_records() {
        let path = test_support::temp_path("partly-bad.json");
        std::fs::write(
            &path,
            r#"[{"productId": "mist", "unitPrice": "9.50", "quantity": 1},
                {"productId": "", "unitPrice": "1", "quantity": 1}]"#,
        )
        .unwrap();

        let cart = load(&path).unwrap();
        assert_eq!(cart.len(), 1);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_failed_add_leaves_snapshot_untouched() {
        let path = test_support::temp_path("failed-add.json");
        add(&path, AddItem::new("spf", Decimal::TEN).quantity(2), OutputFormat::Json).unwrap();
        let before = std::fs::read_to_string(&path).unwrap();

        let err = add(
            &path,
            AddItem::new("spf", Decimal::TEN).quantity(2).stock_limit(3),
            OutputFormat::Json,
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Cart(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_cart_table() {
        let mut cart = Cart::new();
        cart.add_item(AddItem::new("mist", Decimal::new(950, 2)).quantity(2))
            .unwrap();

        let mut out = Vec::new();
        write_cart(&mut out, &cart, OutputFormat::Table).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("mist"));
        assert!(text.ends_with("2 items, subtotal $19.00\n"));
    }

    #[test]
    fn test_write_cart_json() {
        let mut out = Vec::new();
        write_cart(&mut out, &Cart::new(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"items": [], "itemCount": 0, "subtotal": "$0.00"})
        );
    }
}
