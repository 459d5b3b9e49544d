//! CLI command implementations.
//!
//! Commands write results to stdout and diagnostics to the tracing
//! subscriber (stderr), so output can be piped.

pub mod cart;
pub mod catalog;
pub mod skin_types;

use std::io::{self, Write};
use std::path::Path;

use dewdrop_core::Product;
use serde::Serialize;

use crate::error::{CliError, Result};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl OutputFormat {
    pub const fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Table }
    }
}

/// Read a product catalog snapshot.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let products: Vec<Product> =
        serde_json::from_str(&contents).map_err(|source| CliError::Catalog {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), count = products.len(), "Loaded catalog");
    Ok(products)
}

/// Print a value as pretty JSON followed by a newline.
pub fn write_json(out: &mut impl Write, value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)?;
    Ok(())
}

/// Print products as a fixed-width table.
pub fn write_products(out: &mut impl Write, products: &[&Product]) -> Result<()> {
    if products.is_empty() {
        writeln!(out, "No products match.")?;
        return Ok(());
    }
    for product in products {
        writeln!(
            out,
            "{:<24} {:<14} {:<14} {:>9} {:>4.1}  {}",
            product.id,
            product.brand,
            product.category,
            product.price.display(),
            product.rating,
            product.name
        )?;
    }
    Ok(())
}
