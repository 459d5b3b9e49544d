//! Catalog query commands.
//!
//! # Usage
//!
//! ```bash
//! dewdrop catalog list --brand Lumen --brand Aster --category serums
//! dewdrop catalog list --skin-type "dry, sensitive" --price 10-40 --sort rating-desc
//! dewdrop catalog featured --json
//! ```

use std::io::{self, Write};

use clap::Args;
use dewdrop_core::Product;
use dewdrop_core::catalog::{
    self, Filter, FilterChip, FilterCriteria, FilterDimension,
};
use serde::Serialize;

use super::{OutputFormat, load_catalog, write_json, write_products};
use crate::config::CliConfig;
use crate::error::{CliError, Result};

/// Filter flags for `catalog list`.
#[derive(Debug, Default, Args)]
pub struct ListArgs {
    /// Brand to include (repeatable)
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Category to include (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Skin type to include (repeatable, comma-separated allowed)
    #[arg(long = "skin-type")]
    pub skin_types: Vec<String>,

    /// Inclusive price range, e.g. 10-40
    #[arg(long)]
    pub price: Option<String>,

    /// relevance, rating-desc, price-asc, price-desc or newest
    #[arg(long, default_value = "relevance")]
    pub sort: String,
}

impl ListArgs {
    /// Build criteria the same way the storefront does: one `apply_filter`
    /// per selected value.
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let selections = self
            .brands
            .iter()
            .map(|v| (FilterDimension::Brand, v))
            .chain(self.categories.iter().map(|v| (FilterDimension::Category, v)))
            .chain(self.skin_types.iter().map(|v| (FilterDimension::SkinType, v)))
            .chain(self.price.iter().map(|v| (FilterDimension::Price, v)))
            .chain(std::iter::once((FilterDimension::Sort, &self.sort)));

        let mut criteria = FilterCriteria::new();
        for (dimension, value) in selections {
            let filter = Filter::parse(dimension, value).ok_or_else(|| {
                CliError::InvalidFilter(format!("{dimension} '{value}' (expected min-max)"))
            })?;
            criteria.apply_filter(filter);
        }
        Ok(criteria)
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    chips: Vec<FilterChip>,
    products: Vec<&'a Product>,
}

/// Filter and sort the catalog.
pub fn list(config: &CliConfig, args: &ListArgs, format: OutputFormat) -> Result<()> {
    let criteria = args.criteria()?;
    let products = load_catalog(&config.catalog_path)?;
    let matched = catalog::apply(&products, &criteria);
    tracing::info!(
        total = products.len(),
        matched = matched.len(),
        "Filtered catalog"
    );

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(
            &mut out,
            &ListOutput {
                chips: criteria.chips().collect(),
                products: matched,
            },
        ),
        OutputFormat::Table => {
            write_chips(&mut out, criteria.chips())?;
            write_products(&mut out, &matched)
        }
    }
}

/// Featured products.
pub fn featured(config: &CliConfig, format: OutputFormat) -> Result<()> {
    let products = load_catalog(&config.catalog_path)?;
    let featured = catalog::featured_limited(&products, config.curated_limit);
    print_products(&featured, format)
}

/// Best-selling products.
pub fn best_sellers(config: &CliConfig, format: OutputFormat) -> Result<()> {
    let products = load_catalog(&config.catalog_path)?;
    let best = catalog::best_sellers_limited(&products, config.curated_limit);
    print_products(&best, format)
}

/// Facet counts for the filter sidebar.
pub fn facets(config: &CliConfig, format: OutputFormat) -> Result<()> {
    let products = load_catalog(&config.catalog_path)?;
    let facets = catalog::facets(&products);

    let mut out = io::stdout().lock();
    if format == OutputFormat::Json {
        return write_json(&mut out, &facets);
    }

    writeln!(out, "Brands:")?;
    for (brand, count) in &facets.brands {
        writeln!(out, "  {brand} ({count})")?;
    }
    writeln!(out, "Categories:")?;
    for (category, count) in &facets.categories {
        writeln!(out, "  {category} ({count})")?;
    }
    writeln!(out, "Skin types:")?;
    for (skin_type, count) in &facets.skin_types {
        writeln!(out, "  {} ({count})", skin_type.label())?;
    }
    if let Some(bounds) = facets.price_bounds {
        writeln!(out, "Price: {bounds}")?;
    }
    Ok(())
}

fn print_products(products: &[&Product], format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Json => write_json(&mut out, &products),
        OutputFormat::Table => write_products(&mut out, products),
    }
}

fn write_chips(out: &mut impl Write, chips: impl Iterator<Item = FilterChip>) -> Result<()> {
    let labels: Vec<String> = chips
        .map(|chip| format!("[{}: {}]", chip.dimension(), chip.label()))
        .collect();
    if !labels.is_empty() {
        writeln!(out, "Filters: {}", labels.join(" "))?;
    }
    Ok(())
}
