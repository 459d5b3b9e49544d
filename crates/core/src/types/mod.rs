//! Core types for Dewdrop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod status;

pub use id::{IdError, ProductId, VariantKey};
pub use price::{Price, PriceError, PriceRange};
pub use status::ProductStatus;
