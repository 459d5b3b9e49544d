//! Dewdrop Core - Storefront cart and catalog engines.
//!
//! This crate provides the stateful logic behind the Dewdrop skincare
//! storefront:
//! - [`cart`] - Line-item state machine with derived totals and snapshots
//! - [`catalog`] - Filter/sort criteria, filter chips, curated lists, facets
//! - [`skin_type`] - Normalization of free-form skin-type tags
//!
//! # Architecture
//!
//! The core crate contains only types and synchronous derivations - no I/O,
//! no storage, no HTTP clients. Hosts fetch products, persist cart snapshots,
//! and render whatever these engines return.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod skin_type;
pub mod types;

pub use cart::{AddItem, Cart, CartError, LineItem, SharedCart};
pub use catalog::{FilterChip, FilterCriteria, Product, SortKey};
pub use skin_type::SkinType;
pub use types::*;
