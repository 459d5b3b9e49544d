//! Integration tests for the Dewdrop storefront engines.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dewdrop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_engine` - Cart merging, totals and snapshot round-trips
//! - `catalog_engine` - Filtering, sorting, chips and curated lists
//! - `skin_types` - Skin-type normalization end to end
//!
//! The tests only use the public API of `dewdrop-core` and need no running
//! services.
