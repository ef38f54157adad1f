//! Jobstack
//!
//! Domain model for a service-catalog storefront: fixed-scope services,
//! discounted bundles, the shopper's scope and the checkout summary built from
//! it. Everything here is synchronous and free of I/O; the application crate
//! owns the store and the form endpoint.

pub mod bundles;
pub mod catalog;
pub mod checkout;
pub mod defaults;
pub mod fields;
pub mod ids;
pub mod pricing;
pub mod scope;
pub mod serde_helpers;
pub mod services;
pub mod settings;
