//! Storefront application: store gateway, catalog reconciliation, admin
//! mutations and checkout submission.

pub mod admin;
pub mod checkout;
pub mod config;
pub mod context;
pub mod gateway;
pub mod observability;
pub mod reconcile;
pub mod seed;
pub mod state;

#[cfg(test)]
mod test;
