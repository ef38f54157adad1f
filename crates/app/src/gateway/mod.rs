//! Remote Catalog Gateway
//!
//! Request/response mapping to the hosted store's `services`, `bundles` and
//! `ui_settings` collections. Field renames between the store and the model
//! happen here and nowhere else.

pub mod errors;
mod postgrest;
pub mod service;

pub use errors::GatewayError;
pub use postgrest::PostgrestGateway;
pub use service::*;
