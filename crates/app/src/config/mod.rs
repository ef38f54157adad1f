//! Application configuration
//!
//! Every setting can come from the command line or the environment; a `.env`
//! file in the working directory is loaded first.

use clap::Args;

pub mod admin;
pub mod forms;
pub mod logging;
pub mod pricing;
pub mod store;

pub use admin::AdminConfig;
pub use forms::FormsConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use pricing::{BundlePricing, PricingConfig};
pub use store::StoreConfig;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Hosted store settings.
    #[command(flatten)]
    pub store: StoreConfig,

    /// Form-intake endpoint settings.
    #[command(flatten)]
    pub forms: FormsConfig,

    /// Admin gate settings.
    #[command(flatten)]
    pub admin: AdminConfig,

    /// Bundle pricing settings.
    #[command(flatten)]
    pub pricing: PricingConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
