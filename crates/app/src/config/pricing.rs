//! Pricing Config

use clap::Args;
use jobstack::bundles::BundlePricePolicy;

/// Which price bundles are sold at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BundlePricing {
    /// The price stored when the bundle was last saved.
    #[default]
    Frozen,

    /// The price recomputed from current service prices.
    Recompute,
}

impl From<BundlePricing> for BundlePricePolicy {
    fn from(pricing: BundlePricing) -> Self {
        match pricing {
            BundlePricing::Frozen => Self::FrozenAtCreation,
            BundlePricing::Recompute => Self::RecomputeOnRead,
        }
    }
}

/// Bundle pricing settings.
#[derive(Debug, Clone, Args)]
pub struct PricingConfig {
    /// Bundle price policy (frozen, recompute)
    #[arg(
        long,
        env = "BUNDLE_PRICE_POLICY",
        value_enum,
        default_value_t = BundlePricing::Frozen
    )]
    pub bundle_pricing: BundlePricing,
}
