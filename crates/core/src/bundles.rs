//! Bundles

use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{
    ids::TypedId,
    pricing::{PricingError, discounted_price, total_price},
    serde_helpers::null_as_default,
    services::{Service, ServiceId},
};

/// Bundle identifier
pub type BundleId = TypedId<Bundle>;

/// Member services of a bundle, in the order the admin picked them.
pub type BundleMembers = SmallVec<[ServiceId; 4]>;

/// Which price a bundle is sold at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BundlePricePolicy {
    /// The price computed when the bundle was created or last edited.
    #[default]
    FrozenAtCreation,

    /// The price recomputed from the current member service prices.
    RecomputeOnRead,
}

/// A bundle as entered by an admin, before its price is computed.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleDraft {
    /// Display name
    pub name: String,

    /// Description
    pub description: String,

    /// Discount in percentage points
    pub discount: Decimal,

    /// Member services
    pub service_ids: BundleMembers,
}

/// Everything about a bundle except its identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleData {
    /// Display name
    pub name: String,

    /// Description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Discount in percentage points
    #[serde(with = "crate::serde_helpers::amount")]
    pub discount: Decimal,

    /// Member services
    #[serde(default, deserialize_with = "null_as_default")]
    pub service_ids: BundleMembers,

    /// Discounted price, persisted at creation or edit
    #[serde(with = "crate::serde_helpers::amount")]
    pub price: Decimal,
}

/// A discounted grouping of services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    /// Identifier, assigned by the store or provisionally by the client
    pub id: BundleId,

    /// Bundle content
    #[serde(flatten)]
    pub data: BundleData,
}

impl BundleDraft {
    /// Price the draft against the current services.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the price cannot be represented.
    pub fn price(self, services: &[Service]) -> Result<BundleData, PricingError> {
        let price = bundle_price(self.discount, &self.service_ids, services)?;

        Ok(BundleData {
            name: self.name,
            description: self.description,
            discount: self.discount,
            service_ids: self.service_ids,
            price,
        })
    }
}

impl Bundle {
    /// Creates a bundle from its identity and content.
    pub fn new(id: BundleId, data: BundleData) -> Self {
        Self { id, data }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// The persisted price.
    pub fn price(&self) -> Decimal {
        self.data.price
    }

    /// The member services found in `services`, in catalog order.
    pub fn members<'a>(&self, services: &'a [Service]) -> Vec<&'a Service> {
        members_of(&self.data.service_ids, services).collect()
    }

    /// The undiscounted sum of member prices found in `services`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the sum cannot be represented.
    pub fn original_price(&self, services: &[Service]) -> Result<Decimal, PricingError> {
        total_price(members_of(&self.data.service_ids, services).map(Service::price))
    }

    /// The price the bundle sells at under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if a recomputed price cannot be represented.
    pub fn price_under(
        &self,
        policy: BundlePricePolicy,
        services: &[Service],
    ) -> Result<Decimal, PricingError> {
        match policy {
            BundlePricePolicy::FrozenAtCreation => Ok(self.data.price),
            BundlePricePolicy::RecomputeOnRead => {
                bundle_price(self.data.discount, &self.data.service_ids, services)
            }
        }
    }

    /// A copy priced under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if a recomputed price cannot be represented.
    pub fn priced(
        &self,
        policy: BundlePricePolicy,
        services: &[Service],
    ) -> Result<Bundle, PricingError> {
        let mut bundle = self.clone();
        bundle.data.price = self.price_under(policy, services)?;

        Ok(bundle)
    }
}

/// Computes a bundle's discounted price.
///
/// `round(Σ price of services whose id is a member × (100 − discount) / 100)`.
/// Member ids with no matching service are skipped, and each service counts
/// once however many times it is listed.
///
/// # Errors
///
/// Returns [`PricingError`] if the price cannot be represented.
pub fn bundle_price(
    discount: Decimal,
    service_ids: &[ServiceId],
    services: &[Service],
) -> Result<Decimal, PricingError> {
    let subtotal = total_price(members_of(service_ids, services).map(Service::price))?;

    discounted_price(subtotal, discount)
}

fn members_of<'a>(
    service_ids: &[ServiceId],
    services: &'a [Service],
) -> impl Iterator<Item = &'a Service> {
    let wanted: FxHashSet<ServiceId> = service_ids.iter().copied().collect();

    services
        .iter()
        .filter(move |service| wanted.contains(&service.id))
}
