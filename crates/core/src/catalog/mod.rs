//! Catalog
//!
//! The process-local copy of services, bundles and settings that the
//! storefront renders and the admin edits.

use thiserror::Error;

use crate::{
    bundles::{Bundle, BundleId, BundlePricePolicy},
    pricing::PricingError,
    services::{Service, ServiceId},
    settings::SiteSettings,
};

pub mod changes;

pub use changes::{Change, Undo};

/// Errors that can occur while changing the local catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No service has the given id.
    #[error("service {0} not found")]
    UnknownService(ServiceId),

    /// No bundle has the given id.
    #[error("bundle {0} not found")]
    UnknownBundle(BundleId),

    /// A new order does not list every service exactly once.
    #[error("new order must list every service exactly once")]
    NotAPermutation,

    /// A move refers to a position outside the catalog.
    #[error("cannot move from position {from} to {to} in a catalog of {len}")]
    OutOfRange {
        /// Source position
        from: usize,

        /// Target position
        to: usize,

        /// Number of services
        len: usize,
    },

    /// A price could not be calculated.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Services, bundles and settings as currently held.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    services: Vec<Service>,
    bundles: Vec<Bundle>,
    settings: SiteSettings,
}

impl Catalog {
    /// Creates a catalog, ordering services by sort position then id.
    pub fn new(mut services: Vec<Service>, bundles: Vec<Bundle>, settings: SiteSettings) -> Self {
        services.sort_by_key(|service| (service.sort_order, service.id));

        Self {
            services,
            bundles,
            settings,
        }
    }

    /// Services in display order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Bundles in display order.
    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Current settings.
    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    /// Look up a service.
    pub fn service(&self, id: ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| service.id == id)
    }

    /// Look up a bundle.
    pub fn bundle(&self, id: BundleId) -> Option<&Bundle> {
        self.bundles.iter().find(|bundle| bundle.id == id)
    }

    /// A bundle priced under `policy`.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownBundle`]: no bundle has this id.
    /// - [`CatalogError::Pricing`]: a recomputed price could not be represented.
    pub fn priced_bundle(
        &self,
        id: BundleId,
        policy: BundlePricePolicy,
    ) -> Result<Bundle, CatalogError> {
        let bundle = self.bundle(id).ok_or(CatalogError::UnknownBundle(id))?;

        Ok(bundle.priced(policy, &self.services)?)
    }

    /// Every bundle priced under `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Pricing`] if a recomputed price could not be
    /// represented.
    pub fn priced_bundles(&self, policy: BundlePricePolicy) -> Result<Vec<Bundle>, CatalogError> {
        self.bundles
            .iter()
            .map(|bundle| Ok(bundle.priced(policy, &self.services)?))
            .collect()
    }

    /// Identifier for a service created locally before the store confirms it.
    pub fn provisional_service_id(&self) -> ServiceId {
        self.services
            .iter()
            .map(|service| service.id)
            .fold(ServiceId::new(0), Ord::max)
            .next()
    }

    /// Identifier for a bundle created locally before the store confirms it.
    pub fn provisional_bundle_id(&self) -> BundleId {
        self.bundles
            .iter()
            .map(|bundle| bundle.id)
            .fold(BundleId::new(0), Ord::max)
            .next()
    }

    /// Sort position after the last service.
    pub fn next_sort_order(&self) -> i64 {
        self.services
            .iter()
            .map(|service| service.sort_order)
            .max()
            .map_or(0, |last| last.saturating_add(1))
    }

    /// The service order produced by dragging the service at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::OutOfRange`] if either position is outside the
    /// catalog.
    pub fn move_service(&self, from: usize, to: usize) -> Result<Vec<ServiceId>, CatalogError> {
        let len = self.services.len();

        if from >= len || to >= len {
            return Err(CatalogError::OutOfRange { from, to, len });
        }

        let mut order: Vec<ServiceId> = self.services.iter().map(|service| service.id).collect();
        let moved = order.remove(from);
        order.insert(to, moved);

        Ok(order)
    }

    /// `(id, sort position)` for every service, in display order.
    pub fn sort_orders(&self) -> Vec<(ServiceId, i64)> {
        self.services
            .iter()
            .map(|service| (service.id, service.sort_order))
            .collect()
    }

    /// Replace the service with id `provisional` by the store's record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownService`] if the service is gone.
    pub fn confirm_service(
        &mut self,
        provisional: ServiceId,
        confirmed: Service,
    ) -> Result<(), CatalogError> {
        let slot = self
            .services
            .iter_mut()
            .find(|service| service.id == provisional)
            .ok_or(CatalogError::UnknownService(provisional))?;

        *slot = confirmed;

        Ok(())
    }

    /// Replace the bundle with id `provisional` by the store's record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownBundle`] if the bundle is gone.
    pub fn confirm_bundle(
        &mut self,
        provisional: BundleId,
        confirmed: Bundle,
    ) -> Result<(), CatalogError> {
        let slot = self
            .bundles
            .iter_mut()
            .find(|bundle| bundle.id == provisional)
            .ok_or(CatalogError::UnknownBundle(provisional))?;

        *slot = confirmed;

        Ok(())
    }

    fn service_index(&self, id: ServiceId) -> Result<usize, CatalogError> {
        self.services
            .iter()
            .position(|service| service.id == id)
            .ok_or(CatalogError::UnknownService(id))
    }

    fn bundle_index(&self, id: BundleId) -> Result<usize, CatalogError> {
        self.bundles
            .iter()
            .position(|bundle| bundle.id == id)
            .ok_or(CatalogError::UnknownBundle(id))
    }
}
