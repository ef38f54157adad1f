//! Application State
//!
//! The catalog and scope a session works on. Held in memory for the life of
//! the process; only the admin flag is persisted, see [`crate::admin::session`].

use jobstack::{
    bundles::{BundleId, BundlePricePolicy},
    catalog::{Catalog, CatalogError},
    scope::{Scope, ScopeItem, ScopeItemId},
    services::ServiceId,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub scope: Scope,
    pub pricing: BundlePricePolicy,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, pricing: BundlePricePolicy) -> Self {
        Self {
            catalog,
            scope: Scope::new(),
            pricing,
        }
    }

    /// Add a copy of a catalog service to the scope.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownService`] if the service is not listed.
    pub fn add_service_to_scope(&mut self, id: ServiceId) -> Result<ScopeItemId, CatalogError> {
        let service = self
            .catalog
            .service(id)
            .ok_or(CatalogError::UnknownService(id))?;

        Ok(self.scope.add_service(service))
    }

    /// Add a copy of a catalog bundle, priced under the session's policy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownBundle`] if the bundle is not listed.
    pub fn add_bundle_to_scope(&mut self, id: BundleId) -> Result<ScopeItemId, CatalogError> {
        let bundle = self.catalog.priced_bundle(id, self.pricing)?;

        Ok(self.scope.add_bundle(&bundle))
    }

    /// Remove a scope entry by its tag.
    pub fn remove_from_scope(&mut self, unique_id: ScopeItemId) -> Option<ScopeItem> {
        self.scope.remove(unique_id)
    }
}
