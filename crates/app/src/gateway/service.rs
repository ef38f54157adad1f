//! Catalog gateway service.

use async_trait::async_trait;
use jobstack::{
    bundles::{Bundle, BundleData, BundleId},
    services::{Service, ServiceData, ServiceId},
    settings::{SettingsRecord, SiteSettings},
};
use mockall::automock;

use crate::gateway::errors::GatewayError;

#[automock]
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Lists services ordered by sort position, then id.
    async fn list_services(&self) -> Result<Vec<Service>, GatewayError>;

    /// Inserts a service and returns the stored record.
    async fn insert_service(
        &self,
        sort_order: i64,
        service: ServiceData,
    ) -> Result<Service, GatewayError>;

    /// Updates a service's content and returns the stored record.
    async fn update_service(
        &self,
        id: ServiceId,
        service: ServiceData,
    ) -> Result<Service, GatewayError>;

    /// Deletes a service.
    async fn delete_service(&self, id: ServiceId) -> Result<(), GatewayError>;

    /// Writes every `(id, sort position)` pair in one bulk upsert.
    async fn reorder_services(&self, order: Vec<(ServiceId, i64)>) -> Result<(), GatewayError>;

    /// Lists bundles ordered by id.
    async fn list_bundles(&self) -> Result<Vec<Bundle>, GatewayError>;

    /// Inserts a bundle and returns the stored record.
    async fn insert_bundle(&self, bundle: BundleData) -> Result<Bundle, GatewayError>;

    /// Updates a bundle and returns the stored record.
    async fn update_bundle(&self, id: BundleId, bundle: BundleData)
    -> Result<Bundle, GatewayError>;

    /// Deletes a bundle.
    async fn delete_bundle(&self, id: BundleId) -> Result<(), GatewayError>;

    /// Fetches the settings row, `None` when the store has none.
    async fn fetch_settings(&self) -> Result<Option<SettingsRecord>, GatewayError>;

    /// Upserts the single settings row.
    async fn save_settings(&self, settings: SiteSettings) -> Result<(), GatewayError>;
}
