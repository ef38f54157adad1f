//! Store seeding
//!
//! Operator tooling that writes the built-in defaults into an empty or
//! partially populated store. Nothing here is atomic: each row is written on
//! its own, failures are logged and reported, and earlier writes stay.

use jobstack::{
    bundles::BundleData,
    defaults::Defaults,
    services::{Service, ServiceId},
};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{error, info};

use crate::gateway::{CatalogGateway, GatewayError};

/// Names written and names refused, per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcomes {
    pub inserted: Vec<String>,
    pub failed: Vec<String>,
}

impl Outcomes {
    fn record(&mut self, name: &str, result: Result<(), GatewayError>) {
        match result {
            Ok(()) => {
                info!(name, "inserted");
                self.inserted.push(name.to_string());
            }
            Err(source) => {
                error!(name, %source, "insert failed");
                self.failed.push(name.to_string());
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub services: Outcomes,
    pub bundles: Outcomes,
    pub settings_saved: bool,
}

/// What the store currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreCheck {
    pub service_ids: Vec<ServiceId>,
}

impl StoreCheck {
    /// Whether storefronts reading this store fall back to the defaults.
    #[must_use]
    pub fn serving_defaults(&self) -> bool {
        self.service_ids.is_empty()
    }
}

/// Insert every default service, then every default bundle with its members
/// pointed at the identifiers the store assigned, then the default settings.
pub async fn seed(gateway: &dyn CatalogGateway, defaults: &Defaults) -> SeedReport {
    let mut report = SeedReport::default();
    let mut assigned: FxHashMap<ServiceId, ServiceId> = FxHashMap::default();

    for service in &defaults.services {
        let inserted = gateway
            .insert_service(service.sort_order, service.data.clone())
            .await
            .map(|stored| {
                assigned.insert(service.id, stored.id);
            });

        report.services.record(service.name(), inserted);
    }

    for bundle in &defaults.bundles {
        let data = BundleData {
            service_ids: bundle
                .data
                .service_ids
                .iter()
                .filter_map(|id| assigned.get(id).copied())
                .collect(),
            ..bundle.data.clone()
        };

        let inserted = gateway.insert_bundle(data).await.map(|_| ());

        report.bundles.record(bundle.name(), inserted);
    }

    match gateway.save_settings(defaults.settings.clone()).await {
        Ok(()) => {
            info!("settings seeded");
            report.settings_saved = true;
        }
        Err(source) => error!(%source, "failed to seed settings"),
    }

    report
}

/// Insert each default service whose name is missing from the store.
///
/// # Errors
///
/// Returns an error if the stored services cannot be listed.
pub async fn restore(
    gateway: &dyn CatalogGateway,
    defaults: &Defaults,
) -> Result<Outcomes, GatewayError> {
    let stored = gateway.list_services().await?;
    let present: FxHashSet<&str> = stored.iter().map(Service::name).collect();
    let mut next_sort_order = stored
        .iter()
        .map(|service| service.sort_order)
        .max()
        .map_or(0, |last| last.saturating_add(1));

    let mut outcomes = Outcomes::default();

    for service in defaults
        .services
        .iter()
        .filter(|service| !present.contains(service.name()))
    {
        let inserted = gateway
            .insert_service(next_sort_order, service.data.clone())
            .await
            .map(|_| ());

        if inserted.is_ok() {
            next_sort_order = next_sort_order.saturating_add(1);
        }

        outcomes.record(service.name(), inserted);
    }

    Ok(outcomes)
}

/// List the identifiers of the stored services.
///
/// # Errors
///
/// Returns an error if the stored services cannot be listed.
pub async fn check(gateway: &dyn CatalogGateway) -> Result<StoreCheck, GatewayError> {
    let service_ids = gateway
        .list_services()
        .await?
        .iter()
        .map(|service| service.id)
        .collect();

    Ok(StoreCheck { service_ids })
}
