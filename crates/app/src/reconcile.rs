//! Catalog Reconciliation
//!
//! Builds the working catalog from the store, falling back to the built-in
//! defaults wherever the store is empty or unreachable. Defaults are never
//! written back.

use jobstack::{
    catalog::Catalog,
    defaults::Defaults,
    settings::{SettingsError, SiteSettings},
};
use thiserror::Error;
use tracing::{error, info, warn};

use crate::gateway::CatalogGateway;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to merge settings")]
    Settings(#[from] SettingsError),
}

/// Where a part of the catalog came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Store,
    Defaults,
}

/// Origin of each collection after reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Provenance {
    pub services: Origin,
    pub bundles: Origin,
    pub settings: Origin,
}

/// A reconciled catalog and where each part came from.
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub catalog: Catalog,
    pub provenance: Provenance,
}

/// Load services, bundles and settings, substituting defaults as needed.
///
/// A failure fetching either collection replaces both with the defaults. An
/// empty collection is replaced on its own. Settings are merged field by
/// field over the defaults, and a failed settings fetch merges over nothing.
///
/// # Errors
///
/// Returns an error only if the default settings cannot be merged.
pub async fn load_catalog(
    gateway: &dyn CatalogGateway,
    defaults: &Defaults,
) -> Result<Reconciled, ReconcileError> {
    let fetched = async {
        let services = gateway.list_services().await?;
        let bundles = gateway.list_bundles().await?;

        Ok::<_, crate::gateway::GatewayError>((services, bundles))
    }
    .await;

    let (services, services_origin, bundles, bundles_origin) = match fetched {
        Ok((services, bundles)) => {
            let (services, services_origin) = if services.is_empty() {
                warn!("store has no services, serving defaults");
                (defaults.services.clone(), Origin::Defaults)
            } else {
                (services, Origin::Store)
            };

            let (bundles, bundles_origin) = if bundles.is_empty() {
                warn!("store has no bundles, serving defaults");
                (defaults.bundles.clone(), Origin::Defaults)
            } else {
                (bundles, Origin::Store)
            };

            (services, services_origin, bundles, bundles_origin)
        }
        Err(source) => {
            error!(%source, "failed to load catalog, serving defaults");

            (
                defaults.services.clone(),
                Origin::Defaults,
                defaults.bundles.clone(),
                Origin::Defaults,
            )
        }
    };

    let (record, settings_origin) = match gateway.fetch_settings().await {
        Ok(Some(record)) => (Some(record), Origin::Store),
        Ok(None) => {
            warn!("store has no settings row, serving defaults");
            (None, Origin::Defaults)
        }
        Err(source) => {
            error!(%source, "failed to load settings, serving defaults");
            (None, Origin::Defaults)
        }
    };

    let settings = SiteSettings::merge(record.as_ref(), &defaults.settings)?;

    info!(
        services = services.len(),
        bundles = bundles.len(),
        "catalog loaded"
    );

    Ok(Reconciled {
        catalog: Catalog::new(services, bundles, settings),
        provenance: Provenance {
            services: services_origin,
            bundles: bundles_origin,
            settings: settings_origin,
        },
    })
}
