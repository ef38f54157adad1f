//! App Context

use std::sync::Arc;

use jobstack::{
    bundles::BundlePricePolicy,
    defaults::{Defaults, DefaultsError},
};
use thiserror::Error;

use crate::{
    admin::{AdminGate, AdminService, SessionStore},
    checkout::{CheckoutService, FormSubmitter, FormsClient},
    config::AppConfig,
    gateway::{CatalogGateway, PostgrestGateway},
    reconcile::{self, Provenance, ReconcileError},
    state::AppState,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("built-in defaults are invalid")]
    Defaults(#[from] DefaultsError),

    #[error("failed to reconcile catalog")]
    Reconcile(#[from] ReconcileError),
}

#[derive(Clone)]
pub struct AppContext {
    pub gateway: Arc<dyn CatalogGateway>,
    pub forms: Arc<dyn FormSubmitter>,
    pub defaults: Defaults,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the embedded defaults cannot be parsed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        Ok(Self {
            gateway: Arc::new(PostgrestGateway::new(&config.store)),
            forms: Arc::new(FormsClient::new(&config.forms.forms_url)),
            defaults: Defaults::builtin()?,
        })
    }

    /// Load the catalog into a fresh session state.
    ///
    /// # Errors
    ///
    /// Returns an error when the default settings cannot be merged.
    pub async fn load_state(
        &self,
        pricing: BundlePricePolicy,
    ) -> Result<(AppState, Provenance), AppInitError> {
        let reconciled = reconcile::load_catalog(self.gateway.as_ref(), &self.defaults).await?;

        Ok((
            AppState::new(reconciled.catalog, pricing),
            reconciled.provenance,
        ))
    }

    #[must_use]
    pub fn admin_gate(config: &AppConfig) -> AdminGate {
        AdminGate::new(
            config.admin.admin_password.clone(),
            SessionStore::new(&config.admin.session_file),
        )
    }

    #[must_use]
    pub fn admin(&self) -> AdminService {
        AdminService::new(Arc::clone(&self.gateway))
    }

    #[must_use]
    pub fn checkout(&self, config: &AppConfig) -> CheckoutService {
        CheckoutService::new(Arc::clone(&self.forms), config.forms.clone())
    }
}
