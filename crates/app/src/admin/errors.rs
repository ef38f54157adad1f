//! Admin errors.

use jobstack::{catalog::CatalogError, settings::SettingsError};
use thiserror::Error;

use crate::{admin::session::SessionError, gateway::GatewayError};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("admin login required")]
    Unauthorized,

    #[error("invalid password")]
    InvalidPassword,

    #[error("no admin password is configured")]
    NotConfigured,

    #[error("missing required field: {0}")]
    MissingRequiredData(&'static str),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("catalog change failed")]
    Catalog(#[from] CatalogError),

    #[error("settings could not be encoded")]
    Settings(#[from] SettingsError),

    #[error("store rejected {operation}; local change reverted")]
    Rejected {
        operation: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("session state error")]
    Session(#[from] SessionError),
}
