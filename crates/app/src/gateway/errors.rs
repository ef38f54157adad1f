//! Gateway errors.

use jobstack::settings::SettingsError;
use serde::Deserialize;
use thiserror::Error;

/// PostgREST's code for "the result contains 0 rows".
pub(crate) const NO_ROWS: &str = "PGRST116";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store rejected request with status {status}: {message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("unexpected response from store")]
    Json(#[from] serde_json::Error),

    #[error("store returned an empty result for a single-row request")]
    Empty,

    #[error("settings could not be encoded")]
    Settings(#[from] SettingsError),
}

impl GatewayError {
    /// Whether the store reported that no row matched, as opposed to failing.
    pub fn is_no_rows(&self) -> bool {
        match self {
            Self::Rejected { code, .. } => code.as_deref() == Some(NO_ROWS),
            Self::Empty => true,
            Self::Http(_) | Self::Json(_) | Self::Settings(_) => false,
        }
    }
}

/// The error body PostgREST sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoreErrorBody {
    #[serde(default)]
    pub(crate) code: Option<String>,

    #[serde(default)]
    pub(crate) message: Option<String>,
}
