//! Built-in Defaults
//!
//! The catalog served when the store is empty or unreachable, and the source
//! of every settings field the store does not provide.

use serde::Deserialize;
use thiserror::Error;

use crate::{bundles::Bundle, services::Service, settings::SiteSettings};

const CATALOG_YAML: &str = include_str!("defaults/catalog.yml");

/// Errors that can occur while loading the built-in defaults.
#[derive(Debug, Error)]
pub enum DefaultsError {
    /// The embedded document is not valid.
    #[error("failed to parse built-in defaults: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// The built-in catalog and settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Defaults {
    /// Default services, in catalog order
    pub services: Vec<Service>,

    /// Default bundles
    pub bundles: Vec<Bundle>,

    /// Default settings
    pub settings: SiteSettings,
}

impl Defaults {
    /// Load the defaults embedded in the binary.
    ///
    /// # Errors
    ///
    /// Returns [`DefaultsError::Yaml`] if the embedded document does not parse.
    pub fn builtin() -> Result<Self, DefaultsError> {
        Ok(serde_norway::from_str(CATALOG_YAML)?)
    }
}
