//! Site Settings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::fields::{SETTINGS_FIELDS, to_store};

/// Errors that can occur while reconciling settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings could not be converted to or from their field map.
    #[error("settings encoding failed")]
    Encoding(#[from] serde_json::Error),
}

/// The raw settings row as stored, keyed by whatever names the row carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsRecord(Map<String, Value>);

impl SettingsRecord {
    /// Wrap a raw row.
    pub fn new(row: Map<String, Value>) -> Self {
        Self(row)
    }

    /// A non-empty string stored under `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Unwrap into the raw row.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Global site copy and branding.
///
/// Every field always has a value once reconciled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[expect(missing_docs, reason = "field names are self-describing site copy slots")]
pub struct SiteSettings {
    pub site_title: String,
    pub site_subtitle: String,
    pub logo_url: String,
    pub badge_url: String,
    pub intro_video_id: String,
    pub intro_text: String,
    pub checkout_button_text: String,
    pub catalog_title: String,
    pub catalog_subtitle: String,
    pub hero_headline: String,
    pub hero_subheadline: String,
    pub hero_badge1_title: String,
    pub hero_badge1_subtitle: String,
    pub hero_badge2_title: String,
    pub hero_badge2_subtitle: String,
    pub hero_badge3_title: String,
    pub hero_badge3_subtitle: String,
}

impl SiteSettings {
    /// Merge a stored record over `defaults`, field by field.
    ///
    /// Each field takes the record's `snake_case` value, then its `camelCase`
    /// value, then the default. Empty strings and non-string values count as
    /// absent. A missing record yields the defaults unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Encoding`] if the defaults cannot round-trip
    /// through their field map.
    pub fn merge(
        record: Option<&SettingsRecord>,
        defaults: &SiteSettings,
    ) -> Result<SiteSettings, SettingsError> {
        let Some(record) = record else {
            return Ok(defaults.clone());
        };

        let mut merged = defaults.to_field_map()?;

        for mapping in SETTINGS_FIELDS {
            let chosen = record
                .text(mapping.store)
                .or_else(|| record.text(mapping.app));

            if let Some(chosen) = chosen {
                merged.insert(mapping.app.to_string(), Value::from(chosen));
            }
        }

        Ok(serde_json::from_value(Value::Object(merged))?)
    }

    /// The row written to the store, under the store's column names.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Encoding`] if the settings cannot be encoded.
    pub fn to_store_row(&self) -> Result<Map<String, Value>, SettingsError> {
        Ok(to_store(self.to_field_map()?, SETTINGS_FIELDS))
    }

    /// The value of a field by either of its names.
    pub fn get(&self, name: &str) -> Option<String> {
        let app = app_name(name)?;

        self.to_field_map()
            .ok()?
            .get(app)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Replace a field by either of its names.
    ///
    /// Returns the updated settings, or `None` when the name is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Encoding`] if the settings cannot be encoded.
    pub fn with_field(&self, name: &str, value: &str) -> Result<Option<Self>, SettingsError> {
        let Some(app) = app_name(name) else {
            return Ok(None);
        };

        let mut fields = self.to_field_map()?;
        fields.insert(app.to_string(), Value::from(value));

        Ok(Some(serde_json::from_value(Value::Object(fields))?))
    }

    /// Page title used for the storefront, `"<title> | <subtitle>"`.
    pub fn page_title(&self) -> String {
        format!("{} | {}", self.site_title, self.site_subtitle)
    }

    fn to_field_map(&self) -> Result<Map<String, Value>, SettingsError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }
}

fn app_name(name: &str) -> Option<&'static str> {
    SETTINGS_FIELDS
        .iter()
        .find(|mapping| mapping.store == name || mapping.app == name)
        .map(|mapping| mapping.app)
}
