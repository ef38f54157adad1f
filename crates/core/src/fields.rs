//! Field Mapping
//!
//! The store names columns in `snake_case`; the application model uses
//! `camelCase`. Every rename between the two goes through one of the tables
//! below, applied once at the gateway boundary.

use serde_json::{Map, Value};

/// A single column rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Column name in the store
    pub store: &'static str,

    /// Field name in the application model
    pub app: &'static str,
}

const fn field(store: &'static str, app: &'static str) -> FieldMapping {
    FieldMapping { store, app }
}

/// Renames applied to `services` rows.
pub const SERVICE_FIELDS: &[FieldMapping] = &[
    field("youtube_video_id", "youtubeVideoId"),
    field("color_theme", "colorTheme"),
    field("pricing_model", "pricingModel"),
    field("monthly_price", "monthlyPrice"),
    field("seo_title", "seoTitle"),
    field("seo_description", "seoDescription"),
    field("sort_order", "sortOrder"),
];

/// Renames applied to `bundles` rows.
///
/// The bundles table stores its columns under the application's names.
pub const BUNDLE_FIELDS: &[FieldMapping] = &[];

/// Renames applied to the `ui_settings` row.
pub const SETTINGS_FIELDS: &[FieldMapping] = &[
    field("site_title", "siteTitle"),
    field("site_subtitle", "siteSubtitle"),
    field("logo_url", "logoUrl"),
    field("badge_url", "badgeUrl"),
    field("intro_video_id", "introVideoId"),
    field("intro_text", "introText"),
    field("checkout_button_text", "checkoutButtonText"),
    field("catalog_title", "catalogTitle"),
    field("catalog_subtitle", "catalogSubtitle"),
    field("hero_headline", "heroHeadline"),
    field("hero_subheadline", "heroSubheadline"),
    field("hero_badge1_title", "heroBadge1Title"),
    field("hero_badge1_subtitle", "heroBadge1Subtitle"),
    field("hero_badge2_title", "heroBadge2Title"),
    field("hero_badge2_subtitle", "heroBadge2Subtitle"),
    field("hero_badge3_title", "heroBadge3Title"),
    field("hero_badge3_subtitle", "heroBadge3Subtitle"),
];

/// Rename a store row into the application's field names.
///
/// When a row carries both spellings of a field the store's `snake_case`
/// value wins. Unmapped keys pass through untouched.
pub fn from_store(mut row: Map<String, Value>, table: &[FieldMapping]) -> Map<String, Value> {
    for mapping in table {
        if let Some(value) = row.remove(mapping.store) {
            row.insert(mapping.app.to_string(), value);
        }
    }

    row
}

/// Rename an application payload into the store's column names.
///
/// Unmapped keys pass through untouched.
pub fn to_store(mut payload: Map<String, Value>, table: &[FieldMapping]) -> Map<String, Value> {
    for mapping in table {
        if let Some(value) = payload.remove(mapping.app) {
            payload.insert(mapping.store.to_string(), value);
        }
    }

    payload
}
