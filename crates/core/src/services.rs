//! Services

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ids::TypedId, pricing::format_plain, serde_helpers::null_as_default};

/// Service identifier
pub type ServiceId = TypedId<Service>;

/// How a service is priced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingModel {
    /// A single fixed price.
    #[default]
    Fixed,

    /// A starting price; the final price depends on scope.
    Variable,

    /// A setup price plus a monthly price.
    Hybrid,
}

/// A screenshot shown on a service's detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    /// Image URL
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// Short caption
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,

    /// Longer description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// Everything about a service except its identity and position.
///
/// This is the payload written to the store on insert and edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    /// Display name
    pub name: String,

    /// One-line description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Rich-text details
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: String,

    /// Price, or setup price for hybrid pricing
    #[serde(with = "crate::serde_helpers::amount")]
    pub price: Decimal,

    /// Monthly price for hybrid pricing
    #[serde(default, with = "crate::serde_helpers::amount_option")]
    pub monthly_price: Option<Decimal>,

    /// Pricing model
    #[serde(default, deserialize_with = "null_as_default")]
    pub pricing_model: PricingModel,

    /// Deliverables, in display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub deliverables: Vec<String>,

    /// Timeline text, e.g. "5 business days"
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline: String,

    /// Optional video reference
    #[serde(default, deserialize_with = "null_as_default")]
    pub youtube_video_id: Option<String>,

    /// Screenshots, in display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub screenshots: Vec<Screenshot>,

    /// Display colour theme
    #[serde(default = "default_color_theme", deserialize_with = "color_theme_or_default")]
    pub color_theme: String,

    /// SEO title override
    #[serde(default, deserialize_with = "null_as_default")]
    pub seo_title: String,

    /// SEO description override
    #[serde(default, deserialize_with = "null_as_default")]
    pub seo_description: String,
}

/// A purchasable unit of scoped work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Identifier, assigned by the store or provisionally by the client
    pub id: ServiceId,

    /// Position in the catalog
    #[serde(default, deserialize_with = "null_as_default")]
    pub sort_order: i64,

    /// Service content
    #[serde(flatten)]
    pub data: ServiceData,
}

impl Service {
    /// Creates a service from its identity and content.
    pub fn new(id: ServiceId, sort_order: i64, data: ServiceData) -> Self {
        Self {
            id,
            sort_order,
            data,
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Price, or setup price for hybrid pricing
    pub fn price(&self) -> Decimal {
        self.data.price
    }

    /// Human readable price, e.g. `From $1200` or `$1200 + $300/mo`.
    pub fn price_label(&self) -> String {
        let price = format_plain(self.data.price);

        match self.data.pricing_model {
            PricingModel::Fixed => format!("${price}"),
            PricingModel::Variable => format!("From ${price}"),
            PricingModel::Hybrid => format!(
                "${price} + ${}/mo",
                format_plain(self.data.monthly_price.unwrap_or_default())
            ),
        }
    }
}

impl ServiceData {
    /// Content with only a name and price set.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            details: String::new(),
            price,
            monthly_price: None,
            pricing_model: PricingModel::Fixed,
            deliverables: Vec::new(),
            timeline: String::new(),
            youtube_video_id: None,
            screenshots: Vec::new(),
            color_theme: default_color_theme(),
            seo_title: String::new(),
            seo_description: String::new(),
        }
    }
}

fn default_color_theme() -> String {
    "primary".to_string()
}

fn color_theme_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|theme| !theme.is_empty())
        .unwrap_or_else(default_color_theme))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn decodes_a_sparse_row_with_defaults() -> TestResult {
        let service: Service = serde_json::from_value(json!({
            "id": 9,
            "name": "Smart CRM Updates",
            "price": 850,
            "details": null,
            "deliverables": null,
            "colorTheme": null,
            "sortOrder": null,
        }))?;

        assert_eq!(service.id, ServiceId::new(9));
        assert_eq!(service.sort_order, 0);
        assert_eq!(service.price(), Decimal::from(850));
        assert_eq!(service.data.pricing_model, PricingModel::Fixed);
        assert_eq!(service.data.color_theme, "primary");
        assert!(service.data.deliverables.is_empty());
        assert!(service.data.monthly_price.is_none());

        Ok(())
    }

    #[test]
    fn price_labels_follow_the_pricing_model() {
        let mut data = ServiceData::new("Audit", Decimal::from(1200));
        let fixed = Service::new(ServiceId::new(1), 0, data.clone());

        data.pricing_model = PricingModel::Variable;
        let variable = Service::new(ServiceId::new(2), 1, data.clone());

        data.pricing_model = PricingModel::Hybrid;
        data.monthly_price = Some(Decimal::from(300));
        let hybrid = Service::new(ServiceId::new(3), 2, data);

        assert_eq!(fixed.price_label(), "$1200");
        assert_eq!(variable.price_label(), "From $1200");
        assert_eq!(hybrid.price_label(), "$1200 + $300/mo");
    }

    #[test]
    fn serializes_content_without_identity() -> TestResult {
        let data = ServiceData::new("Audit", Decimal::from(1200));
        let value = serde_json::to_value(&data)?;

        assert_eq!(value["name"], "Audit");
        assert_eq!(value["price"], json!(1200));
        assert_eq!(value["pricingModel"], "fixed");
        assert!(value.get("id").is_none());

        Ok(())
    }
}
