//! Forms Config

use clap::Args;

/// Form-intake endpoint settings.
#[derive(Debug, Clone, Args)]
pub struct FormsConfig {
    /// Portal the order form belongs to
    #[arg(long, env = "HUBSPOT_PORTAL_ID")]
    pub portal_id: Option<String>,

    /// Order form identifier
    #[arg(long, env = "HUBSPOT_FORM_GUID")]
    pub form_guid: Option<String>,

    /// Form-intake API base URL
    #[arg(long, env = "HUBSPOT_FORMS_URL", default_value = "https://api.hsforms.com")]
    pub forms_url: String,

    /// Storefront URL reported as the submitting page
    #[arg(long, env = "STOREFRONT_URL")]
    pub storefront_url: Option<String>,
}
