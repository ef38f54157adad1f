//! Checkout
//!
//! Turns a scope and the shopper's contact details into the field list the
//! form-intake endpoint expects.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    pricing::{PricingError, format_grouped, format_plain},
    scope::{Scope, ScopeItem},
};

/// Who is requesting the work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,
}

impl ContactDetails {
    /// The first contact field left blank, by its form field name.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("firstname", &self.first_name),
            ("lastname", &self.last_name),
            ("email", &self.email),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// The order as the shopper will see it in the follow-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    /// Plain-text listing of entries and the total
    pub message: String,

    /// Sum of entry prices
    pub total: Decimal,
}

impl OrderSummary {
    /// Summarise every entry in `scope`.
    ///
    /// ```text
    /// Selected Services:
    /// - Automate Warm Outreach ($1200)
    /// - RevOps Starter Pack ($1755)
    ///
    /// Total Estimated Cost: $2,955
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PricingError`] if the total cannot be represented.
    pub fn from_scope(scope: &Scope) -> Result<Self, PricingError> {
        let total = scope.total()?;

        let lines: Vec<String> = scope
            .items()
            .iter()
            .map(Self::entry_line)
            .collect();

        let message = format!(
            "Selected Services:\n{}\n\nTotal Estimated Cost: ${}",
            lines.join("\n"),
            format_grouped(total)
        );

        Ok(Self { message, total })
    }

    /// The message line listing one scope entry, price without separators.
    #[must_use]
    pub fn entry_line(item: &ScopeItem) -> String {
        format!("- {} (${})", item.name(), format_plain(item.price()))
    }
}

/// A single `{ name, value }` pair in a form submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormField {
    /// Form field name
    pub name: String,

    /// Submitted value
    pub value: String,
}

impl FormField {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// Where the submission came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Storefront URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_uri: Option<String>,

    /// Storefront page title
    pub page_name: String,
}

/// The body posted to the form-intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    /// Submitted fields
    pub fields: Vec<FormField>,

    /// Page context
    pub context: PageContext,
}

impl FormSubmission {
    /// Package contact details and an order summary.
    pub fn new(contact: &ContactDetails, summary: &OrderSummary, context: PageContext) -> Self {
        Self {
            fields: vec![
                FormField::new("email", &contact.email),
                FormField::new("firstname", &contact.first_name),
                FormField::new("lastname", &contact.last_name),
                FormField::new("message", &summary.message),
            ],
            context,
        }
    }

    /// The value submitted under `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}
