//! Checkout service.

use std::sync::Arc;

use jobstack::checkout::{ContactDetails, FormSubmission, OrderSummary, PageContext};
use rust_decimal::Decimal;
use tracing::{error, info};

use crate::{
    checkout::{
        errors::{CheckoutError, FormsError},
        forms::FormSubmitter,
    },
    config::FormsConfig,
    state::AppState,
};

/// Marker the endpoint uses in errors about the portal identifier.
const PORTAL_ID_MARKER: &str = "PortalId";

/// Outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub first_name: String,
    pub email: String,
    pub entries: usize,
    pub total: Decimal,
}

#[derive(Clone)]
pub struct CheckoutService {
    forms: Arc<dyn FormSubmitter>,
    config: FormsConfig,
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CheckoutService {
    #[must_use]
    pub fn new(forms: Arc<dyn FormSubmitter>, config: FormsConfig) -> Self {
        Self { forms, config }
    }

    /// Submit the scope with `contact` and clear it on success.
    ///
    /// Everything that can be checked locally is checked before the single
    /// network call. The scope is left untouched on failure.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyScope`]: nothing to submit.
    /// - [`CheckoutError::MissingContact`]: a contact field is blank.
    /// - [`CheckoutError::Configuration`]: the portal or form id is absent,
    ///   or the endpoint rejected the portal id.
    /// - [`CheckoutError::Submission`]: any other endpoint failure.
    pub async fn submit(
        &self,
        state: &mut AppState,
        contact: &ContactDetails,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        if state.scope.is_empty() {
            return Err(CheckoutError::EmptyScope);
        }

        if let Some(field) = contact.missing_field() {
            return Err(CheckoutError::MissingContact(field));
        }

        let summary = OrderSummary::from_scope(&state.scope)?;

        let portal_id = self
            .config
            .portal_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CheckoutError::Configuration("portal id is not set".to_string()))?;

        let form_id = self
            .config
            .form_guid
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CheckoutError::Configuration("form id is not set".to_string()))?;

        let context = PageContext {
            page_uri: self.config.storefront_url.clone(),
            page_name: state.catalog.settings().page_title(),
        };

        let submission = FormSubmission::new(contact, &summary, context);

        self.forms
            .submit(portal_id, form_id, submission)
            .await
            .map_err(classify)?;

        let receipt = CheckoutReceipt {
            first_name: contact.first_name.clone(),
            email: contact.email.clone(),
            entries: state.scope.len(),
            total: summary.total,
        };

        state.scope.clear();

        info!(entries = receipt.entries, total = %receipt.total, "checkout submitted");

        Ok(receipt)
    }
}

fn classify(source: FormsError) -> CheckoutError {
    error!(%source, "checkout submission failed");

    if source.message().contains(PORTAL_ID_MARKER) {
        CheckoutError::Configuration(source.message())
    } else {
        CheckoutError::Submission(source)
    }
}
