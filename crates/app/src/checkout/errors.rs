//! Checkout errors.

use jobstack::pricing::PricingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("form submission rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl FormsError {
    /// The endpoint's own explanation, when it gave one.
    pub fn message(&self) -> String {
        match self {
            Self::Http(error) => error.to_string(),
            Self::Rejected { message, .. } => message.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("scope is empty")]
    EmptyScope,

    #[error("missing contact field: {0}")]
    MissingContact(&'static str),

    #[error("form endpoint is misconfigured: {0}")]
    Configuration(String),

    #[error("form submission failed")]
    Submission(#[source] FormsError),

    #[error("order total could not be calculated")]
    Pricing(#[from] PricingError),
}
