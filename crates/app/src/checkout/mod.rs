//! Checkout Submission

pub mod errors;
pub mod forms;
pub mod service;

pub use errors::{CheckoutError, FormsError};
pub use forms::*;
pub use service::*;
