//! Admin
//!
//! The password gate and the catalog mutations it unlocks.

pub mod errors;
pub mod gate;
pub mod service;
pub mod session;

pub use errors::*;
pub use gate::{AdminGate, Authorized};
pub use service::AdminService;
pub use session::{SessionError, SessionStore};
