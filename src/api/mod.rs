//! API service modules for Sharesies endpoints.
//!
//! Each service provides methods for interacting with a specific
//! subset of the Sharesies API.

mod identity;
mod instruments;
mod orders;

pub use identity::IdentityService;
pub use instruments::InstrumentsService;
pub use orders::OrdersService;
