//! Data models for the Sharesies API.
//!
//! Models are organized by domain:
//!
//! - [`primitives`] - Identifier newtypes and [`Endpoints`]
//! - [`profile`] - The account snapshot returned by identity and order calls
//! - [`instrument`] - Instrument catalogue requests and results
//! - [`order`] - Order intents, quotes and amount formatting
//!
//! The upstream schema is undocumented, so nested records keep most fields
//! optional and unknown fields are ignored.

pub mod primitives;
pub mod profile;
pub mod instrument;
pub mod order;

// Re-export commonly used types
pub use primitives::*;
pub use profile::*;
pub use instrument::*;
pub use order::*;
