//! Auth-domain models: redacted access tokens, raw customer records, and the normalized
//! identity projection.

pub mod customer;
pub mod identity;
pub mod token;

pub use customer::*;
pub use identity::*;
pub use token::*;
