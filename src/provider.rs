//! Provider-facing configuration (data) and the secret-derivation seam (behavior).
//!
//! `descriptor` exposes validated, immutable endpoint metadata ([`ProviderDescriptor`])
//! covering the OAuth and data sites, the BankID token/authorize paths, the per-client
//! TLS-verification toggle, and the network timeout. `secret` defines
//! [`SecretDeriver`], the seam that computes the provider's code-bound client secret so
//! token-exchange tests can substitute a fixed deriver without touching the network.

pub mod descriptor;
pub mod secret;

pub use descriptor::*;
pub use secret::*;
