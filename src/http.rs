//! Transport primitives for the verification flow.
//!
//! The module owns reqwest client construction so the descriptor's timeout and TLS
//! settings apply to this flow's client instance only, plus the combined authorization
//! header format and the transport error mapping that keeps timeouts distinguishable
//! from other network failures.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError, obs::FlowStage, provider::ProviderDescriptor};

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Provider requests never follow redirects: both the token and data endpoints return
/// results directly, and a redirect would leak the combined authorization header to an
/// unrelated host. TLS relaxation for the sandbox is scoped to the wrapped client, never
/// applied process-wide.
#[derive(Clone)]
pub struct ProviderHttpClient(ReqwestClient);
impl ProviderHttpClient {
	/// Builds a client honoring the descriptor's timeout and TLS-verification flag.
	pub fn from_descriptor(descriptor: &ProviderDescriptor) -> Result<Self> {
		let mut builder = ReqwestClient::builder()
			.timeout(descriptor.timeout)
			.redirect(reqwest::redirect::Policy::none());

		if !descriptor.tls_verify {
			builder = builder.danger_accept_invalid_certs(true).danger_accept_invalid_hostnames(true);
		}

		Ok(Self(builder.build().map_err(crate::error::ConfigError::from)?))
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// The caller is responsible for disabling redirect following and configuring
	/// timeouts; prefer [`ProviderHttpClient::from_descriptor`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
impl AsRef<ReqwestClient> for ProviderHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ProviderHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl Debug for ProviderHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ProviderHttpClient(..)")
	}
}

/// Formats the provider's combined authorization scheme.
///
/// Both endpoints expect the literal `Bearer {credential}, Id {client_id}` form: the
/// token exchange sends the derived secret as the credential, the data request sends the
/// access token.
pub(crate) fn combined_authorization(credential: &str, client_id: &str) -> String {
	format!("Bearer {credential}, Id {client_id}")
}

/// Maps transport failures, surfacing timeouts as a distinct error kind.
pub(crate) fn map_transport_error(stage: FlowStage, err: ReqwestError) -> Error {
	if err.is_timeout() {
		return Error::Timeout { stage };
	}

	TransportError::from(err).into()
}
