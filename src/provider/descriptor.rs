//! Provider descriptor data structures shared by all flow stages.
//!
//! A descriptor is immutable once built: endpoint URLs are joined and validated up
//! front so the flow stages never construct URLs at request time.

/// Builder API for assembling provider descriptors.
pub mod builder;

pub use builder::*;

// self
use crate::_prelude::*;

/// Production OAuth site operated by the BankID consortium.
pub const PRODUCTION_OAUTH_SITE: &str = "https://bankid.org.ua";
/// Production data site serving checked customer records.
pub const PRODUCTION_DATA_SITE: &str = "https://biprocessing.org.ua";
/// Sandbox site serving both OAuth and data endpoints for integration testing.
pub const SANDBOX_SITE: &str = "https://bankid.privatbank.ua";

/// Endpoint set resolved from a descriptor's sites and paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	/// Authorization (consent) endpoint the host redirects users to.
	pub authorize: Url,
	/// Token endpoint used for the authorization-code exchange.
	pub token: Url,
	/// Checked customer data endpoint.
	pub customer_data: Url,
}

/// Immutable provider descriptor consumed by the verifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
	/// Endpoint definitions resolved at build time.
	pub endpoints: ProviderEndpoints,
	/// Whether TLS certificates are verified; `false` is a sandbox-only opt-in scoped to
	/// the HTTP client built from this descriptor, never a process-wide setting.
	pub tls_verify: bool,
	/// Timeout applied to every outbound provider request.
	pub timeout: StdDuration,
}
impl ProviderDescriptor {
	/// Creates a new builder with BankID's default paths.
	pub fn builder() -> ProviderDescriptorBuilder {
		ProviderDescriptorBuilder::new()
	}

	/// Descriptor preset for the production consortium endpoints.
	pub fn production() -> Result<Self, ProviderDescriptorError> {
		Self::builder()
			.oauth_site(parse_site(PRODUCTION_OAUTH_SITE)?)
			.data_site(parse_site(PRODUCTION_DATA_SITE)?)
			.build()
	}

	/// Descriptor preset for the PrivatBank sandbox.
	///
	/// TLS verification stays enabled; the sandbox's self-signed certificates require an
	/// explicit [`ProviderDescriptorBuilder::tls_verify`] opt-out on top of this preset.
	pub fn sandbox() -> Result<Self, ProviderDescriptorError> {
		let site = parse_site(SANDBOX_SITE)?;

		Self::builder().oauth_site(site.clone()).data_site(site).build()
	}
}

fn parse_site(raw: &str) -> Result<Url, ProviderDescriptorError> {
	Url::parse(raw).map_err(|source| ProviderDescriptorError::InvalidSite { source })
}

