// self
use crate::{
	_prelude::*,
	provider::{ProviderDescriptor, ProviderEndpoints},
};

/// BankID's authorization (consent) path.
pub const DEFAULT_AUTHORIZE_PATH: &str = "/DataAccessService/das/authorize";
/// BankID's token endpoint path.
pub const DEFAULT_TOKEN_PATH: &str = "/DataAccessService/oauth/token";
/// BankID's checked customer data path.
pub const DEFAULT_DATA_PATH: &str = "/ResourceService/checked/data";

const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum ProviderDescriptorError {
	/// OAuth site is required.
	#[error("Missing OAuth site.")]
	MissingOauthSite,
	/// Data site is required.
	#[error("Missing data site.")]
	MissingDataSite,
	/// Non-loopback sites must use HTTPS; sandbox certificate relaxation is a separate
	/// flag.
	#[error("The {site} site must use HTTPS: {url}.")]
	InsecureSite {
		/// Which site failed validation.
		site: &'static str,
		/// Site URL that failed validation.
		url: String,
	},
	/// A preset site constant failed to parse.
	#[error("Site URL could not be parsed.")]
	InvalidSite {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configured path could not be joined onto its site.
	#[error("The {path} path could not be joined onto its site.")]
	InvalidPath {
		/// Which path failed to join.
		path: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// The request timeout must be non-zero.
	#[error("The request timeout must be non-zero.")]
	ZeroTimeout,
}

/// Builder for [`ProviderDescriptor`] values.
#[derive(Debug)]
pub struct ProviderDescriptorBuilder {
	/// Site hosting the authorization and token endpoints.
	pub oauth_site: Option<Url>,
	/// Site hosting the checked customer data endpoint.
	pub data_site: Option<Url>,
	/// Authorization path joined onto the OAuth site.
	pub authorize_path: String,
	/// Token path joined onto the OAuth site.
	pub token_path: String,
	/// Data path joined onto the data site.
	pub data_path: String,
	/// TLS verification flag; defaults to verify-on.
	pub tls_verify: bool,
	/// Request timeout; defaults to 30 seconds.
	pub timeout: StdDuration,
}
impl ProviderDescriptorBuilder {
	/// Creates a new builder seeded with BankID's default paths.
	pub fn new() -> Self {
		Self {
			oauth_site: None,
			data_site: None,
			authorize_path: DEFAULT_AUTHORIZE_PATH.into(),
			token_path: DEFAULT_TOKEN_PATH.into(),
			data_path: DEFAULT_DATA_PATH.into(),
			tls_verify: true,
			timeout: DEFAULT_TIMEOUT,
		}
	}

	/// Sets the OAuth site.
	pub fn oauth_site(mut self, url: Url) -> Self {
		self.oauth_site = Some(url);

		self
	}

	/// Sets the data site.
	pub fn data_site(mut self, url: Url) -> Self {
		self.data_site = Some(url);

		self
	}

	/// Overrides the authorization path.
	pub fn authorize_path(mut self, path: impl Into<String>) -> Self {
		self.authorize_path = path.into();

		self
	}

	/// Overrides the token path.
	pub fn token_path(mut self, path: impl Into<String>) -> Self {
		self.token_path = path.into();

		self
	}

	/// Overrides the customer data path.
	pub fn data_path(mut self, path: impl Into<String>) -> Self {
		self.data_path = path.into();

		self
	}

	/// Overrides TLS verification. Disabling is a sandbox-only opt-in and applies to the
	/// HTTP client built from this descriptor alone.
	pub fn tls_verify(mut self, verify: bool) -> Self {
		self.tls_verify = verify;

		self
	}

	/// Overrides the request timeout.
	pub fn timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Consumes the builder, validates the sites, and resolves the endpoints.
	pub fn build(self) -> Result<ProviderDescriptor, ProviderDescriptorError> {
		let oauth_site = self.oauth_site.ok_or(ProviderDescriptorError::MissingOauthSite)?;
		let data_site = self.data_site.ok_or(ProviderDescriptorError::MissingDataSite)?;

		validate_site("OAuth", &oauth_site)?;
		validate_site("data", &data_site)?;

		if self.timeout.is_zero() {
			return Err(ProviderDescriptorError::ZeroTimeout);
		}

		let endpoints = ProviderEndpoints {
			authorize: join_path(&oauth_site, "authorize", &self.authorize_path)?,
			token: join_path(&oauth_site, "token", &self.token_path)?,
			customer_data: join_path(&data_site, "data", &self.data_path)?,
		};

		Ok(ProviderDescriptor { endpoints, tls_verify: self.tls_verify, timeout: self.timeout })
	}
}
impl Default for ProviderDescriptorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

fn validate_site(name: &'static str, url: &Url) -> Result<(), ProviderDescriptorError> {
	if url.scheme() == "https" {
		return Ok(());
	}

	// Plain HTTP is tolerated for loopback hosts only, so local mock servers work.
	let loopback = match url.host() {
		Some(url::Host::Domain(domain)) => domain == "localhost",
		Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
		Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
		None => false,
	};

	if url.scheme() == "http" && loopback {
		Ok(())
	} else {
		Err(ProviderDescriptorError::InsecureSite { site: name, url: url.to_string() })
	}
}

fn join_path(site: &Url, name: &'static str, path: &str) -> Result<Url, ProviderDescriptorError> {
	site.join(path).map_err(|source| ProviderDescriptorError::InvalidPath { path: name, source })
}
