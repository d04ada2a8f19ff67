//! Crate-level error taxonomy shared across flow stages.
//!
//! Stage-level failures (token exchange, customer data, transport) abort the flow and
//! surface through [`Error`]. Per-field decryption failures are deliberately absent from
//! this taxonomy; they are absorbed into the
//! [`DecryptionReport`](crate::flows::DecryptionReport) instead.

// self
use crate::{_prelude::*, obs::FlowStage, provider::ProviderDescriptorError};

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical verification-flow error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token endpoint rejected the exchange or returned an unusable body.
	#[error(transparent)]
	TokenExchange(#[from] TokenExchangeError),
	/// Data endpoint reported no usable customer.
	#[error(transparent)]
	Customer(#[from] CustomerDataError),
	/// Customer record could not be projected into an identity.
	#[error(transparent)]
	Identity(#[from] IdentityError),

	/// Transport reported a connect/read timeout; distinguishable so hosts can retry.
	#[error("Request timed out during the {stage} stage.")]
	Timeout {
		/// Flow stage whose network call timed out.
		stage: FlowStage,
	},
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Configuration and validation failures raised while assembling a verifier.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Configured private key PEM material could not be parsed.
	#[error("Private key PEM material could not be parsed.")]
	PrivateKey {
		/// Underlying PKCS#1/PKCS#8 parsing failure.
		#[source]
		source: BoxError,
	},
	/// Provider descriptor failed validation.
	#[error(transparent)]
	Descriptor(#[from] ProviderDescriptorError),
}
impl ConfigError {
	/// Wraps a transport builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a private key parsing failure inside [`ConfigError`].
	pub fn private_key(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::PrivateKey { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised by the token endpoint exchange.
#[derive(Debug, ThisError)]
pub enum TokenExchangeError {
	/// Token endpoint responded with a non-success status.
	#[error("Token endpoint returned status {status}.")]
	Status {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Raw response body kept for diagnostics.
		body: String,
	},
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure with the failing JSON path.
		#[source]
		source: JsonPathError,
		/// HTTP status code of the unparsable response.
		status: u16,
	},
	/// Token endpoint responded without a usable access token value.
	#[error("Token endpoint returned an empty access token.")]
	EmptyAccessToken,
}

/// Failures raised by the customer data endpoint.
#[derive(Debug, ThisError)]
pub enum CustomerDataError {
	/// Data endpoint reported a non-`ok` state; no customer record is available.
	#[error("Data endpoint reported state `{state}` instead of `ok`.")]
	State {
		/// State discriminator returned by the provider.
		state: String,
		/// Raw response body kept for diagnostics.
		body: String,
	},
	/// Data endpoint responded with a non-success status.
	#[error("Data endpoint returned status {status}.")]
	Status {
		/// HTTP status code returned by the provider.
		status: u16,
		/// Raw response body kept for diagnostics.
		body: String,
	},
	/// Data endpoint responded with malformed JSON.
	#[error("Data endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure with the failing JSON path.
		#[source]
		source: JsonPathError,
		/// HTTP status code of the unparsable response.
		status: u16,
	},
	/// Response state was `ok` but the customer object was missing or not an object.
	#[error("Data endpoint response is missing the customer object.")]
	MissingCustomer {
		/// Raw response body kept for diagnostics.
		body: String,
	},
}

/// Failures raised while normalizing a customer record into an identity.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum IdentityError {
	/// The `inn` tax identifier was absent or empty after decryption.
	#[error("Customer record is missing a usable `inn` tax identifier.")]
	MissingTaxId,
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
