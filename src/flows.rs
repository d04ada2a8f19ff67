//! Verification flow orchestration.
//!
//! [`Verifier`] drives the four-stage pipeline for one authorization code: derived-secret
//! token exchange, checked customer data retrieval, best-effort per-field decryption, and
//! identity normalization. Stages run sequentially because each depends on the previous
//! stage's output; a `Verifier` itself is cheaply shareable across concurrent callback
//! requests since everything it holds is read-only after construction.

pub mod customer;
pub mod decrypt;
pub mod token;

pub use customer::*;
pub use decrypt::*;
pub use token::*;

// self
use crate::{
	_prelude::*,
	auth::IdentityRecord,
	http::ProviderHttpClient,
	obs::{self, FlowOutcome, FlowSpan, FlowStage},
	provider::{ProviderDescriptor, SecretDeriver, Sha1SecretDeriver},
};

/// Inbound parameters for one verification flow instance.
///
/// The authorization code is single-use; the callback URL is only used to reconstruct
/// the redirect URI the provider expects, with its query string and fragment removed.
#[derive(Clone, Debug)]
pub struct VerifyRequest {
	/// One-time authorization code from the callback request.
	pub authorization_code: String,
	/// Redirect URI reconstructed from the callback host/path.
	redirect_uri: Url,
}
impl VerifyRequest {
	/// Creates a request from the callback's code and original URL.
	pub fn new(authorization_code: impl Into<String>, callback: Url) -> Self {
		let mut redirect_uri = callback;

		redirect_uri.set_query(None);
		redirect_uri.set_fragment(None);

		Self { authorization_code: authorization_code.into(), redirect_uri }
	}

	/// Returns the query-stripped redirect URI sent to the token endpoint.
	pub fn redirect_uri(&self) -> &Url {
		&self.redirect_uri
	}
}

/// Successful flow outcome: the normalized identity plus per-field decryption outcomes.
#[derive(Debug)]
pub struct Verification {
	/// Normalized identity record for the host to store.
	pub identity: IdentityRecord,
	/// Per-field decryption outcomes; failures here never failed the flow.
	pub decryption: DecryptionReport,
}

/// Coordinates the BankID verification pipeline against a single provider descriptor.
///
/// The verifier owns the HTTP client, descriptor, client credentials, secret deriver,
/// and the RSA decryptor so individual stages can focus on wire logic. All state is
/// immutable after construction.
#[derive(Clone)]
pub struct Verifier {
	/// HTTP client scoped to this descriptor's timeout and TLS settings.
	pub(crate) http_client: ProviderHttpClient,
	/// Provider descriptor with resolved endpoints.
	pub(crate) descriptor: ProviderDescriptor,
	/// Seam computing the code-bound client secret.
	pub(crate) secret_deriver: Arc<dyn SecretDeriver>,
	/// Decryptor holding the private key loaded at construction.
	pub(crate) decryptor: FieldDecryptor,
	/// OAuth client identifier issued by the provider.
	pub(crate) client_id: String,
	/// Static seed folded into every derived secret.
	pub(crate) client_secret_seed: String,
}
impl Verifier {
	/// Creates a verifier, parsing the private key and building the scoped HTTP client.
	pub fn new(
		descriptor: ProviderDescriptor,
		client_id: impl Into<String>,
		client_secret_seed: impl Into<String>,
		private_key_pem: &str,
	) -> Result<Self> {
		let decryptor = FieldDecryptor::from_pem(private_key_pem)?;
		let http_client = ProviderHttpClient::from_descriptor(&descriptor)?;

		Ok(Self {
			http_client,
			descriptor,
			secret_deriver: Arc::new(Sha1SecretDeriver),
			decryptor,
			client_id: client_id.into(),
			client_secret_seed: client_secret_seed.into(),
		})
	}

	/// Replaces the secret deriver; intended for tests exercising the exchanger alone.
	pub fn with_secret_deriver(mut self, deriver: Arc<dyn SecretDeriver>) -> Self {
		self.secret_deriver = deriver;

		self
	}

	/// Replaces the HTTP client with a caller-provided one.
	pub fn with_http_client(mut self, http_client: ProviderHttpClient) -> Self {
		self.http_client = http_client;

		self
	}

	/// Builds the provider consent URL the host should redirect the user to.
	pub fn authorize_url(&self, redirect_uri: &Url) -> Url {
		let mut url = self.descriptor.endpoints.authorize.clone();

		url.query_pairs_mut()
			.append_pair("response_type", "code")
			.append_pair("client_id", &self.client_id)
			.append_pair("redirect_uri", redirect_uri.as_str());

		url
	}

	/// Runs the full verification pipeline for one authorization code.
	///
	/// Stage-level failures abort the flow immediately; per-field decryption failures are
	/// absorbed into the returned [`DecryptionReport`]. No partial identity is ever
	/// returned for a stage-level failure.
	pub async fn verify(&self, request: VerifyRequest) -> Result<Verification> {
		let grant =
			self.exchange_code(&request.authorization_code, request.redirect_uri()).await?;
		let mut record = self.fetch_customer(&grant.access_token).await?;
		let decryption = if record.is_physical() && record.has_signature() {
			let span = FlowSpan::new(FlowStage::Decrypt, "verify").entered();

			obs::record_flow_outcome(FlowStage::Decrypt, FlowOutcome::Attempt);

			let report = self.decryptor.decrypt_record(&mut record);

			// Field failures are absorbed, so the stage itself always succeeds.
			obs::record_flow_outcome(FlowStage::Decrypt, FlowOutcome::Success);
			drop(span);

			report
		} else {
			DecryptionReport::default()
		};
		let identity = IdentityRecord::normalize(record)?;

		Ok(Verification { identity, decryption })
	}
}
impl Debug for Verifier {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Verifier")
			.field("descriptor", &self.descriptor)
			.field("client_id", &self.client_id)
			.finish()
	}
}
