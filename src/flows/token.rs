//! Authorization-code-to-access-token exchange.
//!
//! BankID's token endpoint deviates from RFC 6749 twice: the request uses GET instead of
//! POST, and client authentication rides in a combined `Bearer {secret}, Id {client_id}`
//! header where the secret is derived from the authorization code being exchanged. No
//! retries happen here; retry policy is a host concern.

// crates.io
use reqwest::header::AUTHORIZATION;
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, TokenGrant},
	error::TokenExchangeError,
	flows::Verifier,
	http,
	obs::{self, FlowOutcome, FlowSpan, FlowStage},
};

#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
	access_token: String,
	#[serde(default)]
	token_type: Option<String>,
	#[serde(default)]
	refresh_token: Option<String>,
	#[serde(default)]
	expires_in: Option<i64>,
}

impl Verifier {
	/// Exchanges an authorization code for an access token.
	///
	/// `redirect_uri` must already be query-stripped; [`VerifyRequest`](crate::flows::VerifyRequest)
	/// guarantees this for the orchestrated flow.
	pub async fn exchange_code(&self, code: &str, redirect_uri: &Url) -> Result<TokenGrant> {
		const STAGE: FlowStage = FlowStage::TokenExchange;

		let span = FlowSpan::new(STAGE, "exchange_code");

		obs::record_flow_outcome(STAGE, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let secret =
					self.secret_deriver.derive(&self.client_id, &self.client_secret_seed, code);
				let response = self
					.http_client
					.get(self.descriptor.endpoints.token.clone())
					.query(&[
						("grant_type", "authorization_code"),
						("client_id", &self.client_id),
						("client_secret", &secret),
						("code", code),
						("redirect_uri", redirect_uri.as_str()),
					])
					.header(AUTHORIZATION, http::combined_authorization(&secret, &self.client_id))
					.send()
					.await
					.map_err(|e| http::map_transport_error(STAGE, e))?;
				let status = response.status();
				let body =
					response.text().await.map_err(|e| http::map_transport_error(STAGE, e))?;

				if !status.is_success() {
					return Err(
						TokenExchangeError::Status { status: status.as_u16(), body }.into()
					);
				}

				parse_token_response(status.as_u16(), &body).map_err(Error::from)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(STAGE, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(STAGE, FlowOutcome::Failure),
		}

		result
	}
}

fn parse_token_response(status: u16, body: &str) -> Result<TokenGrant, TokenExchangeError> {
	let mut deserializer = serde_json::Deserializer::from_str(body);
	let parsed: TokenEndpointResponse = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| TokenExchangeError::Parse { source, status })?;

	if parsed.access_token.is_empty() {
		return Err(TokenExchangeError::EmptyAccessToken);
	}

	let issued_at = OffsetDateTime::now_utc();
	let expires_at = parsed
		.expires_in
		.filter(|secs| *secs > 0)
		.map(|secs| issued_at + Duration::seconds(secs));

	Ok(TokenGrant {
		access_token: AccessToken::new(parsed.access_token),
		token_type: parsed.token_type,
		refresh_token: parsed.refresh_token.map(AccessToken::new),
		expires_at,
	})
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn parse_accepts_minimal_bodies() {
		let grant = parse_token_response(200, "{\"access_token\":\"tok-1\"}")
			.expect("Minimal token bodies should parse.");

		assert_eq!(grant.access_token.expose(), "tok-1");
		assert_eq!(grant.token_type, None);
		assert!(grant.refresh_token.is_none());
		assert!(grant.expires_at.is_none());
	}

	#[test]
	fn parse_computes_absolute_expiry() {
		let body = "{\"access_token\":\"tok-2\",\"token_type\":\"bearer\",\"expires_in\":3600}";
		let grant = parse_token_response(200, body).expect("Token body should parse.");
		let expires_at = grant.expires_at.expect("expires_in should produce an expiry.");

		assert!(expires_at > OffsetDateTime::now_utc() + Duration::seconds(3590));
		assert_eq!(grant.token_type.as_deref(), Some("bearer"));
	}

	#[test]
	fn parse_ignores_non_positive_expiry() {
		let grant = parse_token_response(200, "{\"access_token\":\"tok-3\",\"expires_in\":0}")
			.expect("Token body should parse.");

		assert!(grant.expires_at.is_none());
	}

	#[test]
	fn parse_rejects_malformed_and_empty_bodies() {
		let err = parse_token_response(200, "not-json")
			.expect_err("Malformed bodies must be rejected.");

		assert!(matches!(err, TokenExchangeError::Parse { status: 200, .. }));

		let err = parse_token_response(200, "{\"access_token\":\"\"}")
			.expect_err("Empty access tokens must be rejected.");

		assert!(matches!(err, TokenExchangeError::EmptyAccessToken));
	}
}
