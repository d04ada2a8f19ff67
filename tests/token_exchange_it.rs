mod common;

// std
use std::time::Duration;
// crates.io
use httpmock::prelude::*;
use url::Url;
// self
use bankid_client::{
	error::{Error, TokenExchangeError},
	flows::Verifier,
	obs::FlowStage,
};
use common::*;

#[tokio::test]
async fn exchange_sends_a_get_with_the_derived_secret_and_combined_header() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server);
	let secret = derived_secret("valid-code");
	let redirect_uri = Url::parse("https://app.example.com/auth/bankid/callback")
		.expect("Redirect URI should parse.");
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/DataAccessService/oauth/token")
				.query_param("grant_type", "authorization_code")
				.query_param("client_id", CLIENT_ID)
				.query_param("client_secret", &secret)
				.query_param("code", "valid-code")
				.query_param("redirect_uri", redirect_uri.as_str())
				.header("authorization", combined_header(&secret))
				.header_count("(?i)^authorization$", ".*", 1);
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"access-it\",\"token_type\":\"bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let grant = verifier
		.exchange_code("valid-code", &redirect_uri)
		.await
		.expect("Token exchange should succeed against the mock provider.");

	mock.assert_async().await;

	assert_eq!(grant.access_token.expose(), "access-it");
	assert_eq!(grant.token_type.as_deref(), Some("bearer"));
	assert!(grant.expires_at.is_some(), "expires_in must yield an absolute expiry.");
}

#[tokio::test]
async fn secret_changes_with_every_authorization_code() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server);
	let redirect_uri =
		Url::parse("https://app.example.com/callback").expect("Redirect URI should parse.");

	for code in ["code-a", "code-b"] {
		let secret = derived_secret(code);
		let mock = server
			.mock_async(|when, then| {
				when.method(GET)
					.path("/DataAccessService/oauth/token")
					.query_param("code", code)
					.query_param("client_secret", &secret)
					.header("authorization", combined_header(&secret));
				then.status(200)
					.header("content-type", "application/json")
					.body(format!("{{\"access_token\":\"tok-{code}\"}}"));
			})
			.await;

		verifier
			.exchange_code(code, &redirect_uri)
			.await
			.expect("Token exchange should succeed for each code.");
		mock.assert_async().await;
	}

	assert_ne!(derived_secret("code-a"), derived_secret("code-b"));
}

#[tokio::test]
async fn non_success_statuses_surface_with_the_raw_body() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server);
	let redirect_uri =
		Url::parse("https://app.example.com/callback").expect("Redirect URI should parse.");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/DataAccessService/oauth/token");
			then.status(401).body("{\"error\":\"invalid_client\"}");
		})
		.await;

	let err = verifier
		.exchange_code("bad-code", &redirect_uri)
		.await
		.expect_err("A 401 must fail the exchange.");

	match err {
		Error::TokenExchange(TokenExchangeError::Status { status, body }) => {
			assert_eq!(status, 401);
			assert_eq!(body, "{\"error\":\"invalid_client\"}");
		},
		other => panic!("Expected a status error, got: {other:?}."),
	}
}

#[tokio::test]
async fn malformed_token_bodies_surface_as_parse_errors() {
	let server = MockServer::start_async().await;
	let verifier = build_verifier(&server);
	let redirect_uri =
		Url::parse("https://app.example.com/callback").expect("Redirect URI should parse.");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/DataAccessService/oauth/token");
			then.status(200).body("<html>definitely not json</html>");
		})
		.await;

	let err = verifier
		.exchange_code("some-code", &redirect_uri)
		.await
		.expect_err("A non-JSON body must fail the exchange.");

	assert!(matches!(
		err,
		Error::TokenExchange(TokenExchangeError::Parse { status: 200, .. })
	));
}

#[tokio::test]
async fn slow_token_endpoints_surface_as_stage_timeouts() {
	let server = MockServer::start_async().await;
	let descriptor = build_descriptor_with_timeout(&server, Duration::from_millis(250));
	let verifier = Verifier::new(descriptor, CLIENT_ID, CLIENT_SECRET_SEED, TEST_PRIVATE_KEY_PEM)
		.expect("Verifier should build with the embedded test key.");
	let redirect_uri =
		Url::parse("https://app.example.com/callback").expect("Redirect URI should parse.");

	server
		.mock_async(|when, then| {
			when.method(GET).path("/DataAccessService/oauth/token");
			then.status(200)
				.delay(Duration::from_secs(2))
				.body("{\"access_token\":\"too-late\"}");
		})
		.await;

	let err = verifier
		.exchange_code("slow-code", &redirect_uri)
		.await
		.expect_err("A response slower than the timeout must fail.");

	assert!(matches!(err, Error::Timeout { stage: FlowStage::TokenExchange }));
}
