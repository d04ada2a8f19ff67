//! Access token wrapper and the grant returned by the token exchange.

// self
use crate::_prelude::*;

/// Redacted bearer credential keeping sensitive material out of logs.
///
/// The token is opaque: it carries no structure beyond its string value and is attached
/// verbatim to the data request's combined authorization header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);
impl AccessToken {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AccessToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AccessToken").field(&"<redacted>").finish()
	}
}
impl Display for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Credential bundle produced by a successful authorization-code exchange.
#[derive(Clone, Debug)]
pub struct TokenGrant {
	/// Bearer credential for the data request.
	pub access_token: AccessToken,
	/// Token type reported by the provider, when present.
	pub token_type: Option<String>,
	/// Refresh credential, when the provider issues one.
	pub refresh_token: Option<AccessToken>,
	/// Absolute expiry computed from the response's `expires_in`, when present.
	pub expires_at: Option<OffsetDateTime>,
}
