//! Exchanges a callback's authorization code against the PrivatBank sandbox and prints
//! the normalized identity.
//!
//! Expects `BANKID_CLIENT_ID`, `BANKID_CLIENT_SECRET`, `BANKID_PRIVATE_KEY_PATH`, and
//! `BANKID_CODE` in the environment; the code comes from a prior consent redirect built
//! with the `authorize_url` demo.

// std
use std::env;
// crates.io
use color_eyre::Result;
use url::Url;
// self
use bankid_client::{
	flows::{FieldOutcome, Verifier, VerifyRequest},
	provider::ProviderDescriptor,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	// The sandbox's certificate chain has historically been broken; this opt-out is
	// scoped to the one client built from this descriptor.
	let sandbox_site = Url::parse("https://bankid.privatbank.ua")?;
	let descriptor = ProviderDescriptor::builder()
		.oauth_site(sandbox_site.clone())
		.data_site(sandbox_site)
		.tls_verify(false)
		.build()?;
	let verifier = Verifier::new(
		descriptor,
		env::var("BANKID_CLIENT_ID")?,
		env::var("BANKID_CLIENT_SECRET")?,
		&std::fs::read_to_string(env::var("BANKID_PRIVATE_KEY_PATH")?)?,
	)?;
	let callback = Url::parse("https://app.example.com/auth/bankid/callback")?;
	let request = VerifyRequest::new(env::var("BANKID_CODE")?, callback);
	let verification = verifier.verify(request).await?;
	let identity = &verification.identity;

	println!("Verified tax id {}.", identity.id);
	println!(
		"Name: {} {} {}.",
		identity.last_name.as_deref().unwrap_or("-"),
		identity.first_name.as_deref().unwrap_or("-"),
		identity.middle_name.as_deref().unwrap_or("-"),
	);

	for outcome in verification.decryption.outcomes() {
		match outcome {
			FieldOutcome::Decrypted { .. } => println!("Field `{}` decrypted.", outcome.field()),
			FieldOutcome::Absent { .. } => (),
			FieldOutcome::Failed { error, .. } =>
				eprintln!("Field `{}` kept its ciphertext: {error}.", outcome.field()),
		}
	}

	Ok(())
}
