//! Normalized identity projection handed back to the host.

// self
use crate::{_prelude::*, auth::RawCustomerRecord, error::IdentityError};

/// Stable identity shape derived from a (possibly partially decrypted) customer record.
///
/// Never persisted by this crate; the host stores it in whatever session mechanism it
/// owns. `raw` carries the full provider payload for audit and extra-data purposes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IdentityRecord {
	/// National tax identifier (`inn`); always non-empty for a successful flow.
	pub id: String,
	/// Given name, when the provider supplied one.
	pub first_name: Option<String>,
	/// Family name, when the provider supplied one.
	pub last_name: Option<String>,
	/// Patronymic, when the provider supplied one.
	pub middle_name: Option<String>,
	/// Email address, when the provider supplied one.
	pub email: Option<String>,
	/// Phone number, when the provider supplied one.
	pub phone: Option<String>,
	/// Full raw customer record as returned by the provider (post-decryption).
	pub raw: Json,
}
impl IdentityRecord {
	/// Projects a customer record into the normalized identity shape.
	///
	/// Pure field mapping; no value-shape validation beyond requiring a non-empty `inn`.
	pub fn normalize(record: RawCustomerRecord) -> Result<Self, IdentityError> {
		let id = match record.get_str("inn") {
			Some(inn) if !inn.is_empty() => inn.to_owned(),
			_ => return Err(IdentityError::MissingTaxId),
		};
		let field = |name: &str| record.get_str(name).map(str::to_owned);
		let identity = Self {
			id,
			first_name: field("firstName"),
			last_name: field("lastName"),
			middle_name: field("middleName"),
			email: field("email"),
			phone: field("phone"),
			raw: record.into_json(),
		};

		Ok(identity)
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn record(value: Json) -> RawCustomerRecord {
		RawCustomerRecord::from_json(value).expect("Fixture record should be an object.")
	}

	#[test]
	fn normalize_projects_identity_fields() {
		let raw = json!({
			"type": "physical",
			"inn": "3334445556",
			"firstName": "Taras",
			"lastName": "Shevchenko",
			"middleName": "Hryhorovych",
			"email": "taras@example.com",
			"phone": "+380501112233",
			"birthDay": "09.03.1814",
		});
		let identity =
			IdentityRecord::normalize(record(raw.clone())).expect("Normalization should succeed.");

		assert_eq!(identity.id, "3334445556");
		assert_eq!(identity.first_name.as_deref(), Some("Taras"));
		assert_eq!(identity.last_name.as_deref(), Some("Shevchenko"));
		assert_eq!(identity.middle_name.as_deref(), Some("Hryhorovych"));
		assert_eq!(identity.email.as_deref(), Some("taras@example.com"));
		assert_eq!(identity.phone.as_deref(), Some("+380501112233"));
		assert_eq!(identity.raw, raw, "The raw payload must pass through unchanged.");
	}

	#[test]
	fn normalize_tolerates_missing_optional_fields() {
		let identity = IdentityRecord::normalize(record(json!({"inn": "111"})))
			.expect("A record with only `inn` should normalize.");

		assert_eq!(identity.id, "111");
		assert_eq!(identity.first_name, None);
		assert_eq!(identity.email, None);
	}

	#[test]
	fn normalize_requires_a_tax_identifier() {
		let missing = IdentityRecord::normalize(record(json!({"firstName": "Taras"})))
			.expect_err("A record without `inn` must not normalize.");

		assert_eq!(missing, IdentityError::MissingTaxId);

		let empty = IdentityRecord::normalize(record(json!({"inn": ""})))
			.expect_err("A record with an empty `inn` must not normalize.");

		assert_eq!(empty, IdentityError::MissingTaxId);
	}
}
