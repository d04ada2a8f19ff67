//! Raw customer record returned by the data endpoint.

// crates.io
use serde_json::Map;
// self
use crate::_prelude::*;

/// Customer record as returned by the data endpoint, keyed by provider field name.
///
/// The record is mutated in place by the field decryptor and otherwise passed through
/// unchanged so the host receives the provider payload verbatim for audit purposes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCustomerRecord(Map<String, Json>);
impl RawCustomerRecord {
	/// Wraps a JSON value, returning `None` unless it is an object.
	pub fn from_json(value: Json) -> Option<Self> {
		match value {
			Json::Object(map) => Some(Self(map)),
			_ => None,
		}
	}

	/// Returns a field's string value, when present and a string.
	pub fn get_str(&self, field: &str) -> Option<&str> {
		self.0.get(field).and_then(Json::as_str)
	}

	/// Returns a field's raw JSON value, when present.
	pub fn get(&self, field: &str) -> Option<&Json> {
		self.0.get(field)
	}

	/// Replaces a field's value; used by the decryptor to substitute plaintext.
	pub(crate) fn set(&mut self, field: &str, value: String) {
		self.0.insert(field.to_owned(), Json::String(value));
	}

	/// Returns true when the provider classified the record as a physical person.
	pub fn is_physical(&self) -> bool {
		self.get_str("type") == Some("physical")
	}

	/// Returns true when the record carries a non-empty signature marker, indicating
	/// encrypted attribute values.
	pub fn has_signature(&self) -> bool {
		self.get_str("signature").is_some_and(|marker| !marker.is_empty())
	}

	/// Consumes the record into its raw JSON payload.
	pub fn into_json(self) -> Json {
		Json::Object(self.0)
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
	fn from_json_requires_an_object() {
		assert!(RawCustomerRecord::from_json(json!({"inn": "123"})).is_some());
		assert!(RawCustomerRecord::from_json(json!("not-an-object")).is_none());
		assert!(RawCustomerRecord::from_json(json!(null)).is_none());
	}

	#[test]
	fn discriminators_read_type_and_signature() {
		let physical = record(json!({"type": "physical", "signature": "abc"}));

		assert!(physical.is_physical());
		assert!(physical.has_signature());

		let juridical = record(json!({"type": "juridical", "signature": ""}));

		assert!(!juridical.is_physical());
		assert!(!juridical.has_signature(), "Empty signature markers must not trigger decryption.");

		let unmarked = record(json!({"inn": "123"}));

		assert!(!unmarked.is_physical());
		assert!(!unmarked.has_signature());
	}

	#[test]
	fn set_replaces_field_values_in_place() {
		let mut rec = record(json!({"inn": "ciphertext", "extra": 7}));

		rec.set("inn", "3334445556".into());

		assert_eq!(rec.get_str("inn"), Some("3334445556"));
		assert_eq!(rec.into_json(), json!({"inn": "3334445556", "extra": 7}));
	}
}
