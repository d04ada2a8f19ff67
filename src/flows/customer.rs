//! Checked customer data retrieval.

// crates.io
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
// self
use crate::{
	_prelude::*,
	auth::{AccessToken, RawCustomerRecord},
	error::CustomerDataError,
	flows::Verifier,
	http,
	obs::{self, FlowOutcome, FlowSpan, FlowStage},
};

/// Fixed field-selection list sent with every data request.
pub const REQUESTED_FIELDS: [&str; 12] = [
	"firstName",
	"middleName",
	"lastName",
	"phone",
	"inn",
	"clId",
	"clIdText",
	"birthDay",
	"email",
	"sex",
	"resident",
	"dateModification",
];

#[derive(Debug, Serialize)]
struct CustomerDataRequest {
	#[serde(rename = "type")]
	kind: &'static str,
	fields: [&'static str; 12],
}

#[derive(Debug, Deserialize)]
struct DataEnvelope {
	#[serde(default)]
	state: String,
	#[serde(default)]
	customer: Option<Json>,
}

impl Verifier {
	/// Retrieves the raw customer record using the access token.
	pub async fn fetch_customer(&self, token: &AccessToken) -> Result<RawCustomerRecord> {
		const STAGE: FlowStage = FlowStage::CustomerData;

		let span = FlowSpan::new(STAGE, "fetch_customer");

		obs::record_flow_outcome(STAGE, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let request = CustomerDataRequest { kind: "physical", fields: REQUESTED_FIELDS };
				let response = self
					.http_client
					.post(self.descriptor.endpoints.customer_data.clone())
					.header(CONTENT_TYPE, "application/json")
					.header(ACCEPT, "application/json")
					.header(
						AUTHORIZATION,
						http::combined_authorization(token.expose(), &self.client_id),
					)
					.json(&request)
					.send()
					.await
					.map_err(|e| http::map_transport_error(STAGE, e))?;
				let status = response.status();
				let body =
					response.text().await.map_err(|e| http::map_transport_error(STAGE, e))?;

				if !status.is_success() {
					return Err(
						CustomerDataError::Status { status: status.as_u16(), body }.into()
					);
				}

				parse_customer_response(status.as_u16(), &body).map_err(Error::from)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(STAGE, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(STAGE, FlowOutcome::Failure),
		}

		result
	}
}

fn parse_customer_response(
	status: u16,
	body: &str,
) -> Result<RawCustomerRecord, CustomerDataError> {
	let mut deserializer = serde_json::Deserializer::from_str(body);
	let envelope: DataEnvelope = serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| CustomerDataError::Parse { source, status })?;

	if envelope.state != "ok" {
		return Err(CustomerDataError::State { state: envelope.state, body: body.to_owned() });
	}

	envelope
		.customer
		.and_then(RawCustomerRecord::from_json)
		.ok_or_else(|| CustomerDataError::MissingCustomer { body: body.to_owned() })
}
