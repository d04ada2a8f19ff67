//! BankID Ukraine identity verification client: exchange authorization codes with
//! code-bound derived secrets, fetch checked customer data, and decrypt personal fields
//! best-effort.
//!
//! The crate covers the provider-specific core of the flow only: the host application owns
//! routing, sessions, and the authorization redirect, then hands the callback's authorization
//! code to [`flows::Verifier::verify`] and receives a normalized [`auth::IdentityRecord`]
//! (or a stage-level [`error::Error`]) back.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod http;
pub mod obs;
pub mod provider;

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value as Json;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _};
