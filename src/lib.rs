//! OAuth 2.0 token acquisition for management API logins: resource-owner password grants
//! (optionally with a second factor) and refresh-token grants against a configurable token
//! endpoint, with connection parameters resolved from an injected configuration loader.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::{ConfigLoader, ConfigLocation, ConfigSource},
		flows::TokenClient,
		http::ReqwestHttpClient,
		oauth::ReqwestTransportErrorMapper,
	};

	/// Token client type alias used by reqwest-backed integration tests.
	pub type ReqwestTestClient = TokenClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

	/// Builds the reqwest transport used by tests; redirects stay disabled like the default
	/// transport so 3xx responses reach the status check.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		ReqwestHttpClient::new().expect("Failed to build Reqwest client for tests.")
	}

	/// Builds an in-memory [`ConfigSource`] from key/value pairs.
	pub fn config_source<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> ConfigSource {
		pairs.into_iter().map(|(key, value)| (key.to_owned(), value.to_owned())).collect()
	}

	/// Constructs a [`TokenClient`] whose loader always returns `source`, located at a fixed
	/// placeholder path.
	pub fn build_reqwest_test_client(source: ConfigSource) -> ReqwestTestClient {
		let loader: Arc<dyn ConfigLoader> =
			Arc::new(move |_: &str| -> Result<Option<ConfigSource>, BoxError> {
				Ok(Some(source.clone()))
			});

		TokenClient::with_http_client(
			loader,
			test_reqwest_http_client(),
			Arc::new(ReqwestTransportErrorMapper),
		)
		.with_config_location(ConfigLocation::Fixed("memory://test".into()))
	}
}

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::Deserialize;
	pub use thiserror::Error as ThisError;

	pub use crate::error::{BoxError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
