//! Token acquisition paths orchestrated by [`TokenClient`].
//!
//! Every path converges on a single exchange primitive: build a form-encoded `POST` with
//! HTTP Basic client authentication, submit it through a fresh transport handle, and map the
//! response. Only configuration problems and transport failures surface as errors; an
//! endpoint that does not answer with HTTP 200 yields an empty [`AccessToken`].

mod password;
mod refresh;

// crates.io
use oauth2::AsyncHttpClient;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	config::{self, ConfigLoader, ConfigLocation, ConfigSource},
	http::TokenHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, ExchangeOutcome, ExchangeSpan, GrantKind},
};
#[cfg(feature = "reqwest")]
use crate::{
	config::PropertiesFileLoader, http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper,
};

#[cfg(feature = "reqwest")]
/// Token client specialized for the crate's default reqwest transport stack.
pub type ReqwestTokenClient = TokenClient<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Obtains management API access tokens from an OAuth 2.0 token endpoint.
///
/// The client holds no mutable state. Configuration is resolved through the injected
/// [`ConfigLoader`] on every call that needs it, and every exchange takes a fresh handle from
/// the transport, so one client can be shared freely across tasks.
#[derive(Clone)]
pub struct TokenClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound token request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	/// Loader that turns the resolved location into configuration.
	pub config_loader: Arc<dyn ConfigLoader>,
	/// Where the configuration location is read from.
	pub config_location: ConfigLocation,
}
impl<C, M> TokenClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a client that reuses the caller-provided transport + mapper pair and reads its
	/// configuration location from [`CONFIG_FILE_PATH_ENV`](config::CONFIG_FILE_PATH_ENV).
	pub fn with_http_client(
		config_loader: Arc<dyn ConfigLoader>,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			config_loader,
			config_location: ConfigLocation::default(),
		}
	}

	/// Replaces the configuration location indicator.
	pub fn with_config_location(mut self, location: ConfigLocation) -> Self {
		self.config_location = location;

		self
	}

	/// Resolves the configuration location and loads it.
	///
	/// Fails with [`ConfigError`](crate::error::ConfigError) when the location is absent or
	/// blank, when the loader fails, or when the loader produced no configuration. Nothing is
	/// cached, so every call consults the location and the loader again.
	pub fn config_properties(&self) -> Result<ConfigSource> {
		Ok(config::resolve(&self.config_location, self.config_loader.as_ref())?)
	}

	/// Submits one token request and maps the response.
	async fn exchange(
		&self,
		grant: GrantKind,
		url: &str,
		client_id: &str,
		client_secret: &str,
		form: &[(&str, &str)],
	) -> Result<AccessToken> {
		let request = oauth::token_request(url, client_id, client_secret, form)
			.map_err(obs::config_failure)?;
		let handle = self.http_client.handle();
		let response = handle
			.call(request)
			.await
			.map_err(|err| {
				obs::transport_failure(self.transport_mapper.map_transport_error(grant, err))
			})?;

		Ok(oauth::token_from_response(&response))
	}
}
#[cfg(feature = "reqwest")]
impl TokenClient<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a client backed by the default reqwest transport.
	pub fn new(config_loader: Arc<dyn ConfigLoader>) -> Result<Self> {
		let http_client = ReqwestHttpClient::new().map_err(obs::config_failure)?;

		Ok(Self::with_http_client(
			config_loader,
			http_client,
			Arc::new(ReqwestTransportErrorMapper),
		))
	}

	/// Creates a client that reads `.properties` files named by the
	/// [`CONFIG_FILE_PATH_ENV`](config::CONFIG_FILE_PATH_ENV) environment variable.
	pub fn from_properties_file() -> Result<Self> {
		Self::new(Arc::new(PropertiesFileLoader))
	}
}
impl<C, M> Debug for TokenClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenClient").field("config_location", &self.config_location).finish()
	}
}

/// Runs `fut` inside an exchange span and records its outcome.
async fn observed<F>(grant: GrantKind, stage: &'static str, fut: F) -> Result<AccessToken>
where
	F: Future<Output = Result<AccessToken>>,
{
	obs::record_exchange_outcome(grant, ExchangeOutcome::Attempt);

	let result = ExchangeSpan::new(grant, stage).instrument(fut).await;
	let outcome = match &result {
		Ok(token) if token.is_empty() => ExchangeOutcome::Empty,
		Ok(_) => ExchangeOutcome::Issued,
		Err(_) => ExchangeOutcome::Failure,
	};

	obs::record_exchange_outcome(grant, outcome);

	result
}
