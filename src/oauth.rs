//! Token endpoint wire format: request building, response classification, and transport
//! error mapping.

pub use oauth2;

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{
		Method, Request, StatusCode,
		header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
	},
};
use url::form_urlencoded::Serializer;
// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	error::{ConfigError, TransportError},
	obs::GrantKind,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Maps HTTP transport failures into client [`Error`] values.
pub trait TransportErrorMapper<E>
where
	Self: 'static + Send + Sync,
	E: 'static + Send + Sync + StdError,
{
	/// Converts an [`HttpClientError`] emitted by the transport into a client error.
	fn map_transport_error(&self, grant: GrantKind, error: HttpClientError<E>) -> Error;
}

/// Default mapper for reqwest-backed transports.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransportErrorMapper;
#[cfg(feature = "reqwest")]
impl TransportErrorMapper<ReqwestError> for ReqwestTransportErrorMapper {
	fn map_transport_error(&self, grant: GrantKind, err: HttpClientError<ReqwestError>) -> Error {
		match err {
			HttpClientError::Reqwest(inner) => map_reqwest_error(grant, *inner),
			HttpClientError::Http(inner) => ConfigError::from(inner).into(),
			HttpClientError::Io(inner) => TransportError::Io(inner).into(),
			HttpClientError::Other(message) =>
				TransportError::Network { source: message.into() }.into(),
			_ => TransportError::Network {
				source: "HTTP client error occurred while calling the token endpoint.".into(),
			}
			.into(),
		}
	}
}

/// Builds the HTTP Basic `Authorization` value for a client id/secret pair.
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
	format!("Basic {}", STANDARD.encode(format!("{client_id}:{client_secret}")))
}

/// Appends the second-factor code to `url` as a literal `mfa_token` query parameter.
///
/// Neither the URL nor the code is escaped or merged with an existing query string; the
/// caller supplies a URL without one and a code without reserved characters.
pub fn mfa_url(url: &str, mfa: &str) -> String {
	format!("{url}?mfa_token={mfa}")
}

/// Builds the `POST` request for a token exchange with a form-urlencoded body in `form`
/// order.
pub fn token_request(
	url: &str,
	client_id: &str,
	client_secret: &str,
	form: &[(&str, &str)],
) -> Result<HttpRequest, ConfigError> {
	let body = Serializer::new(String::new()).extend_pairs(form).finish();

	Request::builder()
		.method(Method::POST)
		.uri(url)
		.header(AUTHORIZATION, basic_authorization(client_id, client_secret))
		.header(CONTENT_TYPE, FORM_CONTENT_TYPE)
		.header(ACCEPT, JSON_CONTENT_TYPE)
		.body(body.into_bytes())
		.map_err(ConfigError::from)
}

/// Maps a token endpoint response to an [`AccessToken`].
///
/// Only HTTP 200 is parsed. Any other status, or a 200 whose body is not a JSON token
/// object, yields the empty token.
pub fn token_from_response(response: &HttpResponse) -> AccessToken {
	let status = response.status();

	if status != StatusCode::OK {
		tracing::warn!(status = status.as_u16(), "token endpoint did not issue a token");

		return AccessToken::default();
	}

	let mut de = serde_json::Deserializer::from_slice(response.body());
	let parsed: Result<AccessToken, _> = serde_path_to_error::deserialize(&mut de);

	match parsed {
		Ok(token) => token,
		Err(e) => {
			tracing::warn!(
				path = %e.path(),
				error = %e.inner(),
				"token endpoint returned malformed JSON"
			);

			AccessToken::default()
		},
	}
}

#[cfg(feature = "reqwest")]
fn map_reqwest_error(grant: GrantKind, err: ReqwestError) -> Error {
	tracing::debug!(grant = grant.as_str(), error = %err, "token request failed in transport");

	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::from(err).into()
}
