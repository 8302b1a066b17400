//! Access token record mapped from a token endpoint response body.

// crates.io
use serde::{Deserializer, de::Error as _};
// self
use crate::{_prelude::*, auth::secret::TokenSecret};

/// Token issued by the management login endpoint.
///
/// Produced only by deserializing a token endpoint response. Fields the endpoint omits keep
/// their zero value, as do fields sent as `null`, and unknown fields are ignored. The lifetime
/// is accepted as a JSON number or a numeric string. The [`Default`] value is the empty token
/// that every exchange returns when the endpoint does not answer with HTTP 200, so callers
/// detect failure with [`AccessToken::is_empty`] rather than by matching an error.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccessToken {
	/// Opaque bearer credential.
	#[serde(deserialize_with = "null_as_default")]
	pub access_token: TokenSecret,
	/// Opaque credential for the refresh-token grant.
	#[serde(deserialize_with = "null_as_default")]
	pub refresh_token: TokenSecret,
	/// Lifetime of the access token in seconds, when reported.
	#[serde(deserialize_with = "lifetime_seconds")]
	pub expires_in: Option<i64>,
	/// Token type, typically `bearer`.
	#[serde(deserialize_with = "null_as_default")]
	pub token_type: String,
	/// Granted scope, when reported.
	pub scope: Option<String>,
}
impl AccessToken {
	/// Returns `true` when no access token was issued.
	pub fn is_empty(&self) -> bool {
		self.access_token.is_empty()
	}

	/// Returns the `Authorization` header value for management API calls, if a token was
	/// issued.
	pub fn bearer_header(&self) -> Option<String> {
		if self.is_empty() {
			return None;
		}

		Some(format!("Bearer {}", self.access_token.expose()))
	}
}
impl Debug for AccessToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessToken")
			.field("access_token", &(!self.access_token.is_empty()).then_some("<redacted>"))
			.field("refresh_token", &(!self.refresh_token.is_empty()).then_some("<redacted>"))
			.field("expires_in", &self.expires_in)
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.finish()
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LifetimeSeconds {
	Number(i64),
	Text(String),
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lifetime_seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
	D: Deserializer<'de>,
{
	match Option::<LifetimeSeconds>::deserialize(deserializer)? {
		None => Ok(None),
		Some(LifetimeSeconds::Number(seconds)) => Ok(Some(seconds)),
		Some(LifetimeSeconds::Text(text)) => text
			.trim()
			.parse()
			.map(Some)
			.map_err(|_| D::Error::custom(format!("invalid token lifetime `{text}`"))),
	}
}
