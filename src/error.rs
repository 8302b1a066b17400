//! Client-level error types shared across configuration resolution and token exchanges.
//!
//! Only configuration problems and transport failures are errors. A token endpoint that
//! answers with anything other than HTTP 200 is not an error: the exchange yields an empty
//! [`AccessToken`](crate::auth::AccessToken) instead.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used where collaborators report opaque failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem; raised before any network call.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
}
impl Error {
	/// Returns `true` for configuration failures.
	pub fn is_config(&self) -> bool {
		matches!(self, Self::Config(_))
	}

	/// Returns `true` for transport failures.
	pub fn is_transport(&self) -> bool {
		matches!(self, Self::Transport(_))
	}
}

/// Configuration and argument validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// The configuration location indicator is absent or blank.
	#[error("Configuration location `{indicator}` is not configured.")]
	MissingLocation {
		/// Name of the indicator that was consulted.
		indicator: String,
	},
	/// The configuration loader failed.
	#[error("Something went wrong loading configuration from {location}.")]
	Load {
		/// Location handed to the loader.
		location: String,
		/// Underlying loader failure.
		#[source]
		source: BoxError,
	},
	/// The configuration loader produced nothing.
	#[error("Loaded configuration from {location} is empty.")]
	NotLoaded {
		/// Location handed to the loader.
		location: String,
	},
	/// A required configuration key is absent.
	#[error("Configuration is missing the `{key}` property.")]
	MissingProperty {
		/// Missing key.
		key: &'static str,
	},
	/// The second-factor code is absent or empty.
	#[error("MFA token cannot be empty.")]
	MissingMfa,
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed (for example, an unparseable token URL).
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn config_errors_render_actionable_messages() {
		let err = Error::from(ConfigError::MissingLocation { indicator: "CONFIG_FILE_PATH".into() });

		assert!(err.is_config());
		assert_eq!(err.to_string(), "Configuration location `CONFIG_FILE_PATH` is not configured.");
		assert_eq!(
			ConfigError::MissingProperty { key: "mgmt.login.url" }.to_string(),
			"Configuration is missing the `mgmt.login.url` property."
		);
	}

	#[test]
	fn load_errors_keep_their_source() {
		let err = ConfigError::Load {
			location: "/etc/mgmt.properties".into(),
			source: Box::new(std::io::Error::other("disk on fire")),
		};

		assert_eq!(
			err.source().map(|source| source.to_string()),
			Some("disk on fire".to_owned())
		);
	}
}
