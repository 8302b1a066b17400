//! Configuration-resolution contract for the token client.
//!
//! The client never reads configuration itself. A [`ConfigLocation`] names where the
//! deployment points at its configuration file, and an injected [`ConfigLoader`] turns that
//! location into a [`ConfigSource`]. Both are consulted on every call, so a missing or broken
//! configuration fails every call instead of being cached.

pub mod properties;

pub use properties::PropertiesFileLoader;

// std
use std::collections::HashMap;
// self
use crate::{_prelude::*, error::ConfigError, obs};

/// Token endpoint used by password and refresh-token grants.
pub const LOGIN_URL: &str = "mgmt.login.url";
/// MFA token endpoint prefix; the raw MFA code is appended to it.
pub const LOGIN_MFA_URL: &str = "mgmt.login.mfa.url";
/// OAuth client identifier sent through HTTP Basic authorization.
pub const CLIENT_ID: &str = "mgmt.login.client.id";
/// OAuth client secret sent through HTTP Basic authorization.
pub const CLIENT_SECRET: &str = "mgmt.login.client.secret";
/// Environment variable consulted by the default [`ConfigLocation`].
pub const CONFIG_FILE_PATH_ENV: &str = "CONFIG_FILE_PATH";

/// Immutable key/value view over a loaded configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigSource(HashMap<String, String>);
impl ConfigSource {
	/// Wraps an existing property map.
	pub fn new(properties: HashMap<String, String>) -> Self {
		Self(properties)
	}

	/// Returns the value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.get(key).map(String::as_str)
	}

	/// Returns the value stored under `key`, failing when the key is absent.
	pub fn require(&self, key: &'static str) -> Result<&str, ConfigError> {
		self.get(key).ok_or_else(|| obs::config_failure(ConfigError::MissingProperty { key }))
	}

	/// Number of properties.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no property was loaded.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl FromIterator<(String, String)> for ConfigSource {
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (String, String)>,
	{
		Self(iter.into_iter().collect())
	}
}

/// Location indicator naming the configuration file handed to the [`ConfigLoader`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigLocation {
	/// Reads the location from an environment variable on every resolution.
	Env(String),
	/// Uses a location supplied by the embedding process.
	Fixed(String),
}
impl ConfigLocation {
	/// Resolves the indicator, failing when it is absent or blank.
	pub fn resolve(&self) -> Result<String, ConfigError> {
		let (indicator, value) = match self {
			Self::Env(name) => (name.as_str(), std::env::var(name).ok()),
			Self::Fixed(path) => ("fixed location", Some(path.clone())),
		};

		match value {
			Some(value) if !value.trim().is_empty() => Ok(value),
			_ => Err(obs::config_failure(ConfigError::MissingLocation {
				indicator: indicator.to_owned(),
			})),
		}
	}
}
impl Default for ConfigLocation {
	fn default() -> Self {
		Self::Env(CONFIG_FILE_PATH_ENV.into())
	}
}

/// Loads the configuration named by a resolved [`ConfigLocation`].
///
/// Implementations return `Ok(None)` when the location produced no configuration; the
/// client reports that as [`ConfigError::NotLoaded`]. Any `Err` is wrapped into
/// [`ConfigError::Load`]. Loaders are called once per client operation and must be safe to
/// call concurrently.
pub trait ConfigLoader
where
	Self: 'static + Send + Sync,
{
	/// Loads the configuration stored at `location`.
	fn load(&self, location: &str) -> Result<Option<ConfigSource>, BoxError>;
}
impl<F> ConfigLoader for F
where
	F: 'static + Send + Sync + Fn(&str) -> Result<Option<ConfigSource>, BoxError>,
{
	fn load(&self, location: &str) -> Result<Option<ConfigSource>, BoxError> {
		self(location)
	}
}

/// Resolves `location` and loads it through `loader`, logging every failure.
pub(crate) fn resolve(
	location: &ConfigLocation,
	loader: &dyn ConfigLoader,
) -> Result<ConfigSource, ConfigError> {
	let location = location.resolve()?;

	match loader.load(&location) {
		Ok(Some(source)) => Ok(source),
		Ok(None) => Err(obs::config_failure(ConfigError::NotLoaded { location })),
		Err(source) => Err(obs::config_failure(ConfigError::Load { location, source })),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn source() -> ConfigSource {
		[(LOGIN_URL, "https://login.example.com/oauth/token")]
			.into_iter()
			.map(|(key, value)| (key.to_owned(), value.to_owned()))
			.collect()
	}

	#[test]
	fn require_reports_the_missing_key() {
		let source = source();

		assert_eq!(
			source.require(LOGIN_URL).expect("Login URL should be present."),
			"https://login.example.com/oauth/token"
		);
		assert!(matches!(
			source.require(CLIENT_SECRET),
			Err(ConfigError::MissingProperty { key: CLIENT_SECRET })
		));
	}

	#[test]
	fn blank_fixed_location_is_rejected() {
		let err = ConfigLocation::Fixed("   ".into())
			.resolve()
			.expect_err("Blank location should be rejected.");

		assert!(matches!(err, ConfigError::MissingLocation { .. }));
	}

	#[test]
	fn unset_env_location_is_rejected() {
		let err = ConfigLocation::Env("MGMT_TOKEN_CLIENT_TEST_UNSET_LOCATION".into())
			.resolve()
			.expect_err("Unset variable should be rejected.");

		assert!(matches!(
			err,
			ConfigError::MissingLocation { indicator } if indicator == "MGMT_TOKEN_CLIENT_TEST_UNSET_LOCATION"
		));
	}

	#[test]
	fn resolve_maps_loader_outcomes() {
		let location = ConfigLocation::Fixed("/srv/mgmt.properties".into());
		let empty = |_: &str| -> Result<Option<ConfigSource>, BoxError> { Ok(None) };
		let broken = |_: &str| -> Result<Option<ConfigSource>, BoxError> {
			Err(Box::new(std::io::Error::other("permission denied")))
		};
		let loaded = |location: &str| -> Result<Option<ConfigSource>, BoxError> {
			assert_eq!(location, "/srv/mgmt.properties");

			Ok(Some(source()))
		};

		assert!(matches!(
			resolve(&location, &empty),
			Err(ConfigError::NotLoaded { location }) if location == "/srv/mgmt.properties"
		));
		assert!(matches!(resolve(&location, &broken), Err(ConfigError::Load { .. })));
		assert_eq!(resolve(&location, &loaded).expect("Loader should succeed."), source());
	}
}
