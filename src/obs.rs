//! Observability helpers for token exchanges.
//!
//! - Every operation runs inside a `mgmt_token_client.exchange` span carrying the `grant`
//!   and `stage` (call site) fields.
//! - Configuration failures are logged at error level before they are returned.
//! - Enable the `metrics` feature to increment the `mgmt_token_client_exchange_total`
//!   counter for every attempt/issued/empty/failure, labeled by `grant` + `outcome`.

mod metrics;
mod tracing;

pub use self::{metrics::*, tracing::*};

// self
use crate::{_prelude::*, error::ConfigError};

/// Grant variants issued against the token endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GrantKind {
	/// Resource-owner password grant.
	Password,
	/// Resource-owner password grant carrying a second factor.
	PasswordMfa,
	/// Refresh token grant.
	RefreshToken,
}
impl GrantKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantKind::Password => "password",
			GrantKind::PasswordMfa => "password_mfa",
			GrantKind::RefreshToken => "refresh_token",
		}
	}

	/// Returns the RFC 6749 `grant_type` form value.
	pub const fn grant_type(self) -> &'static str {
		match self {
			GrantKind::Password | GrantKind::PasswordMfa => "password",
			GrantKind::RefreshToken => "refresh_token",
		}
	}
}
impl Display for GrantKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeOutcome {
	/// Entry to an exchange.
	Attempt,
	/// The endpoint issued a token.
	Issued,
	/// The endpoint answered without a usable token; the caller received an empty token.
	Empty,
	/// An error propagated back to the caller.
	Failure,
}
impl ExchangeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeOutcome::Attempt => "attempt",
			ExchangeOutcome::Issued => "issued",
			ExchangeOutcome::Empty => "empty",
			ExchangeOutcome::Failure => "failure",
		}
	}
}
impl Display for ExchangeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Logs a configuration failure at error level and hands it back for propagation.
pub fn config_failure(err: ConfigError) -> ConfigError {
	match StdError::source(&err) {
		Some(source) => ::tracing::error!(error = %err, source = %source, "configuration failure"),
		None => ::tracing::error!(error = %err, "configuration failure"),
	}

	err
}

/// Logs a mapped transport failure and hands it back for propagation.
///
/// Configuration errors classified by the transport mapper go through [`config_failure`];
/// everything else is logged at warn.
pub fn transport_failure(err: Error) -> Error {
	match err {
		Error::Config(err) => config_failure(err).into(),
		err => {
			::tracing::warn!(error = %err, "token request failed");

			err
		},
	}
}
