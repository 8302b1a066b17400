//! Resource-owner password grant, with and without a second factor.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	config::{CLIENT_ID, CLIENT_SECRET, LOGIN_MFA_URL, LOGIN_URL},
	error::ConfigError,
	flows::{TokenClient, observed},
	http::TokenHttpClient,
	oauth::{self, TransportErrorMapper},
	obs::{self, GrantKind},
};

impl<C, M> TokenClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Logs in with the token URL and client pair taken from configuration.
	pub async fn access_token(&self, username: &str, password: &str) -> Result<AccessToken> {
		const GRANT: GrantKind = GrantKind::Password;

		observed(GRANT, "access_token", async move {
			let config = self.config_properties()?;

			self.password_grant(
				GRANT,
				config.require(LOGIN_URL)?,
				config.require(CLIENT_ID)?,
				config.require(CLIENT_SECRET)?,
				username,
				password,
			)
			.await
		})
		.await
	}

	/// Logs in with a second-factor code against the configured MFA endpoint.
	///
	/// The code must be present and non-empty; it is checked before configuration is
	/// resolved, so a missing code never reaches the loader or the network. The request URL is
	/// `mgmt.login.mfa.url` followed by the raw code, with `?mfa_token=<code>` appended by
	/// [`TokenClient::exchange_password_with_mfa`].
	pub async fn access_token_with_mfa(
		&self,
		username: &str,
		password: &str,
		mfa: Option<&str>,
	) -> Result<AccessToken> {
		const GRANT: GrantKind = GrantKind::PasswordMfa;

		observed(GRANT, "access_token_with_mfa", async move {
			let mfa = mfa
				.filter(|code| !code.is_empty())
				.ok_or_else(|| obs::config_failure(ConfigError::MissingMfa))?;
			let config = self.config_properties()?;
			let url = format!("{}{mfa}", config.require(LOGIN_MFA_URL)?);

			self.password_grant(
				GRANT,
				&oauth::mfa_url(&url, mfa),
				config.require(CLIENT_ID)?,
				config.require(CLIENT_SECRET)?,
				username,
				password,
			)
			.await
		})
		.await
	}

	/// Logs in against `url` with the second-factor code appended as `?mfa_token=<mfa>`.
	///
	/// `url` must not carry a query string already; the code is appended verbatim.
	pub async fn exchange_password_with_mfa(
		&self,
		url: &str,
		client_id: &str,
		client_secret: &str,
		username: &str,
		password: &str,
		mfa: &str,
	) -> Result<AccessToken> {
		const GRANT: GrantKind = GrantKind::PasswordMfa;

		observed(
			GRANT,
			"exchange_password_with_mfa",
			self.password_grant(
				GRANT,
				&oauth::mfa_url(url, mfa),
				client_id,
				client_secret,
				username,
				password,
			),
		)
		.await
	}

	/// Performs the `password` grant against `url`.
	///
	/// Returns the parsed token when the endpoint answers HTTP 200 and an empty token for
	/// any other status. Transport failures propagate as [`Error::Transport`].
	pub async fn exchange_password(
		&self,
		url: &str,
		client_id: &str,
		client_secret: &str,
		username: &str,
		password: &str,
	) -> Result<AccessToken> {
		const GRANT: GrantKind = GrantKind::Password;

		observed(
			GRANT,
			"exchange_password",
			self.password_grant(GRANT, url, client_id, client_secret, username, password),
		)
		.await
	}

	async fn password_grant(
		&self,
		grant: GrantKind,
		url: &str,
		client_id: &str,
		client_secret: &str,
		username: &str,
		password: &str,
	) -> Result<AccessToken> {
		let form =
			[("username", username), ("password", password), ("grant_type", grant.grant_type())];

		self.exchange(grant, url, client_id, client_secret, &form).await
	}
}
