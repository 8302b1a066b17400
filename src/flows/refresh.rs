//! Refresh token grant.

// self
use crate::{
	_prelude::*,
	auth::AccessToken,
	config::{CLIENT_ID, CLIENT_SECRET, LOGIN_URL},
	flows::{TokenClient, observed},
	http::TokenHttpClient,
	oauth::TransportErrorMapper,
	obs::GrantKind,
};

const GRANT: GrantKind = GrantKind::RefreshToken;

impl<C, M> TokenClient<C, M>
where
	C: ?Sized + TokenHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Exchanges `refresh_token` for a new access token at `url`.
	///
	/// Same status contract as [`TokenClient::exchange_password`]: HTTP 200 yields the parsed
	/// token, anything else yields an empty token.
	pub async fn exchange_refresh_token(
		&self,
		url: &str,
		client_id: &str,
		client_secret: &str,
		refresh_token: &str,
	) -> Result<AccessToken> {
		observed(
			GRANT,
			"exchange_refresh_token",
			self.refresh_grant(url, client_id, client_secret, refresh_token),
		)
		.await
	}

	/// Exchanges `refresh_token` using the token URL and client pair taken from configuration.
	pub async fn access_token_from_refresh_token(
		&self,
		refresh_token: &str,
	) -> Result<AccessToken> {
		observed(GRANT, "access_token_from_refresh_token", async move {
			let config = self.config_properties()?;

			self.refresh_grant(
				config.require(LOGIN_URL)?,
				config.require(CLIENT_ID)?,
				config.require(CLIENT_SECRET)?,
				refresh_token,
			)
			.await
		})
		.await
	}

	async fn refresh_grant(
		&self,
		url: &str,
		client_id: &str,
		client_secret: &str,
		refresh_token: &str,
	) -> Result<AccessToken> {
		let form = [("refresh_token", refresh_token), ("grant_type", GRANT.grant_type())];

		self.exchange(GRANT, url, client_id, client_secret, &form).await
	}
}
