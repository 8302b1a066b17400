//! Demonstrates a configured password login, an MFA login, and a refresh against a mock
//! management login endpoint.

// std
use std::sync::Arc;
// crates.io
use color_eyre::{Result, eyre::eyre};
use httpmock::prelude::*;
// self
use mgmt_token_client::{
	config::{
		CLIENT_ID, CLIENT_SECRET, ConfigLoader, ConfigLocation, ConfigSource, LOGIN_MFA_URL,
		LOGIN_URL,
	},
	error::BoxError,
	flows::ReqwestTokenClient,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.body("username=ops%40example.com&password=s3cret&grant_type=password");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"refresh_token\":\"demo-refresh\",\"token_type\":\"bearer\",\"expires_in\":1799}",
			);
		})
		.await;
	let mfa_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth/mfa/123456").query_param("mfa_token", "123456");
			then.status(401).body("{\"error\":\"unauthorized\"}");
		})
		.await;
	let refresh_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/oauth/token")
				.body("refresh_token=demo-refresh&grant_type=refresh_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"demo-access-2\",\"token_type\":\"bearer\"}");
		})
		.await;
	let source: ConfigSource = [
		(LOGIN_URL, server.url("/oauth/token")),
		(LOGIN_MFA_URL, server.url("/oauth/mfa/")),
		(CLIENT_ID, "edgecli".to_owned()),
		(CLIENT_SECRET, "edgeclisecret".to_owned()),
	]
	.into_iter()
	.map(|(key, value)| (key.to_owned(), value))
	.collect();
	let loader: Arc<dyn ConfigLoader> =
		Arc::new(move |_: &str| -> Result<Option<ConfigSource>, BoxError> {
			Ok(Some(source.clone()))
		});
	let client = ReqwestTokenClient::new(loader)?
		.with_config_location(ConfigLocation::Fixed("demo.properties".into()));
	let token = client.access_token("ops@example.com", "s3cret").await?;

	println!("Bearer header: {}.", token.bearer_header().ok_or_else(|| eyre!("No token."))?);

	let mfa = client.access_token_with_mfa("ops@example.com", "s3cret", Some("123456")).await?;

	println!("MFA login issued a token: {}.", !mfa.is_empty());

	let refreshed = client.access_token_from_refresh_token(token.refresh_token.expose()).await?;

	println!("Refreshed token: {:?}.", refreshed);

	login_mock.assert_async().await;
	mfa_mock.assert_async().await;
	refresh_mock.assert_async().await;

	Ok(())
}
