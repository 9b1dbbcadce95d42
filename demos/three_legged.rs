//! Interactive OAuth 1.0a three-legged walkthrough for Twitter.
//!
//! Consumer credentials come from `TWITTER_APP_KEY` / `TWITTER_APP_SECRET` (or stdin). The
//! example fetches a request token, prints the authorize URL, waits for the user to paste the
//! returned `oauth_verifier`, exchanges it for token credentials, and can post a status update
//! so the grant is exercised end-to-end.

// std
use std::io::{self, Write};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use oauth1_broker::{
	auth::{AppCredentials, ClientCredentials},
	flows::ThreeLeggedFlow,
	http::{OAuthHttpClient, ReqwestHttpClient},
	request::{ApiRequest, HttpMethod},
	sign::{OAuthOverrides, OAuthSigner},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let app = match AppCredentials::load_from_env() {
		Ok(app) => app,
		Err(_) => {
			let key = prompt_with_default("Enter your consumer key", None)?;
			let secret = prompt_with_default("Enter your consumer secret", None)?;

			AppCredentials::new(key, secret)?
		},
	};
	let callback =
		prompt_with_default("Enter the callback URL registered with Twitter", Some("oob"))?;
	let flow = ThreeLeggedFlow::twitter(app)?;
	let client = ReqwestHttpClient::default();
	let request_token = flow.fetch_request_token(&client, &callback).await?;

	println!("Authorize URL: {}", flow.redirect_url(&request_token.token));
	println!("After authorizing, copy the `oauth_verifier` (or PIN) and paste it here.");

	let Some(verifier) = prompt_optional("Verifier (leave blank to stop here)")? else {
		println!("Verifier not provided; skipping the access token exchange.");

		return Ok(());
	};
	let reply = flow.fetch_access_token(&client, &request_token, &verifier).await?;
	let creds = reply.to_client_credentials(None)?;

	println!("Authorized user {} ({}).", creds.user_id(), reply.screen_name().unwrap_or("unknown"));

	if let Some(path) = prompt_optional("Save credentials to JSON file (leave blank to skip)")? {
		ClientCredentials::save_many_to_json(&path, std::slice::from_ref(&creds))?;
		println!("Credentials written to {path}.");
	}
	if let Some(text) = prompt_optional("Status text (leave blank to skip posting)")? {
		post_status(&client, flow.app(), &creds, &text).await?;
	} else {
		println!("Status skipped; token exchange confirmed.");
	}

	Ok(())
}

fn prompt_with_default(message: &str, default: Option<&str>) -> Result<String> {
	loop {
		if let Some(value) = default {
			print!("{message} [{value}]: ");
		} else {
			print!("{message}: ");
		}

		io::stdout().flush()?;

		let mut input = String::new();

		io::stdin().read_line(&mut input)?;

		let trimmed = input.trim();

		if trimmed.is_empty() {
			if let Some(value) = default {
				return Ok(value.to_owned());
			}
		} else {
			return Ok(trimmed.to_owned());
		}
	}
}

fn prompt_optional(message: &str) -> Result<Option<String>> {
	print!("{message}: ");

	io::stdout().flush()?;

	let mut input = String::new();

	io::stdin().read_line(&mut input)?;

	let trimmed = input.trim();

	if trimmed.is_empty() { Ok(None) } else { Ok(Some(trimmed.to_owned())) }
}

async fn post_status(
	client: &ReqwestHttpClient,
	app: &AppCredentials,
	creds: &ClientCredentials,
	text: &str,
) -> Result<()> {
	let signer = OAuthSigner::for_client(app, creds);
	let url = Url::parse("https://api.twitter.com/1.1/statuses/update.json")?;
	let request = ApiRequest::new(HttpMethod::Post, url)
		.with_resource("statuses", "/statuses/update")
		.param("status", text);
	let signed = request.sign(&signer, &OAuthOverrides::default())?;

	println!("Posting status: {text}");

	let response = client.execute(&signed).await?;

	println!("Status response ({}): {}", response.status, response.body);

	Ok(())
}
