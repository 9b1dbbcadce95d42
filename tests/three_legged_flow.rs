// self
use oauth1_broker::{
	auth::{AppCredentials, UserId},
	error::Error,
	flows::{ExtractError, ThreeLeggedFlow, extract_access_token, extract_request_token},
	provider::ProviderDescriptor,
	sign::OAuthOverrides,
	url::Url,
};

fn twitter_flow() -> ThreeLeggedFlow {
	let app = AppCredentials::new("consumer-key", "consumer-secret")
		.expect("Fixture app credentials should be valid.");

	ThreeLeggedFlow::twitter(app).expect("Twitter flow should build.")
}

#[test]
fn redirect_url_quotes_the_request_token() {
	assert_eq!(
		twitter_flow().redirect_url("hello/world").as_str(),
		"https://api.twitter.com/oauth/authenticate?oauth_token=hello%2Fworld"
	);
}

#[test]
fn redirect_url_keeps_existing_query() {
	let provider = ProviderDescriptor::builder("custom")
		.request_token_endpoint(
			Url::parse("https://example.com/oauth/request_token").expect("URL should parse."),
		)
		.authorize_endpoint(
			Url::parse("https://example.com/oauth/authorize?force_login=true")
				.expect("URL should parse."),
		)
		.access_token_endpoint(
			Url::parse("https://example.com/oauth/access_token").expect("URL should parse."),
		)
		.build()
		.expect("Custom provider should build.");
	let flow = ThreeLeggedFlow::new(provider, twitter_flow().app().clone());

	assert_eq!(
		flow.redirect_url("a b").as_str(),
		"https://example.com/oauth/authorize?force_login=true&oauth_token=a%20b"
	);
}

#[test]
fn request_token_reply_cases() {
	let token = extract_request_token(200, "oauth_token=a&oauth_token_secret=b")
		.expect("Well-formed reply should parse.");

	assert_eq!(token.token, "a");
	assert_eq!(token.secret.expose(), "b");
	assert_eq!(token.callback_confirmed, None);
	assert_eq!(
		extract_request_token(401, "oauth_token=a&oauth_token_secret=b"),
		Err(ExtractError::UnexpectedStatus(401))
	);
	assert_eq!(
		extract_request_token(200, "oauth_token=a"),
		Err(ExtractError::MissingField("oauth_token_secret"))
	);
}

#[test]
fn access_token_reply_yields_client_credentials() {
	let reply = extract_access_token(
		200,
		"oauth_token=6253282-eWudHldSbIaelX7swmsiHImEL4KinwaGloHANdrY\
		 &oauth_token_secret=2EEfA6BG3ly3sR3RjE0IBSnlQu4ZrUzPiYKmrkVU\
		 &user_id=6253282&screen_name=twitterapi",
	)
	.expect("Well-formed reply should parse.");

	assert_eq!(reply.screen_name(), Some("twitterapi"));
	assert!(!format!("{reply:?}").contains("2EEfA6BG3ly3sR3RjE0IBSnlQu4ZrUzPiYKmrkVU"));

	let creds = reply.to_client_credentials(None).expect("Reply should convert to credentials.");

	assert_eq!(creds.user_id(), &UserId::Numeric(6253282));
	assert_eq!(creds.token(), "6253282-eWudHldSbIaelX7swmsiHImEL4KinwaGloHANdrY");
	assert_eq!(creds.secret().expose(), "2EEfA6BG3ly3sR3RjE0IBSnlQu4ZrUzPiYKmrkVU");
}

#[test]
fn access_token_reply_without_user_id_uses_fallback() {
	let reply = extract_access_token(200, "oauth_token=t&oauth_token_secret=s")
		.expect("Minimal reply should parse.");

	assert!(reply.to_client_credentials(None).is_err());

	let creds = reply
		.to_client_credentials(Some(UserId::Opaque("known".into())))
		.expect("Fallback identifier should be used.");

	assert_eq!(creds.user_id(), &UserId::Opaque("known".into()));
	assert_eq!(
		extract_access_token(200, "oauth_token=&oauth_token_secret=s"),
		Err(ExtractError::EmptyField("oauth_token"))
	);
}

#[test]
fn rejected_exchange_converts_to_retryable_error() {
	let err: Error = ExtractError::UnexpectedStatus(500).into();

	assert!(matches!(err, Error::Rejected(ExtractError::UnexpectedStatus(500))));
	assert_eq!(err.to_string(), "Authorization failed, please retry: unexpected HTTP status 500.");
}

#[test]
fn builders_sign_each_leg() {
	let flow = twitter_flow();
	let overrides = OAuthOverrides::default().nonce("fixed").timestamp(1_700_000_000);
	let request = flow
		.obtain_request_token("oob", &overrides)
		.expect("Request-token call should sign.");
	let access = flow
		.obtain_access_token("request-token", "verifier", &overrides)
		.expect("Access-token call should sign.");

	assert!(request.authorization.as_str().contains("oauth_callback=\"oob\""));
	assert!(access.authorization.as_str().contains("oauth_token=\"request-token\""));
	assert!(access.authorization.as_str().contains("oauth_verifier=\"verifier\""));
	assert_eq!(
		flow.obtain_request_token("oob", &overrides).expect("Request-token call should sign."),
		request
	);
}
