use log::debug;
use reqwest::{header, RequestBuilder};
use serde_json::{json, Value};
use crate::error::{status_error, Error, Result};

// the bearer token the web client ships with (same for every visitor)
pub const AUTHORIZATION: &str = "Bearer AAAAAAAAAAAAAAAAAAAAANRILgAAAAAAnNwIzUejRCOuH5E6I8xnZz4puTs=1Zv7ttfk8LF81IUq16cHjhLTvJu4FA33AGWWjCpTnA";
// "2ICDjqPd81tulZcYrtpTuQ" is the query id, it changes when the web client
// is redeployed with a different query
pub const GRAPHQL_ENDPOINT: &str = "https://x.com/i/api/graphql/2ICDjqPd81tulZcYrtpTuQ/TweetResultByRestId";
pub const GUEST_TOKEN_ENDPOINT: &str = "https://api.x.com/1.1/guest/activate.json";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// talks to the private api as a logged out browser would
#[derive(Debug, Clone)]
pub struct TwitterClient {
  http: reqwest::Client,
  graphql_endpoint: String,
  guest_token_endpoint: String,
}

impl TwitterClient {
  pub fn new() -> Result<Self> {
    let http = reqwest::Client::builder()
      .gzip(true).deflate(true).brotli(true)
      .build()?;
    Ok(Self::with_client(http))
  }

  /// use an already configured client (timeouts, proxy, ...)
  pub fn with_client(http: reqwest::Client) -> Self {
    Self {
      http,
      graphql_endpoint: GRAPHQL_ENDPOINT.to_string(),
      guest_token_endpoint: GUEST_TOKEN_ENDPOINT.to_string(),
    }
  }

  /// point at different endpoints, e.g. a mirror or a new query id
  pub fn with_endpoints(mut self, graphql: &str, guest_token: &str) -> Self {
    self.graphql_endpoint = graphql.to_string();
    self.guest_token_endpoint = guest_token.to_string();
    self
  }

  pub fn graphql_endpoint(&self) -> &str {
    &self.graphql_endpoint
  }

  pub fn guest_token_endpoint(&self) -> &str {
    &self.guest_token_endpoint
  }

  /// get "x-guest-token" for subsequent requests
  pub async fn new_guest_token(&self) -> Result<String> {
    let req = with_constant_headers(self.http.post(&self.guest_token_endpoint))
      .header(header::ACCEPT, "application/json")
      .header(header::CONTENT_LENGTH, "0");
    let json = send_for_json(req).await?;
    let token = json["guest_token"].as_str()
      .ok_or(Error::MissingGuestToken)?
      .to_string();
    debug!("activated guest token");

    Ok(token)
  }

  /// fetch the raw json result of a `TweetResultByRestId` query
  ///
  /// a fresh guest token is activated for every call. an `errors` array in
  /// the response is left for `resolve()` to deal with
  pub async fn tweet_result_fetch(&self, tweet_id: &str) -> Result<Value> {
    let guest_token = self.new_guest_token().await?;

    debug!("fetching tweet {tweet_id} from {}", self.graphql_endpoint);
    let req = with_constant_headers(self.http.get(&self.graphql_endpoint))
      .header(header::ACCEPT, "application/json, text/plain, */*")
      .header("x-guest-token", guest_token)
      .query(&tweet_result_params(tweet_id));

    send_for_json(req).await
  }
}

/// query string of a `TweetResultByRestId` request. every value is itself a
/// json string
pub fn tweet_result_params(tweet_id: &str) -> [(&'static str, String); 3] {
  let variables = json!({
    "tweetId": tweet_id,
    "withCommunity": false,
    "includePromotedContent": false, // true = include promoted tweets (ads)
    "withVoice": false,
  });
  // the web client refuses to answer if any of these are missing
  let features = json!({
    "creator_subscriptions_tweet_preview_api_enabled": true,
    "tweetypie_unmention_optimization_enabled": true,
    "responsive_web_edit_tweet_api_enabled": true,
    "graphql_is_translatable_rweb_tweet_is_translatable_enabled": true,
    "view_counts_everywhere_api_enabled": true,
    "longform_notetweets_consumption_enabled": true, // true = full text of long tweets
    "responsive_web_twitter_article_tweet_consumption_enabled": false,
    "tweet_awards_web_tipping_enabled": false,
    "freedom_of_speech_not_reach_fetch_enabled": true,
    "standardized_nudges_misinfo": true,
    "tweet_with_visibility_results_prefer_gql_limited_actions_policy_enabled": true,
    "longform_notetweets_rich_text_read_enabled": true,
    "longform_notetweets_inline_media_enabled": true,
    "responsive_web_graphql_exclude_directive_enabled": true,
    "verified_phone_label_enabled": false,
    "responsive_web_media_download_video_enabled": false,
    "responsive_web_graphql_skip_user_profile_image_extensions_enabled": false,
    "responsive_web_graphql_timeline_navigation_enabled": true,
    "responsive_web_enhance_cards_enabled": false,
  });
  let field_toggles = json!({
    "withArticleRichContentState": false,
  });

  [
    ("variables", variables.to_string()),
    ("features", features.to_string()),
    ("fieldToggles", field_toggles.to_string()),
  ]
}

fn with_constant_headers(req: RequestBuilder) -> RequestBuilder {
  req
    .header(header::AUTHORIZATION, AUTHORIZATION)
    .header(header::USER_AGENT, USER_AGENT)
    .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
    .header(header::REFERER, "https://x.com/")
    .header(header::ORIGIN, "https://x.com")
    .header("x-twitter-client-language", "en")
    .header("x-twitter-active-user", "yes")
}

async fn send_for_json(req: RequestBuilder) -> Result<Value> {
  let res = req.send().await?;
  let status = res.status();
  let text = res.text().await?;
  if !status.is_success() {
    return Err(status_error(status, text));
  }
  let json: Value = serde_json::from_str(&text)?;

  Ok(json)
}
