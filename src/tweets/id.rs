use reqwest::Url;
use crate::{
  error::{Error, Result},
  fetch::TwitterClient,
  types::Tweet,
  tweets::resolve::resolve,
};

const TWEET_HOSTS: [&str; 6] = [
  "x.com", "www.x.com", "mobile.x.com",
  "twitter.com", "www.twitter.com", "mobile.twitter.com",
];

impl TwitterClient {
  /// get a single tweet (text and media) by its id
  pub async fn get_tweet(&self, tweet_id: &str) -> Result<Tweet> {
    let json = self.tweet_result_fetch(tweet_id).await?;
    resolve(&json, tweet_id)
  }

  /// same as `get_tweet()`, but takes a status url (or a bare id)
  pub async fn get_tweet_by_url(&self, url: &str) -> Result<Tweet> {
    let tweet_id = tweet_id_from_url(url)?;
    self.get_tweet(&tweet_id).await
  }
}

/// "https://x.com/jack/status/20?s=20" -> "20"
///
/// also takes `/i/web/status/<id>` urls, twitter.com hosts, and bare ids
pub fn tweet_id_from_url(input: &str) -> Result<String> {
  let input = input.trim();
  if is_tweet_id(input) {
    return Ok(input.to_string());
  }
  let invalid = || Error::InvalidTweetUrl(input.to_string());

  let url = Url::parse(input).map_err(|_| invalid())?;
  let known_host = url.host_str()
    .map(|host| TWEET_HOSTS.contains(&host.to_ascii_lowercase().as_str()))
    .unwrap_or(false);
  if !matches!(url.scheme(), "http" | "https") || !known_host {
    return Err(invalid());
  }

  // the id is whatever follows "status" (or the old "statuses")
  let segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();
  segments.windows(2)
    .find(|pair| matches!(pair[0], "status" | "statuses"))
    .map(|pair| pair[1])
    .filter(|id| is_tweet_id(id))
    .map(|id| id.to_string())
    .ok_or_else(invalid)
}

fn is_tweet_id(s: &str) -> bool {
  !s.is_empty() && s.len() <= 20 && s.bytes().all(|b| b.is_ascii_digit())
}
