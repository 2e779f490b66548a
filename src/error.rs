/// everything that can go wrong between asking for a tweet and getting a
/// `Tweet` back
#[derive(Debug, thiserror::Error)]
pub enum Error {
  /* ------------------------------- transport ------------------------------- */
  #[error("HTTP error")]
  Http(#[from] reqwest::Error),
  #[error("HTTP {status}: {body}")]
  Status {
    status: reqwest::StatusCode,
    /// response body, cut down to `MAX_ERROR_BODY_LEN` chars
    body: String,
  },
  #[error("JSON error")]
  Json(#[from] serde_json::Error),
  #[error("Guest token missing from activation response")]
  MissingGuestToken,

  /* -------------------------------- response -------------------------------- */
  #[error("Twitter API error: {0}")]
  Api(String),
  #[error("Not authorized: {0}")]
  NotAuthorized(String),
  #[error("Tweet is unavailable")]
  TweetUnavailable,
  #[error("Malformed response: missing `{0}`")]
  MalformedResponse(String),
  #[error("Unknown media type: {0}")]
  UnknownMediaType(String),

  /* --------------------------------- input --------------------------------- */
  #[error("Not a tweet id or status url: {0}")]
  InvalidTweetUrl(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) const MAX_ERROR_BODY_LEN: usize = 500;

/// build an `Error::Status`, truncating long bodies (twitter likes to answer
/// with a whole html page)
pub(crate) fn status_error(status: reqwest::StatusCode, body: String) -> Error {
  let body = match body.char_indices().nth(MAX_ERROR_BODY_LEN) {
    Some((cut, _)) => format!("{}...", &body[..cut]),
    None => body,
  };
  Error::Status { status, body }
}
