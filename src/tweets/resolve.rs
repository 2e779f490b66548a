use log::debug;
use serde_json::Value;
use crate::{
  error::{Error, Result},
  types::Tweet,
  tweets::parsing::parse_media,
};

const RESULT_PATH: &str = "data.tweetResult.result";

/// what the `data.tweetResult.result` node turned out to be, going by its
/// `__typename`
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ResultNode<'a> {
  /// "Tweet", or no typename at all
  Plain(&'a Value),
  /// "TweetWithVisibilityResults" (age restricted, limited replies, etc.).
  /// holds the `tweet` it wraps
  VisibilityWrapped(&'a Value),
  /// "TweetUnavailable" or "TweetTombstone" (deleted, suspended, protected)
  Unavailable,
}

impl<'a> ResultNode<'a> {
  pub(crate) fn classify(result: &'a Value) -> Result<Self> {
    match result["__typename"].as_str().unwrap_or("") {
      "TweetUnavailable" | "TweetTombstone" => Ok(ResultNode::Unavailable),
      "TweetWithVisibilityResults" => {
        let inner = require(result, RESULT_PATH, "tweet")?;
        Ok(ResultNode::VisibilityWrapped(inner))
      },
      _ => Ok(ResultNode::Plain(result)),
    }
  }

  /// the node holding `legacy`, plus its path for error messages
  fn tweet(self) -> Result<(&'a Value, String)> {
    match self {
      ResultNode::Plain(node) => Ok((node, RESULT_PATH.to_string())),
      // only ever one level deep; a wrapped wrapper is not followed
      ResultNode::VisibilityWrapped(node) => {
        debug!("unwrapping TweetWithVisibilityResults");
        Ok((node, format!("{RESULT_PATH}.tweet")))
      },
      ResultNode::Unavailable => Err(Error::TweetUnavailable),
    }
  }
}

/// turn a raw `TweetResultByRestId` response into a `Tweet`
///
/// `tweet_id` is only used to fill in `Tweet::id`, it isn't checked against
/// the response
pub fn resolve(json: &Value, tweet_id: &str) -> Result<Tweet> {
  // an api error beats whatever else is in the response
  check_errors(json)?;

  let result = require(json, "", RESULT_PATH)?;
  let (tweet, path) = ResultNode::classify(result)?.tweet()?;
  let legacy = require(tweet, &path, "legacy")?;
  if !legacy.is_object() {
    return Err(Error::MalformedResponse(format!("{path}.legacy")));
  }

  let text = legacy["full_text"].as_str()
    .or(legacy["text"].as_str())
    .unwrap_or("")
    .to_string();
  let media = parse_media(legacy)?;

  Ok(Tweet { id: tweet_id.to_string(), text, media })
}

/// fail if the response has a top level `errors` value
///
/// usually an array of `{ "message": .. }`, but anything non-null counts. the
/// messages are deduplicated and joined with ", ". a message containing
/// "not authorized" usually means the guest token was rejected
pub(crate) fn check_errors(json: &Value) -> Result<()> {
  let errors: Vec<&Value> = match json.get("errors") {
    None | Some(Value::Null) => return Ok(()),
    Some(Value::Array(errors)) => errors.iter().collect(),
    Some(error) => vec![error],
  };

  let mut messages: Vec<&str> = Vec::new();
  for message in errors.iter().filter_map(|e| e["message"].as_str()) {
    if !message.is_empty() && !messages.contains(&message) {
      messages.push(message);
    }
  }
  let text = match messages.is_empty() {
    true => "Unknown error".to_string(),
    false => messages.join(", "),
  };

  if text.to_lowercase().contains("not authorized") {
    Err(Error::NotAuthorized(text))
  } else {
    Err(Error::Api(text))
  }
}

/// walk the dot separated `path` down from `node`. `at` is where `node` itself
/// sits in the response, so the error names the full path. null counts as
/// missing
fn require<'a>(node: &'a Value, at: &str, path: &str) -> Result<&'a Value> {
  path.split('.').try_fold(node, |node, key| {
    node.get(key).filter(|v| !v.is_null())
  }).ok_or_else(|| match at {
    "" => Error::MalformedResponse(path.to_string()),
    at => Error::MalformedResponse(format!("{at}.{path}")),
  })
}
