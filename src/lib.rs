//! fetch a single tweet (text, photos, videos, gifs) from twitter's private
//! graphql api, using only a guest token
//!
//! ```no_run
//! # async fn run() -> private_tweet_fetch::Result<()> {
//! let client = private_tweet_fetch::TwitterClient::new()?;
//! let tweet = client.get_tweet_by_url("https://x.com/jack/status/20").await?;
//! println!("{}", tweet.text);
//! # Ok(())
//! # }
//! ```
//!
//! `resolve()` does the actual parsing, and works on any already fetched
//! response, so it can be used with a different http client.

pub mod error;
pub mod fetch;
pub mod tweets;
pub mod types;

pub use error::{Error, Result};
pub use fetch::TwitterClient;
pub use tweets::{
  id::tweet_id_from_url,
  parsing::{dimensions_from_url, parse_media},
  resolve::resolve,
};
pub use types::{Media, MediaKind, Tweet, VideoVariant};
