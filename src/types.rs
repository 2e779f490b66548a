use std::str::FromStr;
use serde::Serialize;
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tweet {
  /// id number of tweet (last part of url), as passed in by the caller
  pub id: String,
  /// the text of the tweet
  pub text: String,
  /// in the same order as the tweet shows them
  pub media: Vec<Media>,
}

impl Tweet {
  pub fn photos(&self) -> impl Iterator<Item = &Media> {
    self.media.iter().filter(|m| m.kind() == MediaKind::Photo)
  }

  /// videos and gifs (twitter stores gifs as looping mp4s)
  pub fn videos(&self) -> impl Iterator<Item = &Media> {
    self.media.iter().filter(|m| m.kind() != MediaKind::Photo)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
  Photo,
  Video,
  AnimatedGif,
}

impl MediaKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      MediaKind::Photo => "photo",
      MediaKind::Video => "video",
      MediaKind::AnimatedGif => "animated_gif",
    }
  }
}

impl FromStr for MediaKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "photo" => Ok(MediaKind::Photo),
      "video" => Ok(MediaKind::Video),
      "animated_gif" => Ok(MediaKind::AnimatedGif),
      other => Err(Error::UnknownMediaType(other.to_string())),
    }
  }
}

impl std::fmt::Display for MediaKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// one item of `extended_entities.media`
///
/// video and gif items are never constructed with an empty `variants`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Media {
  Photo { url: String },
  Video { variants: Vec<VideoVariant> },
  AnimatedGif { variants: Vec<VideoVariant> },
}

impl Media {
  pub fn kind(&self) -> MediaKind {
    match self {
      Media::Photo { .. } => MediaKind::Photo,
      Media::Video { .. } => MediaKind::Video,
      Media::AnimatedGif { .. } => MediaKind::AnimatedGif,
    }
  }

  /// the photo url, or the url of the highest bitrate variant
  pub fn url(&self) -> Option<&str> {
    match self {
      Media::Photo { url } => Some(url.as_str()),
      _ => self.primary_variant().map(|v| v.url.as_str()),
    }
  }

  /// empty for photos
  pub fn variants(&self) -> &[VideoVariant] {
    match self {
      Media::Photo { .. } => &[],
      Media::Video { variants } | Media::AnimatedGif { variants } => variants.as_slice(),
    }
  }

  /// the variant with the highest bitrate. the `.m3u8` playlist variant has
  /// no bitrate, so missing bitrates count as 0. on a tie the earliest
  /// variant wins
  pub fn primary_variant(&self) -> Option<&VideoVariant> {
    self.variants().iter()
      .min_by_key(|v| std::cmp::Reverse(v.bitrate.unwrap_or(0)))
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoVariant {
  pub url: String,
  /// bits per second
  pub bitrate: Option<u64>,
  /// in pixels
  pub width: Option<u32>,
  /// in pixels
  pub height: Option<u32>,
}
