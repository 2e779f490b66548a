use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use crate::{
  error::{Error, Result},
  types::{Media, MediaKind, VideoVariant},
};

// video urls look like
// https://video.twimg.com/ext_tw_video/1234/pu/vid/avc1/240x426/abc.mp4
static DIMENSIONS: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"/([0-9]+)x([0-9]+)/").expect("dimension pattern is valid")
});

/// get `(width, height)` from the `/<w>x<h>/` segment of a video url
///
/// both are `None` if there is no such segment (or a number doesn't fit)
pub fn dimensions_from_url(url: &str) -> (Option<u32>, Option<u32>) {
  DIMENSIONS.captures(url)
    .and_then(|caps| {
      let width: u32 = caps[1].parse().ok()?;
      let height: u32 = caps[2].parse().ok()?;
      Some((Some(width), Some(height)))
    })
    .unwrap_or((None, None))
}

/// parse `extended_entities.media` of a tweet's `legacy` object
///
/// entries with nothing to show (no photo url, no video variants) are left
/// out, but an entry with a type we don't know fails the whole thing, since
/// that means twitter changed something. so does `extended_entities` or its
/// `media` having the wrong shape
pub fn parse_media(legacy: &Value) -> Result<Vec<Media>> {
  let entities = match legacy.get("extended_entities") {
    // text only tweet
    None | Some(Value::Null) => return Ok(Vec::new()),
    Some(entities) if entities.is_object() => entities,
    Some(_) => return Err(Error::MalformedResponse("legacy.extended_entities".to_string())),
  };
  let media_json = match entities.get("media") {
    None | Some(Value::Null) => return Ok(Vec::new()),
    Some(Value::Array(media_json)) => media_json,
    Some(_) => {
      return Err(Error::MalformedResponse("legacy.extended_entities.media".to_string()))
    },
  };

  let mut media: Vec<Media> = Vec::with_capacity(media_json.len());
  for (i, item) in media_json.iter().enumerate() {
    let kind: MediaKind = item["type"].as_str().unwrap_or("").parse()?;
    match parse_media_item(item, kind) {
      Some(media_item) => media.push(media_item),
      None => warn!("dropping {kind} media entry {i}: no usable url"),
    }
  }
  Ok(media)
}

fn parse_media_item(item: &Value, kind: MediaKind) -> Option<Media> {
  if kind == MediaKind::Photo {
    let url = item["media_url_https"].as_str()?.to_string();
    return Some(Media::Photo { url });
  }

  // gifs have exactly one variant, videos have a few mp4s plus an m3u8
  let variants: Vec<VideoVariant> = item["video_info"]["variants"].as_array()?
    .iter()
    .filter_map(parse_variant)
    .collect();
  if variants.is_empty() {
    return None;
  }

  match kind {
    MediaKind::AnimatedGif => Some(Media::AnimatedGif { variants }),
    _ => Some(Media::Video { variants }),
  }
}

fn parse_variant(json: &Value) -> Option<VideoVariant> {
  let url = match json["url"].as_str().filter(|url| !url.is_empty()) {
    Some(url) => url,
    None => {
      warn!("skipping video variant without url");
      return None;
    },
  };
  let bitrate = json["bitrate"].as_u64();
  let mut width = as_u32(&json["width"]);
  let mut height = as_u32(&json["height"]);

  // only the newer responses carry width/height, but the size is always in
  // the url of the mp4 variants
  if width.is_none() || height.is_none() {
    let (url_width, url_height) = dimensions_from_url(url);
    width = width.or(url_width);
    height = height.or(url_height);
  }

  Some(VideoVariant { url: url.to_string(), bitrate, width, height })
}

fn as_u32(json: &Value) -> Option<u32> {
  json.as_u64().and_then(|n| u32::try_from(n).ok())
}
