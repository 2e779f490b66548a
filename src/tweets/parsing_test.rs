use quickcheck::{quickcheck, TestResult};
use serde_json::{json, Value};
use super::parsing::{dimensions_from_url, parse_media};
use crate::{
  error::Error,
  types::{Media, MediaKind, VideoVariant},
};

fn legacy(media: Value) -> Value {
  json!({ "full_text": "", "extended_entities": { "media": media } })
}

/* ---------------------------- dimensions ---------------------------- */

#[test]
fn dimensions_in_url() {
  let url = "https://video.twimg.com/ext_tw_video/1/pu/vid/240x426/v.mp4";
  assert_eq!(dimensions_from_url(url), (Some(240), Some(426)));
}

#[test]
fn dimensions_first_match_wins() {
  let url = "https://video.twimg.com/amplify_video/1/vid/avc1/720x1280/1080x1920/v.mp4";
  assert_eq!(dimensions_from_url(url), (Some(720), Some(1280)));
}

#[test]
fn dimensions_ascii_digits_only() {
  let url = "https://video.twimg.com/٢٤٠x٤٢٦/vid/240x426/v.mp4";
  assert_eq!(dimensions_from_url(url), (Some(240), Some(426)));
}

#[test]
fn dimensions_missing() {
  for url in [
    "https://video.twimg.com/ext_tw_video/1/pu/pl/playlist.m3u8?tag=12",
    "https://video.twimg.com/tweet_video/abc.mp4",
    // not a whole path segment
    "https://video.twimg.com/v/240x426.mp4",
    "https://video.twimg.com/x240x426/v.mp4",
    // too big for a u32
    "https://video.twimg.com/99999999999x426/v.mp4",
    // arabic-indic digits
    "https://video.twimg.com/٢٤٠x٤٢٦/v.mp4",
    "",
  ] {
    assert_eq!(dimensions_from_url(url), (None, None), "{url}");
  }
}

quickcheck! {
  fn dimensions_from_any_segment(width: u32, height: u32, prefix: Vec<u8>) -> bool {
    // only lowercase letters in the prefix so it can't form a segment itself
    let prefix: String = prefix.iter().map(|b| (b'a' + b % 26) as char).collect();
    let url = format!("https://video.twimg.com/{prefix}/{width}x{height}/v.mp4");
    dimensions_from_url(&url) == (Some(width), Some(height))
  }

  fn dimensions_need_both(width: u32, junk: String) -> TestResult {
    if junk.chars().any(|c| c.is_ascii_digit()) {
      return TestResult::discard();
    }
    let url = format!("https://video.twimg.com/{width}x{junk}/v.mp4");
    TestResult::from_bool(dimensions_from_url(&url) == (None, None))
  }

  fn media_order_preserved(kinds: Vec<u8>) -> bool {
    // 0 = photo, 1 = photo without url (dropped), 2 = video, 3 = video
    // without variants (dropped)
    let entries: Vec<Value> = kinds.iter().enumerate().map(|(i, k)| match k % 4 {
      0 => json!({ "type": "photo", "media_url_https": format!("https://pbs.twimg.com/media/{i}.jpg") }),
      1 => json!({ "type": "photo" }),
      2 => json!({ "type": "video", "video_info": { "variants": [
        { "bitrate": 832000, "url": format!("https://video.twimg.com/{i}/480x270/v.mp4") },
      ] } }),
      _ => json!({ "type": "video", "video_info": { "variants": [] } }),
    }).collect();
    let expected: Vec<String> = kinds.iter().enumerate().filter_map(|(i, k)| match k % 4 {
      0 => Some(format!("https://pbs.twimg.com/media/{i}.jpg")),
      2 => Some(format!("https://video.twimg.com/{i}/480x270/v.mp4")),
      _ => None,
    }).collect();

    let media = parse_media(&legacy(Value::Array(entries))).unwrap();
    let urls: Vec<String> = media.iter()
      .filter_map(|m| m.url().map(|url| url.to_string()))
      .collect();
    media.len() <= kinds.len() && urls == expected
  }
}

/* ------------------------------ media ------------------------------ */

#[test]
fn parse_media_no_entities() {
  assert!(parse_media(&json!({ "full_text": "just text" })).unwrap().is_empty());
  assert!(parse_media(&json!({ "extended_entities": {} })).unwrap().is_empty());
}

#[test]
fn parse_media_wrong_shape() {
  for (legacy, path) in [
    (json!({ "extended_entities": { "media": "photo" } }), "legacy.extended_entities.media"),
    (json!({ "extended_entities": { "media": { "type": "photo" } } }), "legacy.extended_entities.media"),
    (json!({ "extended_entities": [] }), "legacy.extended_entities"),
  ] {
    match parse_media(&legacy) {
      Err(Error::MalformedResponse(missing)) => assert_eq!(missing, path),
      other => panic!("expected malformed response, got {other:?}"),
    }
  }
  assert!(parse_media(&json!({ "extended_entities": null })).unwrap().is_empty());
  assert!(parse_media(&json!({ "extended_entities": { "media": null } })).unwrap().is_empty());
}

#[test]
fn parse_photo() {
  let media = parse_media(&legacy(json!([
    { "type": "photo", "url": "https://t.co/abc", "media_url_https": "https://pbs.twimg.com/media/a.jpg" },
  ]))).unwrap();
  assert_eq!(media, vec![Media::Photo { url: "https://pbs.twimg.com/media/a.jpg".to_string() }]);
  assert!(media[0].variants().is_empty());
}

#[test]
fn parse_photo_without_url_is_dropped() {
  let media = parse_media(&legacy(json!([
    { "type": "photo", "url": "https://t.co/abc" },
    { "type": "photo", "media_url_https": "https://pbs.twimg.com/media/b.jpg" },
  ]))).unwrap();
  assert_eq!(media, vec![Media::Photo { url: "https://pbs.twimg.com/media/b.jpg".to_string() }]);
}

#[test]
fn parse_video_variants() {
  let media = parse_media(&legacy(json!([
    { "type": "video", "video_info": { "variants": [
      { "content_type": "application/x-mpegURL", "url": "https://video.twimg.com/1/pl/playlist.m3u8" },
      { "bitrate": 256000, "content_type": "video/mp4", "url": "https://video.twimg.com/1/vid/480x270/a.mp4" },
      { "bitrate": 2176000, "content_type": "video/mp4", "url": "https://video.twimg.com/1/vid/1280x720/b.mp4" },
      { "bitrate": 832000, "width": 640, "height": 360, "url": "https://video.twimg.com/1/vid/c.mp4" },
      { "bitrate": 100, "content_type": "video/mp4" },
    ] } },
  ]))).unwrap();

  assert_eq!(media.len(), 1);
  assert_eq!(media[0].kind(), MediaKind::Video);
  assert_eq!(media[0].variants(), &[
    VideoVariant {
      url: "https://video.twimg.com/1/pl/playlist.m3u8".to_string(),
      bitrate: None, width: None, height: None,
    },
    VideoVariant {
      url: "https://video.twimg.com/1/vid/480x270/a.mp4".to_string(),
      bitrate: Some(256000), width: Some(480), height: Some(270),
    },
    VideoVariant {
      url: "https://video.twimg.com/1/vid/1280x720/b.mp4".to_string(),
      bitrate: Some(2176000), width: Some(1280), height: Some(720),
    },
    VideoVariant {
      url: "https://video.twimg.com/1/vid/c.mp4".to_string(),
      bitrate: Some(832000), width: Some(640), height: Some(360),
    },
  ]);
  assert_eq!(media[0].url(), Some("https://video.twimg.com/1/vid/1280x720/b.mp4"));
}

#[test]
fn explicit_dimensions_beat_url() {
  let media = parse_media(&legacy(json!([
    { "type": "video", "video_info": { "variants": [
      { "bitrate": 1, "width": 100, "url": "https://video.twimg.com/vid/240x426/v.mp4" },
    ] } },
  ]))).unwrap();
  let variant = &media[0].variants()[0];
  assert_eq!((variant.width, variant.height), (Some(100), Some(426)));
}

#[test]
fn non_numeric_fields_are_ignored() {
  let media = parse_media(&legacy(json!([
    { "type": "video", "video_info": { "variants": [
      { "bitrate": "fast", "width": "wide", "height": -3, "url": "https://video.twimg.com/v.mp4" },
    ] } },
  ]))).unwrap();
  assert_eq!(media[0].variants(), &[VideoVariant {
    url: "https://video.twimg.com/v.mp4".to_string(),
    bitrate: None, width: None, height: None,
  }]);
}

#[test]
fn primary_variant_without_bitrates() {
  let media = parse_media(&legacy(json!([
    { "type": "video", "video_info": { "variants": [
      { "url": "https://video.twimg.com/first.mp4" },
      { "url": "https://video.twimg.com/second.mp4" },
    ] } },
  ]))).unwrap();
  assert_eq!(media[0].url(), Some("https://video.twimg.com/first.mp4"));
}

#[test]
fn primary_variant_tie() {
  let media = parse_media(&legacy(json!([
    { "type": "video", "video_info": { "variants": [
      { "url": "https://video.twimg.com/pl.m3u8" },
      { "bitrate": 950000, "url": "https://video.twimg.com/a.mp4" },
      { "bitrate": 950000, "url": "https://video.twimg.com/b.mp4" },
    ] } },
  ]))).unwrap();
  assert_eq!(media[0].url(), Some("https://video.twimg.com/a.mp4"));
}

#[test]
fn parse_animated_gif() {
  let media = parse_media(&legacy(json!([
    { "type": "animated_gif", "media_url_https": "https://pbs.twimg.com/tweet_video_thumb/g.jpg",
      "video_info": { "aspect_ratio": [1, 1], "variants": [
        { "bitrate": 0, "content_type": "video/mp4", "url": "https://video.twimg.com/tweet_video/g.mp4" },
      ] } },
  ]))).unwrap();
  assert_eq!(media, vec![Media::AnimatedGif { variants: vec![VideoVariant {
    url: "https://video.twimg.com/tweet_video/g.mp4".to_string(),
    bitrate: Some(0), width: None, height: None,
  }] }]);
}

#[test]
fn videos_without_variants_are_dropped() {
  let media = parse_media(&legacy(json!([
    { "type": "video" },
    { "type": "video", "video_info": {} },
    { "type": "animated_gif", "video_info": { "variants": [] } },
    { "type": "video", "video_info": { "variants": [{ "bitrate": 1 }, { "url": "" }] } },
    { "type": "photo", "media_url_https": "https://pbs.twimg.com/media/kept.jpg" },
  ]))).unwrap();
  assert_eq!(media, vec![Media::Photo { url: "https://pbs.twimg.com/media/kept.jpg".to_string() }]);
}

#[test]
fn unknown_type_fails() {
  let err = parse_media(&legacy(json!([
    { "type": "photo", "media_url_https": "https://pbs.twimg.com/media/a.jpg" },
    { "type": "unknown_thing" },
  ]))).unwrap_err();
  assert!(matches!(err, Error::UnknownMediaType(kind) if kind == "unknown_thing"));
}

#[test]
fn missing_type_fails() {
  let err = parse_media(&legacy(json!([{ "media_url_https": "https://pbs.twimg.com/media/a.jpg" }])))
    .unwrap_err();
  assert!(matches!(err, Error::UnknownMediaType(kind) if kind.is_empty()));
}
