//! Mapping from the raw tikwm payload into the internal [`VideoData`] record.
//!
//! The upstream API returns media and image paths that are sometimes relative
//! to its own origin; every URL-shaped field is normalized to an absolute URL
//! here so nothing downstream ever sees a relative path.

use serde::Deserialize;

use crate::format::format_duration;

use super::VideoData;
use super::error::MappingError;

/// Scheme prefix marking a URL-shaped field as already absolute.
const SCHEME_PREFIX: &str = "http";

/// Top-level resolver API response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<RawVideo>,
}

/// The `data` object of a successful resolver response.
///
/// Every field is optional at the wire level; [`map_payload`] decides which
/// ones are mandatory. The upstream contract is external and can change, so
/// absences deserialize cleanly instead of failing the whole body parse.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawVideo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub play: Option<String>,
    #[serde(default)]
    pub wmplay: Option<String>,
    #[serde(default)]
    pub hdplay: Option<String>,
    #[serde(default)]
    pub music: Option<String>,
    #[serde(default)]
    pub music_info: Option<RawMusicInfo>,
    #[serde(default)]
    pub author: Option<RawAuthor>,
}

/// Nested music metadata; only the duration is consumed.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMusicInfo {
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Nested author object.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawAuthor {
    #[serde(default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Returns an absolute URL for a possibly-relative resource path.
///
/// Values already carrying a scheme prefix pass through unchanged, so the
/// operation is idempotent. Everything else is concatenated onto the base
/// origin, matching how the upstream serves relative paths.
fn absolutize(value: &str, base_origin: &str) -> String {
    if value.starts_with(SCHEME_PREFIX) {
        value.to_string()
    } else {
        format!("{base_origin}{value}")
    }
}

/// Extracts a mandatory field, treating absent and empty values the same way.
fn required(value: Option<String>, field: &'static str) -> Result<String, MappingError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(MappingError::MissingField { field })
}

/// Transforms a raw resolver payload into a [`VideoData`] record.
///
/// Mandatory fields: cover, author unique id, author nickname, author avatar,
/// title, play, wmplay, music. The HD play URL is optional and its absence is
/// not an error. URL normalization against `base_origin` is applied
/// independently and identically to the thumbnail, the avatar, and all four
/// media URLs.
///
/// # Errors
///
/// Returns [`MappingError::ThumbnailMissing`] when the cover is absent, or
/// [`MappingError::MissingField`] for any other absent mandatory field.
pub(crate) fn map_payload(raw: RawVideo, base_origin: &str) -> Result<VideoData, MappingError> {
    let cover = raw
        .cover
        .filter(|v| !v.is_empty())
        .ok_or(MappingError::ThumbnailMissing)?;

    let author = raw.author.unwrap_or_default();
    let unique_id = required(author.unique_id, "author.unique_id")?;
    let nickname = required(author.nickname, "author.nickname")?;
    let avatar = required(author.avatar, "author.avatar")?;
    let title = raw.title.ok_or(MappingError::missing("title"))?;
    let play = required(raw.play, "play")?;
    let wmplay = required(raw.wmplay, "wmplay")?;
    let music = required(raw.music, "music")?;

    let duration_secs = raw
        .music_info
        .and_then(|info| info.duration)
        .unwrap_or(0.0);

    Ok(VideoData {
        thumbnail: absolutize(&cover, base_origin),
        author: format!("@{unique_id}"),
        author_nickname: nickname,
        author_avatar: absolutize(&avatar, base_origin),
        description: title,
        duration: format_duration(duration_secs),
        no_watermark: absolutize(&play, base_origin),
        with_watermark: absolutize(&wmplay, base_origin),
        audio: absolutize(&music, base_origin),
        hd: raw
            .hdplay
            .filter(|v| !v.is_empty())
            .map(|v| absolutize(&v, base_origin)),
    })
}
