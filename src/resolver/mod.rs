//! Share-link resolution: validation, the remote resolver call, and mapping
//! into the internal [`VideoData`] record.
//!
//! # Architecture
//!
//! - [`VideoResolver`] - validates input, issues the resolver POST, classifies
//!   failures
//! - `mapper` - serde types for the raw upstream payload and the
//!   payload-to-`VideoData` transformation
//! - [`ResolveError`] / [`MappingError`] - the resolution failure taxonomy
//!
//! The upstream API is external and not under our control; the mapper treats
//! every wire field as optional and enforces the mandatory set itself.

mod client;
mod error;
mod mapper;

pub use client::VideoResolver;
pub use error::{MappingError, ResolveError};

use crate::variant::Variant;

/// A resolved video: metadata plus the fetchable media URLs for each variant.
///
/// Value object, immutable once constructed. Every populated URL field is
/// absolute; the mapper never hands a relative path downstream. A new
/// resolution replaces the record wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoData {
    /// Cover image URL, always present when construction succeeds.
    pub thumbnail: String,
    /// Author handle, prefixed with `@`.
    pub author: String,
    /// Author display name, passed through unchanged.
    pub author_nickname: String,
    /// Author avatar URL.
    pub author_avatar: String,
    /// Video title/caption; may be empty.
    pub description: String,
    /// Duration as `MM:SS`; defaults to `00:00` when upstream omits it.
    pub duration: String,
    /// Watermark-free media URL.
    pub no_watermark: String,
    /// Watermarked media URL.
    pub with_watermark: String,
    /// Audio-only media URL.
    pub audio: String,
    /// HD media URL; absent when the upstream source has no HD rendition.
    pub hd: Option<String>,
}

impl VideoData {
    /// Returns the media URL for the given variant.
    ///
    /// Only [`Variant::Hd`] can be absent.
    #[must_use]
    pub fn variant_url(&self, variant: Variant) -> Option<&str> {
        match variant {
            Variant::NoWatermark => Some(&self.no_watermark),
            Variant::WithWatermark => Some(&self.with_watermark),
            Variant::Audio => Some(&self.audio),
            Variant::Hd => self.hd.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VideoData {
        VideoData {
            thumbnail: "https://www.tikwm.com/c.jpg".to_string(),
            author: "@jane".to_string(),
            author_nickname: "Jane Doe".to_string(),
            author_avatar: "https://www.tikwm.com/a.jpg".to_string(),
            description: "hello".to_string(),
            duration: "02:05".to_string(),
            no_watermark: "https://www.tikwm.com/p.mp4".to_string(),
            with_watermark: "https://www.tikwm.com/w.mp4".to_string(),
            audio: "https://www.tikwm.com/m.mp3".to_string(),
            hd: None,
        }
    }

    #[test]
    fn test_variant_url_selects_matching_field() {
        let video = sample();
        assert_eq!(
            video.variant_url(Variant::NoWatermark),
            Some("https://www.tikwm.com/p.mp4")
        );
        assert_eq!(
            video.variant_url(Variant::WithWatermark),
            Some("https://www.tikwm.com/w.mp4")
        );
        assert_eq!(
            video.variant_url(Variant::Audio),
            Some("https://www.tikwm.com/m.mp3")
        );
    }

    #[test]
    fn test_variant_url_hd_absent() {
        assert_eq!(sample().variant_url(Variant::Hd), None);
    }

    #[test]
    fn test_variant_url_hd_present() {
        let mut video = sample();
        video.hd = Some("https://www.tikwm.com/hd.mp4".to_string());
        assert_eq!(
            video.variant_url(Variant::Hd),
            Some("https://www.tikwm.com/hd.mp4")
        );
    }
}
