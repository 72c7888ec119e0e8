//! The four selectable download variants of a resolved video.

use clap::ValueEnum;

/// A selectable download form of a resolved video.
///
/// The kebab-case tag is stable: it is used in synthesized filenames and as
/// the CLI value for `--variant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Variant {
    /// Watermark-free video.
    NoWatermark,
    /// Video with the platform watermark.
    WithWatermark,
    /// Audio-only track.
    Audio,
    /// High-definition video, when the upstream source has one.
    Hd,
}

impl Variant {
    /// Returns the stable kebab-case tag for this variant.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::NoWatermark => "no-watermark",
            Self::WithWatermark => "with-watermark",
            Self::Audio => "audio",
            Self::Hd => "hd",
        }
    }

    /// Returns the file extension for this variant (`mp3` for audio, `mp4` otherwise).
    #[must_use]
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Audio => "mp3",
            _ => "mp4",
        }
    }

    /// Returns the content type substituted when the media server declares none.
    #[must_use]
    pub fn default_content_type(self) -> &'static str {
        match self {
            Self::Audio => "audio/mpeg",
            _ => "video/mp4",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
