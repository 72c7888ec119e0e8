//! Filename synthesis for downloaded media.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::variant::Variant;

/// Platform prefix for synthesized filenames.
const PLATFORM_PREFIX: &str = "tiktok";

/// Synthesizes `{platform}-{variant}-{timestamp}.{ext}` for a download.
///
/// The timestamp is wall-clock milliseconds at call time. Names are not
/// required to be collision-free across calls within the same millisecond.
#[must_use]
pub fn variant_filename(variant: Variant) -> String {
    let timestamp_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!(
        "{PLATFORM_PREFIX}-{}-{timestamp_ms}.{}",
        variant.tag(),
        variant.file_extension()
    )
}
