//! Display formatting helpers for resolved video metadata.

/// Formats a second-count as `MM:SS`.
///
/// Non-finite, zero, or negative input formats as `"00:00"`. Seconds are
/// truncated, not rounded. Durations of 100 minutes or more simply widen the
/// minutes field beyond two digits.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total = seconds as u64;
    let minutes = total / 60;
    let remaining = total % 60;
    format!("{minutes:02}:{remaining:02}")
}
