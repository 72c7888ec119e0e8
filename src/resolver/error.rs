//! Error types for link resolution and response mapping.
//!
//! Every variant carries enough context to render a single human-readable
//! message at the presentation boundary; none is fatal to the process.

use thiserror::Error;

/// Errors that can occur while turning a share link into a [`crate::VideoData`].
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The input was empty after trimming. No network call is made.
    #[error("no link provided; paste a TikTok URL")]
    EmptyInput,

    /// The input does not look like a link from the supported platform.
    /// No network call is made.
    #[error("not a TikTok link: {input}")]
    UnsupportedHost {
        /// The rejected input, trimmed.
        input: String,
    },

    /// Network-level error reaching the resolver (DNS, offline, TLS, timeout).
    #[error("cannot reach the resolver: {source}")]
    Network {
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The resolver answered with a non-2xx HTTP status.
    #[error("resolver returned HTTP {status} {status_text}")]
    Transport {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase, empty when unknown.
        status_text: String,
    },

    /// The resolver answered 2xx but reported an application-level failure
    /// (non-zero `code` or missing `data` payload).
    #[error("{message}")]
    Upstream {
        /// The upstream message, or a generic fallback.
        message: String,
    },

    /// The payload was present but missing a mandatory field.
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl ResolveError {
    /// Creates an unsupported-host error from the offending input.
    pub fn unsupported_host(input: impl Into<String>) -> Self {
        Self::UnsupportedHost {
            input: input.into(),
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(source: reqwest::Error) -> Self {
        Self::Network { source }
    }

    /// Creates a transport error from an HTTP status.
    pub fn transport(status: u16, status_text: impl Into<String>) -> Self {
        Self::Transport {
            status,
            status_text: status_text.into(),
        }
    }

    /// Creates an upstream error, substituting the generic message when the
    /// resolver sent none.
    pub fn upstream(message: Option<String>) -> Self {
        Self::Upstream {
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "failed to process video".to_string()),
        }
    }
}

/// Errors raised while mapping the raw resolver payload into a `VideoData`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The cover image is missing. Distinct because downstream presentation
    /// depends on it structurally.
    #[error("video thumbnail not available")]
    ThumbnailMissing,

    /// A mandatory field other than the thumbnail is missing.
    #[error("resolver response is missing `{field}`")]
    MissingField {
        /// Name of the missing payload field.
        field: &'static str,
    },
}

impl MappingError {
    /// Creates a missing-field error for a mandatory payload field.
    #[must_use]
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        let msg = ResolveError::EmptyInput.to_string();
        assert!(msg.contains("TikTok"), "Expected platform name in: {msg}");
    }

    #[test]
    fn test_unsupported_host_display_includes_input() {
        let error = ResolveError::unsupported_host("https://example.com/video");
        let msg = error.to_string();
        assert!(
            msg.contains("https://example.com/video"),
            "Expected input in: {msg}"
        );
    }

    #[test]
    fn test_transport_display_includes_status() {
        let error = ResolveError::transport(502, "Bad Gateway");
        let msg = error.to_string();
        assert!(msg.contains("502"), "Expected status in: {msg}");
        assert!(msg.contains("Bad Gateway"), "Expected status text in: {msg}");
    }

    #[test]
    fn test_upstream_falls_back_to_generic_message() {
        assert_eq!(
            ResolveError::upstream(None).to_string(),
            "failed to process video"
        );
        assert_eq!(
            ResolveError::upstream(Some(String::new())).to_string(),
            "failed to process video"
        );
    }

    #[test]
    fn test_upstream_preserves_resolver_message() {
        let error = ResolveError::upstream(Some("Url parsing is failed!".to_string()));
        assert_eq!(error.to_string(), "Url parsing is failed!");
    }

    #[test]
    fn test_mapping_error_propagates_transparently() {
        let error = ResolveError::from(MappingError::ThumbnailMissing);
        assert_eq!(error.to_string(), "video thumbnail not available");
    }

    #[test]
    fn test_missing_field_display() {
        let msg = MappingError::missing("wmplay").to_string();
        assert!(msg.contains("wmplay"), "Expected field name in: {msg}");
    }
}
