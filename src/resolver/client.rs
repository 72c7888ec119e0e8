//! The resolution client: validates input, calls the remote resolver, and
//! maps the response into a [`VideoData`].

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument, warn};

use crate::user_agent;

use super::VideoData;
use super::error::ResolveError;
use super::mapper::{ApiResponse, map_payload};

/// Origin of the third-party extraction API.
const DEFAULT_BASE_URL: &str = "https://www.tikwm.com";

/// Resolve endpoint path under the base origin.
const RESOLVE_PATH: &str = "/api/";

/// Substring identifying input as a link from the supported platform.
///
/// Deliberately a containment check rather than URL parsing: share-link
/// redirectors and shortened forms must keep working.
const PLATFORM_HOST_MARKER: &str = "tiktok.com";

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_TIMEOUT_SECS: u64 = 30;

/// Client for resolving TikTok share links into fetchable media URLs.
///
/// Holds a configured HTTP client and the resolver base URL; create once and
/// reuse. Every call re-resolves from the network: upstream media links are
/// short-lived/signed, so there is nothing worth caching.
///
/// # Example
///
/// ```no_run
/// use tikdl::VideoResolver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = VideoResolver::new();
/// let video = resolver
///     .resolve("https://www.tiktok.com/@jane/video/1234567890")
///     .await?;
/// println!("{} {}", video.author, video.duration);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VideoResolver {
    client: Client,
    base_url: String,
}

impl Default for VideoResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoResolver {
    /// Creates a resolver pointed at the production extraction API.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static configuration.
    /// This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a resolver with a custom base URL (for testing with wiremock).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .user_agent(user_agent::default_resolver_user_agent())
            .gzip(true)
            .build()
            .expect("failed to build resolver HTTP client with static configuration");
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// The base origin media/image paths are normalized against.
    #[must_use]
    pub fn base_origin(&self) -> &str {
        &self.base_url
    }

    /// Resolves a share link into a populated [`VideoData`].
    ///
    /// Validation short-circuits before any network call: empty input and
    /// input without the platform host marker are rejected locally. A single
    /// POST then asks the upstream for web-quality and HD metadata; the raw
    /// payload is mapped so that every URL handed downstream is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] when validation fails, the resolver is
    /// unreachable, it answers a non-2xx status, it reports an
    /// application-level failure, or the payload is missing mandatory fields.
    #[instrument(skip(self), fields(input = %input))]
    pub async fn resolve(&self, input: &str) -> Result<VideoData, ResolveError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ResolveError::EmptyInput);
        }
        if !input.contains(PLATFORM_HOST_MARKER) {
            return Err(ResolveError::unsupported_host(input));
        }

        let endpoint = format!("{}{RESOLVE_PATH}", self.base_url);
        let body = format!("url={}&web=1&hd=1", urlencoding::encode(input));
        debug!(endpoint = %endpoint, "calling resolver");

        let response = self
            .client
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "resolver request failed");
                ResolveError::network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "resolver returned error status");
            return Err(ResolveError::transport(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let envelope = response.json::<ApiResponse>().await.map_err(|e| {
            warn!(error = %e, "failed to read resolver response body");
            ResolveError::network(e)
        })?;

        if envelope.code != 0 {
            debug!(code = envelope.code, msg = ?envelope.msg, "resolver reported failure");
            return Err(ResolveError::upstream(envelope.msg));
        }
        let Some(raw) = envelope.data else {
            return Err(ResolveError::upstream(envelope.msg));
        };

        let video = map_payload(raw, &self.base_url)?;
        debug!(author = %video.author, duration = %video.duration, "resolved video");
        Ok(video)
    }
}
