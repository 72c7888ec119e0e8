//! HTTP client for fetching resolved media URLs and saving them locally.
//!
//! The media servers behind the resolver occasionally mislabel payloads or
//! try to serve transcoded bodies; requests here disable content negotiation
//! and the declared content type is corrected before the save completes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_ENCODING, CONNECTION, CONTENT_TYPE};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use crate::user_agent;
use crate::variant::Variant;

use super::error::DownloadError;
use super::filename::variant_filename;

/// Scheme prefix a source URL must carry to be downloadable.
const SCHEME_PREFIX: &str = "http";

const CONNECT_TIMEOUT_SECS: u64 = 30;
/// Read timeout sized for full-length videos on slow links.
const READ_TIMEOUT_SECS: u64 = 300;

/// Client for downloading resolved media with streaming support.
///
/// Create once and reuse across downloads; the client holds no per-download
/// state, so calls for different variants are safe to issue reentrantly if
/// the caller allows it.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use tikdl::{DownloadClient, Variant};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DownloadClient::new();
/// let outcome = client
///     .download("https://www.tikwm.com/v.mp4", Variant::NoWatermark, Path::new("."))
///     .await?;
/// println!("saved {}", outcome.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DownloadClient {
    client: Client,
}

/// Result of a completed download.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// Final output path.
    pub path: PathBuf,
    /// Number of body bytes written.
    pub bytes_written: u64,
    /// Content type after correction: the server's declared value, or the
    /// variant default when the server declared none.
    pub content_type: String,
}

impl Default for DownloadClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadClient {
    /// Creates a download client with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a download client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        // No gzip here: media bodies are requested with identity encoding.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .user_agent(user_agent::default_download_user_agent())
            .build()
            .expect("failed to build download HTTP client with static configuration");
        Self { client }
    }

    /// Downloads a resolved media URL into `output_dir`.
    ///
    /// The filename is synthesized as `tiktok-{variant}-{timestamp}.{ext}`
    /// (`mp3` for audio, `mp4` otherwise). The request disables content
    /// negotiation (`Accept: */*`, identity encoding, keep-alive) so the
    /// upstream serves the untouched binary, and the declared content type is
    /// corrected to the variant default when absent. The body streams to disk
    /// through a buffered writer; on any failure after the file is created,
    /// the partial file is removed.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The source URL is empty or lacks a scheme prefix (no network call)
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - Writing to disk fails
    #[must_use = "download result contains the saved path and corrected content type"]
    #[instrument(skip(self), fields(url = %source_url, variant = %variant))]
    pub async fn download(
        &self,
        source_url: &str,
        variant: Variant,
        output_dir: &Path,
    ) -> Result<DownloadOutcome, DownloadError> {
        if source_url.is_empty() || !source_url.starts_with(SCHEME_PREFIX) {
            return Err(DownloadError::invalid_source_url(source_url));
        }

        let file_name = variant_filename(variant);
        debug!(file_name = %file_name, "starting download");

        let response = self
            .client
            .get(source_url)
            .header(ACCEPT, "*/*")
            .header(ACCEPT_ENCODING, "identity")
            .header(CONNECTION, "keep-alive")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DownloadError::timeout(source_url)
                } else {
                    DownloadError::network(source_url, e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(source_url, status.as_u16()));
        }

        // Content-type correction: servers sometimes omit or mislabel the
        // header, which would mismatch the saved extension downstream.
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|ct| !ct.is_empty())
            .map_or_else(|| variant.default_content_type().to_string(), String::from);

        let file_path = output_dir.join(&file_name);
        let mut file = File::create(&file_path)
            .await
            .map_err(|e| DownloadError::io(file_path.clone(), e))?;

        let stream_result = stream_to_file(&mut file, response, source_url, &file_path).await;

        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
        }

        let bytes_written = stream_result?;

        info!(
            path = %file_path.display(),
            bytes = bytes_written,
            content_type = %content_type,
            "download complete"
        );

        Ok(DownloadOutcome {
            path: file_path,
            bytes_written,
            content_type,
        })
    }
}

/// Streams the response body to file, returning bytes written.
///
/// Extracted so the caller can clean up the partial file on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
