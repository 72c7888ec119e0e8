//! Shared User-Agent strings for resolver and download HTTP clients.
//!
//! Single source for project URL and UA format so resolver and media traffic
//! stay consistent and easy to update (good citizenship; RFC 9308).

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/tikdl/tikdl";

/// Default User-Agent for resolver API requests.
#[must_use]
pub(crate) fn default_resolver_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("tikdl/{version} (video-fetch-tool; +{PROJECT_UA_URL})")
}

/// Default User-Agent for media download requests.
#[must_use]
pub(crate) fn default_download_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("tikdl/{version} (video-fetch-tool; +{PROJECT_UA_URL})")
}
