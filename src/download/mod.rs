//! Streaming media download with content-type correction.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for full-length videos)
//! - Synthesized `tiktok-{variant}-{timestamp}.{ext}` filenames
//! - Content negotiation disabled so upstream serves the untouched binary
//! - Declared content type corrected to the variant default when absent
//! - Partial files removed on every failure path

mod client;
mod error;
mod filename;

pub use client::{DownloadClient, DownloadOutcome};
pub use error::DownloadError;
pub use filename::variant_filename;
