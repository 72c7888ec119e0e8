//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use tikdl::Variant;

/// Download TikTok videos without the watermark.
///
/// tikdl resolves a TikTok share link through the tikwm.com extraction API
/// and downloads the selected variant (watermark-free, watermarked, HD, or
/// audio-only) to the local filesystem.
#[derive(Parser, Debug)]
#[command(name = "tikdl")]
#[command(author, version, about)]
pub struct Args {
    /// TikTok share link to resolve (shortened/redirector links accepted)
    pub url: String,

    /// Variant to download
    #[arg(long, value_enum, default_value_t = Variant::NoWatermark)]
    pub variant: Variant,

    /// Directory to save the downloaded file into
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Resolve and print metadata without downloading
    #[arg(long)]
    pub info: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
