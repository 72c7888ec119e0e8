//! CLI entry point for the tikdl tool.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use indicatif::ProgressBar;
use tikdl::{DownloadClient, Session, SessionState, VideoResolver};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let resolver = VideoResolver::new();
    let mut session = Session::new();

    let token = session.begin_resolve();
    let outcome = resolver.resolve(&args.url).await;
    session.finish_resolve(token, outcome);

    let video = match session.state() {
        SessionState::Resolved(video) => video.clone(),
        _ => anyhow::bail!(
            "{}",
            session.last_error().unwrap_or("video resolution failed")
        ),
    };

    info!(author = %video.author, "resolved video");

    if !args.quiet {
        println!("{} ({})", video.author, video.author_nickname);
        println!("  duration   {}", video.duration);
        if !video.description.is_empty() {
            println!("  caption    {}", video.description);
        }
        println!("  thumbnail  {}", video.thumbnail);
    }

    if args.info {
        println!("  no-watermark    {}", video.no_watermark);
        println!("  with-watermark  {}", video.with_watermark);
        println!("  audio           {}", video.audio);
        match &video.hd {
            Some(hd) => println!("  hd              {hd}"),
            None => println!("  hd              (not available)"),
        }
        return Ok(());
    }

    let Some(media_url) = video.variant_url(args.variant).map(String::from) else {
        // Only the HD variant can be absent
        anyhow::bail!("this video has no HD rendition; try --variant no-watermark");
    };

    let Some(token) = session.begin_download(args.variant) else {
        anyhow::bail!("a download is already in progress");
    };

    let spinner = if args.quiet {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("downloading {}", args.variant));
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner
    };

    let client = DownloadClient::new();
    let result = client
        .download(&media_url, args.variant, &args.output_dir)
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(outcome) => {
            session.finish_download(token, Ok(()));
            info!(
                path = %outcome.path.display(),
                bytes = outcome.bytes_written,
                content_type = %outcome.content_type,
                "download complete"
            );
            if !args.quiet {
                println!("saved {}", outcome.path.display());
            }
            Ok(())
        }
        Err(error) => {
            let message = error.to_string();
            session.finish_download(token, Err(error));
            anyhow::bail!(message)
        }
    }
}
