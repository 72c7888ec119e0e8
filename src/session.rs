//! Explicit state machine for the resolve/download lifecycle.
//!
//! The presentation layer owns one [`Session`] and drives it through
//! `begin_*`/`finish_*` pairs. Each `begin_*` bumps a generation counter and
//! hands back a [`RequestToken`]; a `finish_*` carrying a stale token is
//! discarded, so a result arriving after a reset (or after a newer request
//! started) can never resurrect a cleared view.
//!
//! Single-threaded by design: there is no true parallelism in this client, so
//! the machine is plain synchronous state, no locks.

use crate::download::DownloadError;
use crate::resolver::{ResolveError, VideoData};
use crate::variant::Variant;

/// The lifecycle state owned by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No resolution in flight and nothing resolved.
    #[default]
    Idle,
    /// A resolution request is in flight.
    Resolving,
    /// A video is resolved and its variants are selectable.
    Resolved(VideoData),
    /// One variant's download is in flight; the resolved record is retained.
    Downloading {
        /// The resolved video the download belongs to.
        data: VideoData,
        /// The variant currently being downloaded.
        variant: Variant,
    },
}

/// Token tying an async result back to the request generation that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Session state plus the generation counter that invalidates stale results.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    generation: u64,
    last_error: Option<String>,
}

impl Session {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Human-readable message from the most recent failure, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Starts a new resolution, discarding any previous video wholesale.
    pub fn begin_resolve(&mut self) -> RequestToken {
        self.generation += 1;
        self.state = SessionState::Resolving;
        self.last_error = None;
        RequestToken(self.generation)
    }

    /// Applies a finished resolution. Returns `false` (leaving the state
    /// untouched) when the token is stale.
    pub fn finish_resolve(
        &mut self,
        token: RequestToken,
        outcome: Result<VideoData, ResolveError>,
    ) -> bool {
        if token.0 != self.generation || !matches!(self.state, SessionState::Resolving) {
            return false;
        }
        match outcome {
            Ok(data) => self.state = SessionState::Resolved(data),
            Err(error) => {
                self.state = SessionState::Idle;
                self.last_error = Some(error.to_string());
            }
        }
        true
    }

    /// Starts a download of one variant. Returns `None` unless a video is
    /// resolved and no download is already in flight.
    pub fn begin_download(&mut self, variant: Variant) -> Option<RequestToken> {
        match std::mem::take(&mut self.state) {
            SessionState::Resolved(data) => {
                self.generation += 1;
                self.state = SessionState::Downloading { data, variant };
                self.last_error = None;
                Some(RequestToken(self.generation))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Applies a finished download. The resolved record is retained either
    /// way so the user can pick another variant. Returns `false` (leaving the
    /// state untouched) when the token is stale.
    pub fn finish_download(
        &mut self,
        token: RequestToken,
        outcome: Result<(), DownloadError>,
    ) -> bool {
        if token.0 != self.generation {
            return false;
        }
        match std::mem::take(&mut self.state) {
            SessionState::Downloading { data, .. } => {
                self.state = SessionState::Resolved(data);
                if let Err(error) = outcome {
                    self.last_error = Some(error.to_string());
                }
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Clears the session back to idle and invalidates outstanding tokens.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SessionState::Idle;
        self.last_error = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_video() -> VideoData {
        VideoData {
            thumbnail: "https://www.tikwm.com/c.jpg".to_string(),
            author: "@jane".to_string(),
            author_nickname: "Jane Doe".to_string(),
            author_avatar: "https://www.tikwm.com/a.jpg".to_string(),
            description: "hello".to_string(),
            duration: "02:05".to_string(),
            no_watermark: "https://www.tikwm.com/p.mp4".to_string(),
            with_watermark: "https://www.tikwm.com/w.mp4".to_string(),
            audio: "https://www.tikwm.com/m.mp3".to_string(),
            hd: None,
        }
    }

    #[test]
    fn test_session_starts_idle() {
        let session = Session::new();
        assert_eq!(*session.state(), SessionState::Idle);
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_resolve_success_transitions_to_resolved() {
        let mut session = Session::new();
        let token = session.begin_resolve();
        assert_eq!(*session.state(), SessionState::Resolving);

        assert!(session.finish_resolve(token, Ok(sample_video())));
        assert_eq!(*session.state(), SessionState::Resolved(sample_video()));
    }

    #[test]
    fn test_resolve_failure_returns_to_idle_with_message() {
        let mut session = Session::new();
        let token = session.begin_resolve();
        assert!(session.finish_resolve(token, Err(ResolveError::EmptyInput)));
        assert_eq!(*session.state(), SessionState::Idle);
        assert!(session.last_error().is_some());
    }

    #[test]
    fn test_stale_resolve_result_is_discarded_after_reset() {
        let mut session = Session::new();
        let token = session.begin_resolve();
        session.reset();

        assert!(!session.finish_resolve(token, Ok(sample_video())));
        assert_eq!(*session.state(), SessionState::Idle);
    }

    #[test]
    fn test_newer_resolve_invalidates_older_token() {
        let mut session = Session::new();
        let stale = session.begin_resolve();
        let current = session.begin_resolve();

        assert!(!session.finish_resolve(stale, Ok(sample_video())));
        assert_eq!(*session.state(), SessionState::Resolving);
        assert!(session.finish_resolve(current, Ok(sample_video())));
    }

    #[test]
    fn test_begin_download_requires_resolved_state() {
        let mut session = Session::new();
        assert!(session.begin_download(Variant::Audio).is_none());

        let token = session.begin_resolve();
        session.finish_resolve(token, Ok(sample_video()));
        assert!(session.begin_download(Variant::Audio).is_some());
    }

    #[test]
    fn test_second_download_blocked_while_first_pending() {
        let mut session = Session::new();
        let token = session.begin_resolve();
        session.finish_resolve(token, Ok(sample_video()));

        let first = session.begin_download(Variant::Audio);
        assert!(first.is_some());
        assert!(session.begin_download(Variant::Hd).is_none());
    }

    #[test]
    fn test_finish_download_retains_resolved_video() {
        let mut session = Session::new();
        let token = session.begin_resolve();
        session.finish_resolve(token, Ok(sample_video()));

        let token = session.begin_download(Variant::NoWatermark).unwrap();
        assert!(session.finish_download(token, Ok(())));
        assert_eq!(*session.state(), SessionState::Resolved(sample_video()));
        assert!(session.last_error().is_none());
    }

    #[test]
    fn test_finish_download_failure_keeps_video_and_records_message() {
        let mut session = Session::new();
        let token = session.begin_resolve();
        session.finish_resolve(token, Ok(sample_video()));

        let token = session.begin_download(Variant::Hd).unwrap();
        assert!(session.finish_download(token, Err(DownloadError::invalid_source_url(""))));
        assert_eq!(*session.state(), SessionState::Resolved(sample_video()));
        assert!(session.last_error().is_some());
    }

    #[test]
    fn test_stale_download_result_discarded_after_reset() {
        let mut session = Session::new();
        let token = session.begin_resolve();
        session.finish_resolve(token, Ok(sample_video()));
        let token = session.begin_download(Variant::Audio).unwrap();

        session.reset();
        assert!(!session.finish_download(token, Ok(())));
        assert_eq!(*session.state(), SessionState::Idle);
    }
}
