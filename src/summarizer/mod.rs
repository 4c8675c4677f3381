//! Summarization adapter
//!
//! Wraps a platform summarization capability behind a small state machine:
//! `unchecked → {unavailable, downloadable, downloading, available}`.
//! Sessions are only created from `available` or `downloadable` and only
//! after a user activation has been recorded.

mod activation;
mod capability;
mod command;
mod mock;
mod session;

pub use activation::UserActivation;
pub use capability::{
    AbsentCapability, Availability, DownloadProgress, SummarizerCapability, SummarizerError,
    SummarizerOptions, SummarizerSession, SummaryFormat, SummaryLength, SummaryType,
};
pub use command::CommandCapability;
pub use mock::{MockCalls, MockCapability};
pub use session::{SessionHandle, SessionWorker};

use crate::config::SummarizerConfig;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Adapter state: the last availability observed, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummarizerState {
    Unchecked,
    Checked(Availability),
}

/// Informational availability report for the UI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiStatus {
    pub available: bool,
    pub status: Availability,
    pub message: &'static str,
}

impl AiStatus {
    pub fn from_availability(status: Availability) -> Self {
        let message = match status {
            Availability::Available => "✅ On-device AI available, generating smart mind map",
            Availability::Downloadable => "⬇️ AI model needs to be downloaded",
            Availability::Downloading => "⬇️ AI model is downloading, using basic algorithm for now",
            Availability::Unavailable => "❌ AI unavailable, using basic algorithm",
        };
        Self {
            available: status == Availability::Available,
            status,
            message,
        }
    }
}

/// Select the capability for this environment.
///
/// A configured, resolvable summarizer program wins; otherwise the
/// environment has no summarizer.
pub fn probe_capability(config: &SummarizerConfig) -> Arc<dyn SummarizerCapability> {
    match CommandCapability::from_config(config) {
        Some(cap) => {
            tracing::info!(program = %cap.program().display(), "using command summarizer");
            Arc::new(cap)
        }
        None => {
            if let Some(command) = &config.command {
                tracing::warn!(%command, "summarizer command not found; AI summarization disabled");
            }
            Arc::new(AbsentCapability)
        }
    }
}

/// The summarization adapter.
pub struct Summarizer {
    capability: Arc<dyn SummarizerCapability>,
    activation: UserActivation,
    state: Mutex<SummarizerState>,
}

impl Summarizer {
    pub fn new(capability: Arc<dyn SummarizerCapability>, activation: UserActivation) -> Self {
        Self {
            capability,
            activation,
            state: Mutex::new(SummarizerState::Unchecked),
        }
    }

    /// An adapter for environments with no summarizer.
    pub fn absent() -> Self {
        Self::new(Arc::new(AbsentCapability), UserActivation::new())
    }

    pub fn activation(&self) -> &UserActivation {
        &self.activation
    }

    pub fn state(&self) -> SummarizerState {
        *self.state.lock().unwrap()
    }

    /// Query the capability and record the result.
    ///
    /// A failing probe counts as unavailable.
    pub async fn check_availability(&self) -> Availability {
        let availability = match self.capability.availability().await {
            Ok(a) => a,
            Err(e) => {
                tracing::warn!(capability = self.capability.name(), error = %e, "availability check failed");
                Availability::Unavailable
            }
        };
        *self.state.lock().unwrap() = SummarizerState::Checked(availability);
        availability
    }

    /// Availability report for display.
    pub async fn ai_status(&self) -> AiStatus {
        AiStatus::from_availability(self.check_availability().await)
    }

    /// Create a session.
    ///
    /// Fails with `CapabilityUnavailable` unless the capability is available
    /// or downloadable, and with `RequiresUserActivation` when no user
    /// interaction has been recorded. `progress` receives download progress
    /// clamped to `0.0..=1.0`.
    pub async fn create_session(
        &self,
        options: &SummarizerOptions,
        progress: Option<DownloadProgress>,
    ) -> Result<SessionHandle, SummarizerError> {
        let availability = match self.state() {
            SummarizerState::Checked(a) if a.allows_session() => a,
            _ => self.check_availability().await,
        };

        match availability {
            Availability::Available | Availability::Downloadable => {}
            Availability::Downloading => {
                return Err(SummarizerError::CapabilityUnavailable(
                    "model download in progress".to_string(),
                ))
            }
            Availability::Unavailable => {
                return Err(SummarizerError::CapabilityUnavailable(format!(
                    "{} summarizer reports unavailable",
                    self.capability.name()
                )))
            }
        }

        if !self.activation.is_active() {
            return Err(SummarizerError::RequiresUserActivation);
        }

        let progress = progress.map(|report| -> DownloadProgress {
            Arc::new(move |fraction: f64| report(fraction.clamp(0.0, 1.0)))
        });

        let session = self
            .capability
            .create(options, progress)
            .await
            .map_err(|e| match e {
                SummarizerError::SessionCreationFailed(_)
                | SummarizerError::CapabilityUnavailable(_)
                | SummarizerError::RequiresUserActivation => e,
                other => SummarizerError::SessionCreationFailed(other.to_string()),
            })?;

        if availability == Availability::Downloadable {
            // the download happened inside create
            *self.state.lock().unwrap() = SummarizerState::Checked(Availability::Available);
        }
        tracing::debug!(capability = self.capability.name(), "summarizer session created");
        Ok(SessionHandle::new(session))
    }

    /// Summarize one text with a throwaway session.
    pub async fn summarize_once(
        &self,
        text: &str,
        options: &SummarizerOptions,
    ) -> Result<String, SummarizerError> {
        let session = self.create_session(options, None).await?;
        let result = session.summarize(text).await;
        session.destroy().await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(cap: Arc<MockCapability>, active: bool) -> Summarizer {
        let activation = UserActivation::new();
        if active {
            activation.activate();
        }
        Summarizer::new(cap, activation)
    }

    #[tokio::test]
    async fn starts_unchecked_and_records_availability() {
        let s = adapter(Arc::new(MockCapability::with_availability(Availability::Downloading)), true);
        assert_eq!(s.state(), SummarizerState::Unchecked);
        assert_eq!(s.check_availability().await, Availability::Downloading);
        assert_eq!(s.state(), SummarizerState::Checked(Availability::Downloading));
    }

    #[tokio::test]
    async fn absent_adapter_is_unavailable() {
        let s = Summarizer::absent();
        s.activation().activate();
        let err = s.create_session(&SummarizerOptions::default(), None).await.err().unwrap();
        assert!(matches!(err, SummarizerError::CapabilityUnavailable(_)));
    }

    #[tokio::test]
    async fn requires_user_activation() {
        let cap = Arc::new(MockCapability::available());
        let s = adapter(cap.clone(), false);
        let err = s.create_session(&SummarizerOptions::default(), None).await.err().unwrap();
        assert_eq!(err, SummarizerError::RequiresUserActivation);
        assert_eq!(cap.calls().sessions_created, 0);
    }

    #[tokio::test]
    async fn downloading_rejects_sessions() {
        let cap = Arc::new(MockCapability::with_availability(Availability::Downloading));
        let s = adapter(cap.clone(), true);
        let err = s.create_session(&SummarizerOptions::default(), None).await.err().unwrap();
        assert!(matches!(err, SummarizerError::CapabilityUnavailable(_)));
    }

    #[tokio::test]
    async fn downloadable_creates_session_and_reports_clamped_progress() {
        let cap = Arc::new(
            MockCapability::with_availability(Availability::Downloadable)
                .with_download_progress(vec![-0.5, 0.25, 1.5]),
        );
        let s = adapter(cap.clone(), true);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let progress: DownloadProgress = Arc::new(move |p| sink.lock().unwrap().push(p));

        let session = s
            .create_session(&SummarizerOptions::default(), Some(progress))
            .await
            .unwrap();
        session.destroy().await;

        assert_eq!(*seen.lock().unwrap(), vec![0.0, 0.25, 1.0]);
        assert_eq!(s.state(), SummarizerState::Checked(Availability::Available));
    }

    #[tokio::test]
    async fn summarize_strips_markup_and_wraps_errors() {
        let cap = Arc::new(MockCapability::available().with_failure_on("explode"));
        let s = adapter(cap.clone(), true);
        let session = s.create_session(&SummarizerOptions::default(), None).await.unwrap();

        session.summarize("<p>Hello <em>there</em>.</p>").await.unwrap();
        let err = session.summarize("<b>explode</b>").await.unwrap_err();
        session.destroy().await;

        assert!(matches!(err, SummarizerError::SummarizationFailed(_)));
        let calls = cap.calls();
        assert_eq!(calls.summarized, vec!["Hello there.".to_string(), "explode".to_string()]);
        assert_eq!(calls.sessions_destroyed, 1);
    }

    #[tokio::test]
    async fn create_failure_is_session_creation_failed() {
        let cap = Arc::new(
            MockCapability::available()
                .with_create_error(SummarizerError::SessionCreationFailed("no memory".into())),
        );
        let s = adapter(cap, true);
        let err = s.create_session(&SummarizerOptions::default(), None).await.err().unwrap();
        assert_eq!(err, SummarizerError::SessionCreationFailed("no memory".into()));
    }

    #[tokio::test]
    async fn dropped_handle_is_released_in_background() {
        let cap = Arc::new(MockCapability::available());
        let s = adapter(cap.clone(), true);
        let session = s.create_session(&SummarizerOptions::default(), None).await.unwrap();
        drop(session);
        tokio::task::yield_now().await;
        assert_eq!(cap.calls().sessions_destroyed, 1);
    }

    #[tokio::test]
    async fn summarize_once_destroys_session() {
        let cap = Arc::new(MockCapability::available());
        let s = adapter(cap.clone(), true);
        let out = s.summarize_once("One line.", &SummarizerOptions::default()).await.unwrap();
        assert!(out.starts_with("- One line."));
        let calls = cap.calls();
        assert_eq!(calls.sessions_created, calls.sessions_destroyed);
    }

    #[test]
    fn status_messages() {
        assert!(AiStatus::from_availability(Availability::Available).available);
        let status = AiStatus::from_availability(Availability::Unavailable);
        assert!(!status.available);
        assert_eq!(status.message, "❌ AI unavailable, using basic algorithm");
    }
}
