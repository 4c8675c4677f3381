//! Scoped summarizer sessions

use super::capability::{SummarizerError, SummarizerSession};
use crate::text::strip_markup;
use std::sync::Arc;

/// Owned handle to a live session.
///
/// Call [`SessionHandle::destroy`] when done. A handle dropped without being
/// destroyed (its task was abandoned, or a caller bailed out early) schedules
/// the release on the current tokio runtime instead.
pub struct SessionHandle {
    session: Option<Arc<dyn SummarizerSession>>,
}

impl SessionHandle {
    pub(crate) fn new(session: Arc<dyn SummarizerSession>) -> Self {
        Self {
            session: Some(session),
        }
    }

    /// Summarize `text` after removing markup tags.
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        match &self.session {
            Some(session) => summarize_with(session.as_ref(), text).await,
            None => Err(SummarizerError::SummarizationFailed(
                "session already destroyed".to_string(),
            )),
        }
    }

    /// A cloneable worker for concurrent summarization on this session.
    ///
    /// Workers do not own the session; destroying the handle releases it
    /// for every worker.
    pub fn worker(&self) -> Option<SessionWorker> {
        self.session.as_ref().map(|s| SessionWorker {
            session: Arc::clone(s),
        })
    }

    /// Release the session.
    pub async fn destroy(mut self) {
        if let Some(session) = self.session.take() {
            session.destroy().await;
            tracing::debug!("summarizer session destroyed");
        }
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        tracing::warn!("summarizer session dropped without destroy; releasing in background");
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move { session.destroy().await });
            }
            Err(_) => tracing::error!("no runtime to release summarizer session"),
        }
    }
}

/// Shared, cloneable access to a session for fan-out tasks.
#[derive(Clone)]
pub struct SessionWorker {
    session: Arc<dyn SummarizerSession>,
}

impl SessionWorker {
    pub async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        summarize_with(self.session.as_ref(), text).await
    }
}

async fn summarize_with(
    session: &dyn SummarizerSession,
    text: &str,
) -> Result<String, SummarizerError> {
    let clean = strip_markup(text);
    session.summarize(&clean).await.map_err(|e| match e {
        SummarizerError::SummarizationFailed(msg) => SummarizerError::SummarizationFailed(msg),
        other => SummarizerError::SummarizationFailed(other.to_string()),
    })
}
