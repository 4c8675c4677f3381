//! Scripted summarization capability for tests and demos.

use super::capability::{
    Availability, DownloadProgress, SummarizerCapability, SummarizerError, SummarizerOptions,
    SummarizerSession,
};
use crate::text::extract_title;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Calls observed by a [`MockCapability`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MockCalls {
    pub availability_checks: usize,
    pub sessions_created: usize,
    pub sessions_destroyed: usize,
    /// Inputs passed to `summarize`, in call order
    pub summarized: Vec<String>,
    pub last_options: Option<SummarizerOptions>,
}

#[derive(Clone)]
struct Script {
    create_error: Option<SummarizerError>,
    /// (substring, response) pairs; first match wins
    responses: Vec<(String, String)>,
    /// Inputs containing any of these substrings fail
    failures: Vec<String>,
    progress_steps: Vec<f64>,
}

/// Capability returning preconfigured responses.
///
/// Without a matching scripted response, `summarize` answers with two key
/// points: the input's headline and its word count.
pub struct MockCapability {
    availability: Availability,
    script: Arc<Script>,
    calls: Arc<Mutex<MockCalls>>,
}

impl MockCapability {
    pub fn with_availability(availability: Availability) -> Self {
        Self {
            availability,
            script: Arc::new(Script {
                create_error: None,
                responses: Vec::new(),
                failures: Vec::new(),
                progress_steps: Vec::new(),
            }),
            calls: Arc::new(Mutex::new(MockCalls::default())),
        }
    }

    pub fn available() -> Self {
        Self::with_availability(Availability::Available)
    }

    pub fn unavailable() -> Self {
        Self::with_availability(Availability::Unavailable)
    }

    fn script_mut(&mut self) -> &mut Script {
        Arc::make_mut(&mut self.script)
    }

    /// Answer inputs containing `needle` with `response`.
    pub fn with_response(mut self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.script_mut()
            .responses
            .push((needle.into(), response.into()));
        self
    }

    /// Fail summarization of inputs containing `needle`.
    pub fn with_failure_on(mut self, needle: impl Into<String>) -> Self {
        self.script_mut().failures.push(needle.into());
        self
    }

    /// Fail every session creation with `error`.
    pub fn with_create_error(mut self, error: SummarizerError) -> Self {
        self.script_mut().create_error = Some(error);
        self
    }

    /// Report these download progress values during `create`.
    pub fn with_download_progress(mut self, steps: Vec<f64>) -> Self {
        self.script_mut().progress_steps = steps;
        self
    }

    /// Snapshot of observed calls.
    pub fn calls(&self) -> MockCalls {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummarizerCapability for MockCapability {
    fn name(&self) -> &str {
        "mock"
    }

    async fn availability(&self) -> Result<Availability, SummarizerError> {
        self.calls.lock().unwrap().availability_checks += 1;
        Ok(self.availability)
    }

    async fn create(
        &self,
        options: &SummarizerOptions,
        progress: Option<DownloadProgress>,
    ) -> Result<Arc<dyn SummarizerSession>, SummarizerError> {
        {
            let mut calls = self.calls.lock().unwrap();
            calls.last_options = Some(options.clone());
            if let Some(err) = &self.script.create_error {
                return Err(err.clone());
            }
            calls.sessions_created += 1;
        }
        if let Some(report) = progress {
            for step in &self.script.progress_steps {
                report(*step);
            }
        }
        Ok(Arc::new(MockSession {
            script: Arc::clone(&self.script),
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct MockSession {
    script: Arc<Script>,
    calls: Arc<Mutex<MockCalls>>,
}

#[async_trait]
impl SummarizerSession for MockSession {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        self.calls.lock().unwrap().summarized.push(text.to_string());

        if let Some(needle) = self.script.failures.iter().find(|n| text.contains(n.as_str())) {
            return Err(SummarizerError::SummarizationFailed(format!(
                "mock failure for input containing '{}'",
                needle
            )));
        }

        if let Some((_, response)) = self
            .script
            .responses
            .iter()
            .find(|(needle, _)| text.contains(needle.as_str()))
        {
            return Ok(response.clone());
        }

        Ok(format!(
            "- {}\n- {} words",
            extract_title(text),
            text.split_whitespace().count()
        ))
    }

    async fn destroy(&self) {
        self.calls.lock().unwrap().sessions_destroyed += 1;
    }
}
