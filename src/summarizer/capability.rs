//! Summarization capability contract
//!
//! Abstracts over how the on-device summarizer is reached so the adapter and
//! the mind-map builder don't depend on a concrete runtime. Implementations:
//! - `CommandCapability`: a local summarizer program (production)
//! - `AbsentCapability`: no summarizer in this environment
//! - `MockCapability`: scripted responses (testing)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Availability reported by a summarization capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Unavailable,
    Downloadable,
    Downloading,
    Available,
}

impl Availability {
    /// Parse an availability string.
    ///
    /// Accepts both platform vocabularies (`available`/`downloadable`/... and
    /// the older `readily`/`after-download`/`no`). Anything unrecognized is
    /// treated as unavailable.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "available" | "readily" => Availability::Available,
            "downloadable" | "after-download" => Availability::Downloadable,
            "downloading" => Availability::Downloading,
            _ => Availability::Unavailable,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Unavailable => "unavailable",
            Availability::Downloadable => "downloadable",
            Availability::Downloading => "downloading",
            Availability::Available => "available",
        }
    }

    /// Whether a session may be created in this state.
    pub fn allows_session(&self) -> bool {
        matches!(self, Availability::Available | Availability::Downloadable)
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryType {
    KeyPoints,
    Tldr,
    Teaser,
    Headline,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::KeyPoints => "key-points",
            SummaryType::Tldr => "tldr",
            SummaryType::Teaser => "teaser",
            SummaryType::Headline => "headline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryFormat {
    PlainText,
    Markdown,
}

impl SummaryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryFormat::PlainText => "plain-text",
            SummaryFormat::Markdown => "markdown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryLength {
    Short,
    Medium,
    Long,
}

impl SummaryLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryLength::Short => "short",
            SummaryLength::Medium => "medium",
            SummaryLength::Long => "long",
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizerOptions {
    #[serde(rename = "type")]
    pub summary_type: SummaryType,
    pub format: SummaryFormat,
    pub length: SummaryLength,
    pub shared_context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_language: Option<String>,
}

impl Default for SummarizerOptions {
    fn default() -> Self {
        Self {
            summary_type: SummaryType::Tldr,
            format: SummaryFormat::PlainText,
            length: SummaryLength::Medium,
            shared_context: "Web content summary".to_string(),
            output_language: None,
        }
    }
}

impl SummarizerOptions {
    /// Options used when summarizing notes into mind-map topics.
    pub fn mindmap() -> Self {
        Self {
            summary_type: SummaryType::KeyPoints,
            format: SummaryFormat::PlainText,
            length: SummaryLength::Short,
            shared_context:
                "Extract key topics and concepts from web content for hierarchical categorization."
                    .to_string(),
            output_language: Some("en".to_string()),
        }
    }
}

/// Download progress callback, called with a fraction in `0.0..=1.0`.
pub type DownloadProgress = Arc<dyn Fn(f64) + Send + Sync>;

/// Errors from summarization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SummarizerError {
    #[error("summarizer unavailable: {0}")]
    CapabilityUnavailable(String),
    #[error("summarizer session requires a prior user activation")]
    RequiresUserActivation,
    #[error("failed to create summarizer session: {0}")]
    SessionCreationFailed(String),
    #[error("summarization failed: {0}")]
    SummarizationFailed(String),
}

/// A platform summarization capability.
#[async_trait]
pub trait SummarizerCapability: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Query the current availability.
    async fn availability(&self) -> Result<Availability, SummarizerError>;

    /// Create a session. A downloadable model starts downloading here and
    /// reports progress through `progress`.
    async fn create(
        &self,
        options: &SummarizerOptions,
        progress: Option<DownloadProgress>,
    ) -> Result<Arc<dyn SummarizerSession>, SummarizerError>;
}

/// A live session holding model resources until destroyed.
#[async_trait]
pub trait SummarizerSession: Send + Sync {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError>;

    /// Release the session's resources.
    async fn destroy(&self);
}

/// Capability for environments without a summarizer.
#[derive(Debug, Default)]
pub struct AbsentCapability;

#[async_trait]
impl SummarizerCapability for AbsentCapability {
    fn name(&self) -> &str {
        "absent"
    }

    async fn availability(&self) -> Result<Availability, SummarizerError> {
        Ok(Availability::Unavailable)
    }

    async fn create(
        &self,
        _options: &SummarizerOptions,
        _progress: Option<DownloadProgress>,
    ) -> Result<Arc<dyn SummarizerSession>, SummarizerError> {
        Err(SummarizerError::CapabilityUnavailable(
            "no summarizer in this environment".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_vocabularies() {
        assert_eq!(Availability::parse("available"), Availability::Available);
        assert_eq!(Availability::parse("readily"), Availability::Available);
        assert_eq!(Availability::parse("after-download"), Availability::Downloadable);
        assert_eq!(Availability::parse("downloadable"), Availability::Downloadable);
        assert_eq!(Availability::parse("downloading\n"), Availability::Downloading);
        assert_eq!(Availability::parse("no"), Availability::Unavailable);
        assert_eq!(Availability::parse("garbage"), Availability::Unavailable);
    }

    #[test]
    fn only_available_and_downloadable_allow_sessions() {
        assert!(Availability::Available.allows_session());
        assert!(Availability::Downloadable.allows_session());
        assert!(!Availability::Downloading.allows_session());
        assert!(!Availability::Unavailable.allows_session());
    }

    #[test]
    fn options_serialize_with_platform_names() {
        let json = serde_json::to_value(SummarizerOptions::mindmap()).unwrap();
        assert_eq!(json["type"], "key-points");
        assert_eq!(json["format"], "plain-text");
        assert_eq!(json["length"], "short");
        assert_eq!(json["outputLanguage"], "en");
    }

    #[tokio::test]
    async fn absent_capability_is_unavailable() {
        let cap = AbsentCapability;
        assert_eq!(cap.availability().await.unwrap(), Availability::Unavailable);
        let err = cap.create(&SummarizerOptions::default(), None).await.err().unwrap();
        assert!(matches!(err, SummarizerError::CapabilityUnavailable(_)));
    }
}
