//! Summarizer reached through a local program
//!
//! The program receives the text on stdin and writes the summary to stdout.
//! Session options are passed as `WEBMIND_SUMMARY_*` environment variables.
//! If `probe_args` are configured, running the program with them must print
//! an availability string (`available`, `downloadable`, `readily`, ...).

use super::capability::{
    Availability, DownloadProgress, SummarizerCapability, SummarizerError, SummarizerOptions,
    SummarizerSession,
};
use crate::config::SummarizerConfig;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

pub struct CommandCapability {
    program: PathBuf,
    args: Vec<String>,
    probe_args: Option<Vec<String>>,
    timeout: Duration,
}

impl CommandCapability {
    /// Build from configuration. `None` when no command is configured or the
    /// program cannot be found.
    pub fn from_config(config: &SummarizerConfig) -> Option<Self> {
        let command = config.command.as_deref()?;
        let program = resolve_program(command)?;
        Some(Self {
            program,
            args: config.args.clone(),
            probe_args: config.probe_args.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// Locate `command` either as a path or on `PATH`.
fn resolve_program(command: &str) -> Option<PathBuf> {
    let candidate = Path::new(command);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(command))
        .find(|path| path.is_file())
}

#[async_trait]
impl SummarizerCapability for CommandCapability {
    fn name(&self) -> &str {
        "command"
    }

    async fn availability(&self) -> Result<Availability, SummarizerError> {
        let Some(probe_args) = &self.probe_args else {
            return Ok(Availability::Available);
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(probe_args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| SummarizerError::CapabilityUnavailable("availability probe timed out".into()))?
            .map_err(|e| SummarizerError::CapabilityUnavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(SummarizerError::CapabilityUnavailable(format!(
                "availability probe exited with {}",
                output.status
            )));
        }
        Ok(Availability::parse(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn create(
        &self,
        options: &SummarizerOptions,
        progress: Option<DownloadProgress>,
    ) -> Result<Arc<dyn SummarizerSession>, SummarizerError> {
        if !self.program.is_file() {
            return Err(SummarizerError::SessionCreationFailed(format!(
                "summarizer program missing: {}",
                self.program.display()
            )));
        }
        // The model lives with the program; nothing to download here.
        if let Some(report) = progress {
            report(1.0);
        }
        Ok(Arc::new(CommandSession {
            program: self.program.clone(),
            args: self.args.clone(),
            options: options.clone(),
            timeout: self.timeout,
            destroyed: AtomicBool::new(false),
        }))
    }
}

struct CommandSession {
    program: PathBuf,
    args: Vec<String>,
    options: SummarizerOptions,
    timeout: Duration,
    destroyed: AtomicBool,
}

impl CommandSession {
    async fn run(&self, text: &str) -> Result<String, SummarizerError> {
        let failed = |msg: String| SummarizerError::SummarizationFailed(msg);

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .env("WEBMIND_SUMMARY_TYPE", self.options.summary_type.as_str())
            .env("WEBMIND_SUMMARY_FORMAT", self.options.format.as_str())
            .env("WEBMIND_SUMMARY_LENGTH", self.options.length.as_str())
            .env("WEBMIND_SUMMARY_CONTEXT", &self.options.shared_context)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(lang) = &self.options.output_language {
            cmd.env("WEBMIND_SUMMARY_LANGUAGE", lang);
        }

        let mut child = cmd.spawn().map_err(|e| failed(e.to_string()))?;
        let stdin = child.stdin.take();
        // Feed stdin while stdout drains; a full pipe would otherwise stall both sides.
        let feed = async move {
            match stdin {
                // Dropping the handle at the end closes the pipe.
                Some(mut stdin) => stdin.write_all(text.as_bytes()).await,
                None => Ok(()),
            }
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());
        // A program that exits without reading its input is not an error here.
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(failed(e.to_string()));
            }
        }

        let output = output.map_err(|e| failed(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(failed(if stderr.is_empty() {
                format!("summarizer exited with {}", output.status)
            } else {
                stderr
            }));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl SummarizerSession for CommandSession {
    async fn summarize(&self, text: &str) -> Result<String, SummarizerError> {
        if self.destroyed.load(Ordering::Relaxed) {
            return Err(SummarizerError::SummarizationFailed(
                "session already destroyed".to_string(),
            ));
        }
        tokio::time::timeout(self.timeout, self.run(text))
            .await
            .map_err(|_| {
                SummarizerError::SummarizationFailed(format!(
                    "summarizer timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
    }

    async fn destroy(&self) {
        self.destroyed.store(true, Ordering::Relaxed);
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn config(command: &str, args: &[&str]) -> SummarizerConfig {
        SummarizerConfig {
            command: Some(command.to_string()),
            args: args.iter().map(|a| a.to_string()).collect(),
            probe_args: None,
            timeout_secs: 10,
        }
    }

    #[test]
    fn missing_program_yields_none() {
        let cfg = config("webmind-no-such-summarizer-binary", &[]);
        assert!(CommandCapability::from_config(&cfg).is_none());
        assert!(CommandCapability::from_config(&SummarizerConfig::default()).is_none());
    }

    #[tokio::test]
    async fn summarizes_through_stdin_and_stdout() {
        let cap = CommandCapability::from_config(&config("cat", &[])).unwrap();
        assert_eq!(cap.availability().await.unwrap(), Availability::Available);

        let session = cap.create(&SummarizerOptions::default(), None).await.unwrap();
        let out = session.summarize("echoed text").await.unwrap();
        assert_eq!(out, "echoed text");
    }

    #[tokio::test]
    async fn large_input_streams_without_stalling() {
        let mut cfg = config("cat", &[]);
        cfg.timeout_secs = 3;
        let cap = CommandCapability::from_config(&cfg).unwrap();
        let session = cap.create(&SummarizerOptions::default(), None).await.unwrap();

        let text = "word ".repeat(100_000);
        let out = session.summarize(&text).await.unwrap();
        assert_eq!(out, text.trim());
    }

    #[tokio::test]
    async fn options_are_exported_as_environment() {
        let cap = CommandCapability::from_config(&config(
            "sh",
            &["-c", "printf '%s/%s' \"$WEBMIND_SUMMARY_TYPE\" \"$WEBMIND_SUMMARY_LANGUAGE\""],
        ))
        .unwrap();
        let session = cap.create(&SummarizerOptions::mindmap(), None).await.unwrap();
        assert_eq!(session.summarize("ignored").await.unwrap(), "key-points/en");
    }

    #[tokio::test]
    async fn non_zero_exit_is_summarization_failure() {
        let cap = CommandCapability::from_config(&config("sh", &["-c", "echo broken >&2; exit 3"]))
            .unwrap();
        let session = cap.create(&SummarizerOptions::default(), None).await.unwrap();
        let err = session.summarize("text").await.unwrap_err();
        assert_eq!(err, SummarizerError::SummarizationFailed("broken".to_string()));
    }

    #[tokio::test]
    async fn probe_output_sets_availability() {
        let mut cfg = config("sh", &[]);
        cfg.probe_args = Some(vec!["-c".into(), "echo after-download".into()]);
        let cap = CommandCapability::from_config(&cfg).unwrap();
        assert_eq!(cap.availability().await.unwrap(), Availability::Downloadable);
    }

    #[tokio::test]
    async fn destroyed_session_rejects_calls() {
        let cap = CommandCapability::from_config(&config("cat", &[])).unwrap();
        let session = cap.create(&SummarizerOptions::default(), None).await.unwrap();
        session.destroy().await;
        assert!(session.summarize("late").await.is_err());
    }
}
