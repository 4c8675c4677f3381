//! Mind-map builder
//!
//! Checks summarizer availability once per batch. When available, one
//! session summarizes every note into key points (fan-out with a single
//! join); the AI output replaces label extraction while classification stays
//! rule-based. Any failure on that path sends the whole batch down the
//! heuristic path. The builder itself never fails.

use super::types::{Mindmap, MindmapLink, MindmapNode, ROOT_ID};
use crate::config::MindmapConfig;
use crate::note::Note;
use crate::summarizer::{Availability, SessionWorker, Summarizer, SummarizerError, SummarizerOptions};
use crate::text::{
    category_icon, extract_title, extract_top_keywords, infer_category, strip_markup,
    truncate_chars,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Which path produced a mind map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPath {
    Summarizer,
    Heuristic,
}

/// Words of the AI main topic used as classification keywords.
const TOPIC_KEYWORDS: usize = 5;

/// A note with its category and display label decided.
struct Placement<'a> {
    note: &'a Note,
    category: String,
    label: String,
    full_summary: Option<String>,
}

pub struct MindmapBuilder {
    summarizer: Arc<Summarizer>,
    config: MindmapConfig,
}

impl MindmapBuilder {
    pub fn new(summarizer: Arc<Summarizer>) -> Self {
        Self {
            summarizer,
            config: MindmapConfig::default(),
        }
    }

    /// A builder that only uses the heuristic path.
    pub fn heuristic() -> Self {
        Self::new(Arc::new(Summarizer::absent()))
    }

    pub fn with_config(mut self, config: MindmapConfig) -> Self {
        self.config = config;
        self
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Build the mind map for `notes`.
    pub async fn build(&self, notes: &[Note]) -> Mindmap {
        self.build_with_path(notes).await.0
    }

    /// Build the mind map and report which path produced it.
    pub async fn build_with_path(&self, notes: &[Note]) -> (Mindmap, BuildPath) {
        let notes = unique_notes(notes);
        if notes.is_empty() {
            return (Mindmap::empty(), BuildPath::Heuristic);
        }
        tracing::info!(notes = notes.len(), "building mind map");

        let availability = self.summarizer.check_availability().await;
        if availability != Availability::Available {
            tracing::info!(%availability, "summarizer not available; using heuristic path");
            return (assemble(self.heuristic_placements(&notes)), BuildPath::Heuristic);
        }

        match self.summarized_placements(&notes).await {
            Ok(placements) => (assemble(placements), BuildPath::Summarizer),
            Err(e) => {
                tracing::warn!(error = %e, "summarizer path failed; falling back to heuristic path");
                (assemble(self.heuristic_placements(&notes)), BuildPath::Heuristic)
            }
        }
    }

    fn heuristic_placements<'a>(&self, notes: &[&'a Note]) -> Vec<Placement<'a>> {
        notes
            .iter()
            .map(|&note| {
                let text = note.text().to_lowercase();
                let keywords = extract_top_keywords(&text, self.config.top_keywords);
                let category = infer_category(&text, &keywords);
                tracing::debug!(note = %note.id, %category, ?keywords, "classified note");
                Placement {
                    note,
                    category,
                    label: extract_title(note.text()),
                    full_summary: note.summary.clone(),
                }
            })
            .collect()
    }

    /// Summarize every note on one session, then classify.
    ///
    /// The session is destroyed before returning, whatever the outcome.
    async fn summarized_placements<'a>(
        &self,
        notes: &[&'a Note],
    ) -> Result<Vec<Placement<'a>>, SummarizerError> {
        let session = self
            .summarizer
            .create_session(&SummarizerOptions::mindmap(), None)
            .await?;
        let outputs = match session.worker() {
            Some(worker) => self.summarize_all(worker, notes).await,
            None => Err(SummarizerError::SummarizationFailed("session unavailable".into())),
        };
        session.destroy().await;
        let outputs = outputs?;

        Ok(notes
            .iter()
            .zip(outputs)
            .map(|(&note, output)| {
                let points = parse_key_points(&output);
                let main_topic = points
                    .first()
                    .cloned()
                    .unwrap_or_else(|| extract_title(note.text()));
                let keywords: Vec<String> = main_topic
                    .split_whitespace()
                    .take(TOPIC_KEYWORDS)
                    .map(str::to_string)
                    .collect();
                let category = infer_category(&output, &keywords);
                tracing::debug!(note = %note.id, %category, sub_topics = points.len().saturating_sub(1), "summarized note");
                Placement {
                    note,
                    category,
                    label: main_topic,
                    full_summary: Some(output),
                }
            })
            .collect())
    }

    /// Fan out one summarize call per note, bounded by the configured
    /// concurrency. Results come back in input order. The first failure
    /// aborts the rest.
    async fn summarize_all(
        &self,
        worker: SessionWorker,
        notes: &[&Note],
    ) -> Result<Vec<String>, SummarizerError> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for (index, note) in notes.iter().enumerate() {
            let input = summarizer_input(note, self.config.max_input_chars);
            let worker = worker.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                (index, worker.summarize(&input).await)
            });
        }

        let mut outputs: Vec<Option<String>> = vec![None; notes.len()];
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined
                .map_err(|e| SummarizerError::SummarizationFailed(format!("summarize task failed: {}", e)));
            match outcome {
                Ok((index, Ok(text))) => outputs[index] = Some(text),
                Ok((index, Err(e))) => {
                    tracing::warn!(note = %notes[index].id, error = %e, "note summarization failed");
                    tasks.abort_all();
                    return Err(e);
                }
                Err(e) => {
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        outputs
            .into_iter()
            .map(|o| o.ok_or_else(|| SummarizerError::SummarizationFailed("missing summary".into())))
            .collect()
    }
}

/// Note text sent to the summarizer: markup stripped, trimmed, and capped.
fn summarizer_input(note: &Note, max_chars: usize) -> String {
    let clean = strip_markup(note.text());
    truncate_chars(clean.trim(), max_chars)
}

/// Split summarizer output into key points: one per non-blank line, with
/// leading `-`, `•` or `*` bullet markers removed.
pub fn parse_key_points(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.strip_prefix(['-', '•', '*'])
                .unwrap_or(line)
                .trim()
                .to_string()
        })
        .collect()
}

/// Drop notes whose id is empty or was already seen.
fn unique_notes(notes: &[Note]) -> Vec<&Note> {
    let mut seen = HashSet::new();
    notes
        .iter()
        .filter(|note| {
            if note.id.is_empty() {
                tracing::warn!("note without an id skipped");
                return false;
            }
            let fresh = seen.insert(note.id.as_str());
            if !fresh {
                tracing::warn!(note = %note.id, "duplicate note id skipped");
            }
            fresh
        })
        .collect()
}

/// Group placements by category (first-encounter order) and emit the tree.
fn assemble(placements: Vec<Placement<'_>>) -> Mindmap {
    let mut groups: Vec<(String, Vec<Placement<'_>>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for placement in placements {
        match index.get(&placement.category) {
            Some(&i) => groups[i].1.push(placement),
            None => {
                index.insert(placement.category.clone(), groups.len());
                groups.push((placement.category.clone(), vec![placement]));
            }
        }
    }

    let mut map = Mindmap::empty();
    for (i, (category, members)) in groups.into_iter().enumerate() {
        let group = i + 1;
        let category_id = format!("category-{}", group);
        map.nodes.push(MindmapNode {
            id: category_id.clone(),
            label: format!("{} {}", category_icon(&category), category),
            note_id: String::new(),
            group,
            full_summary: None,
        });
        map.links.push(MindmapLink::new(ROOT_ID, category_id.as_str()));

        for placement in members {
            let node_id = format!("note-{}", placement.note.id);
            map.nodes.push(MindmapNode {
                id: node_id.clone(),
                label: placement.label,
                note_id: placement.note.id.clone(),
                group,
                full_summary: placement.full_summary,
            });
            map.links.push(MindmapLink::new(category_id.as_str(), node_id));
        }
    }

    tracing::info!(
        categories = map.category_nodes().count(),
        nodes = map.nodes.len(),
        links = map.links.len(),
        "mind map assembled"
    );
    map
}
