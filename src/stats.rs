//! Dashboard statistics over a set of notes.

use crate::note::{Note, NoteStatus};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use std::collections::HashMap;

const TOP_TAGS: usize = 5;
const ACTIVITY_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayActivity {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub day: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total: usize,
    pub pending: usize,
    pub summarized: usize,
    pub connected: usize,
    /// Most used tags, most frequent first; ties keep first-seen order
    pub top_tags: Vec<TagCount>,
    /// One entry per UTC calendar day, oldest first, ending today
    pub activity: Vec<DayActivity>,
    /// Notes captured in the last seven days, per day
    pub average_per_day: f64,
}

impl Statistics {
    pub fn compute(notes: &[Note], now: DateTime<Utc>) -> Self {
        let count_status = |status: NoteStatus| notes.iter().filter(|n| n.status == status).count();

        Self {
            total: notes.len(),
            pending: count_status(NoteStatus::Pending),
            summarized: count_status(NoteStatus::Summarized),
            connected: count_status(NoteStatus::Connected),
            top_tags: top_tags(notes),
            activity: activity(notes, now),
            average_per_day: average_per_day(notes, now),
        }
    }

    /// Largest daily count, at least 1 (bar chart scale).
    pub fn max_daily(&self) -> usize {
        self.activity.iter().map(|d| d.count).max().unwrap_or(0).max(1)
    }
}

fn top_tags(notes: &[Note]) -> Vec<TagCount> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tag in notes.iter().flat_map(|n| n.tags.iter().flatten()) {
        let count = counts.entry(tag.as_str()).or_insert_with(|| {
            order.push(tag.as_str());
            0
        });
        *count += 1;
    }

    let mut tags: Vec<TagCount> = order
        .into_iter()
        .map(|tag| TagCount {
            tag: tag.to_string(),
            count: counts[tag],
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags.truncate(TOP_TAGS);
    tags
}

fn note_date(note: &Note) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(note.timestamp).map(|t| t.date_naive())
}

fn activity(notes: &[Note], now: DateTime<Utc>) -> Vec<DayActivity> {
    let today = now.date_naive();
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for date in notes.iter().filter_map(note_date) {
        *per_day.entry(date).or_default() += 1;
    }

    (0..ACTIVITY_DAYS)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DayActivity {
                date,
                day: date.format("%a").to_string(),
                count: per_day.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}

fn average_per_day(notes: &[Note], now: DateTime<Utc>) -> f64 {
    let since = (now - Duration::days(ACTIVITY_DAYS)).timestamp_millis();
    let recent = notes.iter().filter(|n| n.timestamp >= since).count();
    recent as f64 / ACTIVITY_DAYS as f64
}
