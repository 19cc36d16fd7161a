//! Presentation-facing snapshot and the views derived from it
//!
//! Sorting and searching never touch the stored collection; they are applied
//! here on a copy whenever a screen asks for its list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::timer::{Timer, TimerColor, TimerStatus};

/// Sort key for the list screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    Duration,
    #[default]
    Status,
}

/// Everything the presentation layer observes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Stored collection in insertion order
    pub timers: Vec<Timer>,
    /// True until the initial load finished
    pub is_loading: bool,
    pub sort_by: SortBy,
    pub search_query: String,
}

impl StoreSnapshot {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            is_loading: true,
            sort_by: SortBy::default(),
            search_query: String::new(),
        }
    }

    pub fn running_count(&self) -> usize {
        self.timers.iter().filter(|t| t.is_ticking()).count()
    }
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// A titled list section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerGroup {
    pub title: String,
    pub timers: Vec<Timer>,
}

/// History entry for a finished timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedTimer {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub duration: u64,
    pub color: TimerColor,
    pub completed_at: i64,
}

fn status_rank(status: TimerStatus) -> u8 {
    match status {
        TimerStatus::Running => 0,
        TimerStatus::Paused => 1,
        TimerStatus::NotStarted => 2,
        TimerStatus::Completed => 3,
    }
}

fn status_title(status: TimerStatus) -> &'static str {
    match status {
        TimerStatus::Running => "Running",
        TimerStatus::Paused => "Paused",
        TimerStatus::NotStarted => "Ready",
        TimerStatus::Completed => "Completed",
    }
}

fn matches_query(timer: &Timer, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    timer.name.to_lowercase().contains(query)
        || timer
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(query))
}

fn compare(a: &Timer, b: &Timer, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortBy::Duration => a.duration.cmp(&b.duration),
        SortBy::Status => status_rank(a.status()).cmp(&status_rank(b.status())),
    }
}

/// Filtered and sorted copy of the collection for the list screen
pub fn visible_timers(snapshot: &StoreSnapshot) -> Vec<Timer> {
    let query = snapshot.search_query.trim().to_lowercase();
    let mut timers: Vec<Timer> = snapshot
        .timers
        .iter()
        .filter(|t| matches_query(t, &query))
        .cloned()
        .collect();
    // stable: equal keys keep insertion order
    timers.sort_by(|a, b| compare(a, b, snapshot.sort_by));
    timers
}

/// Split timers into status sections, skipping empty ones
pub fn group_by_status(timers: &[Timer]) -> Vec<TimerGroup> {
    [
        TimerStatus::Running,
        TimerStatus::Paused,
        TimerStatus::NotStarted,
        TimerStatus::Completed,
    ]
    .into_iter()
    .filter_map(|status| {
        let members: Vec<Timer> = timers
            .iter()
            .filter(|t| t.status() == status)
            .cloned()
            .collect();
        (!members.is_empty()).then(|| TimerGroup {
            title: status_title(status).to_string(),
            timers: members,
        })
    })
    .collect()
}

/// Finished timers, newest completion first
pub fn completed_history(timers: &[Timer]) -> Vec<CompletedTimer> {
    let mut history: Vec<CompletedTimer> = timers
        .iter()
        .filter_map(|t| {
            t.completed_at.map(|completed_at| CompletedTimer {
                id: t.id.clone(),
                name: t.name.clone(),
                description: t.description.clone(),
                duration: t.duration,
                color: t.color,
                completed_at,
            })
        })
        .collect();
    history.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
    history
}

/// Countdown display, `H:MM:SS` above an hour and `M:SS` below
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
