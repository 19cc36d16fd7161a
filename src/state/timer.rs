//! Timer record and the value types around it

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed display palette offered by the create and edit screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimerColor {
    #[default]
    #[serde(rename = "#FF6B6B")]
    Coral,
    #[serde(rename = "#4ECDC4")]
    Turquoise,
    #[serde(rename = "#45B7D1")]
    Sky,
    #[serde(rename = "#96CEB4")]
    Sage,
    #[serde(rename = "#FFEEAD")]
    Cream,
    #[serde(rename = "#D4A5A5")]
    Rose,
    #[serde(rename = "#9B59B6")]
    Amethyst,
    #[serde(rename = "#3498DB")]
    Ocean,
}

impl TimerColor {
    /// All palette entries in display order
    pub const PALETTE: [TimerColor; 8] = [
        TimerColor::Coral,
        TimerColor::Turquoise,
        TimerColor::Sky,
        TimerColor::Sage,
        TimerColor::Cream,
        TimerColor::Rose,
        TimerColor::Amethyst,
        TimerColor::Ocean,
    ];

    /// Hex color string as stored on disk
    pub fn hex(&self) -> &'static str {
        match self {
            TimerColor::Coral => "#FF6B6B",
            TimerColor::Turquoise => "#4ECDC4",
            TimerColor::Sky => "#45B7D1",
            TimerColor::Sage => "#96CEB4",
            TimerColor::Cream => "#FFEEAD",
            TimerColor::Rose => "#D4A5A5",
            TimerColor::Amethyst => "#9B59B6",
            TimerColor::Ocean => "#3498DB",
        }
    }
}

impl fmt::Display for TimerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Hours/minutes/seconds as entered on the duration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationParts {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationParts {
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Total length in seconds, `None` when it does not fit in a `u64`
    pub fn checked_total_seconds(&self) -> Option<u64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }

    /// Total length in seconds, saturating at `u64::MAX`
    pub fn total_seconds(&self) -> u64 {
        self.checked_total_seconds().unwrap_or(u64::MAX)
    }

    /// Split a stored duration back into form fields
    pub fn from_seconds(total: u64) -> Self {
        Self {
            hours: total / 3600,
            minutes: (total % 3600) / 60,
            seconds: total % 60,
        }
    }
}

/// Derived lifecycle position of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    NotStarted,
    Running,
    Paused,
    Completed,
}

/// A named countdown, the only persisted entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Full run length in seconds
    pub duration: u64,
    /// Seconds left, never above `duration`
    pub remaining_time: u64,
    pub color: TimerColor,
    pub is_running: bool,
    pub is_paused: bool,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds of the 1 -> 0 transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
}

impl Timer {
    /// Build a fresh, not-started timer from create input
    pub fn from_input(id: String, input: CreateTimerInput, created_at: i64) -> Self {
        let duration = input.duration.total_seconds();
        Self {
            id,
            name: input.name,
            description: input.description,
            duration,
            remaining_time: duration,
            color: input.color,
            is_running: false,
            is_paused: false,
            created_at,
            completed_at: None,
        }
    }

    pub fn status(&self) -> TimerStatus {
        if self.remaining_time == 0 {
            TimerStatus::Completed
        } else if self.is_running {
            TimerStatus::Running
        } else if self.is_paused {
            TimerStatus::Paused
        } else {
            TimerStatus::NotStarted
        }
    }

    pub fn is_completed(&self) -> bool {
        self.remaining_time == 0
    }

    /// Running with time left, i.e. the scheduler has work for it
    pub fn is_ticking(&self) -> bool {
        self.is_running && self.remaining_time > 0
    }

    /// Start/pause flip; stopping a running timer marks it paused
    pub fn toggle(&mut self) {
        if self.is_running {
            self.is_paused = true;
        }
        self.is_running = !self.is_running;
    }

    pub fn reset(&mut self) {
        self.is_running = false;
        self.is_paused = false;
        self.remaining_time = self.duration;
        self.completed_at = None;
    }

    /// Advance one second. Returns true when this step completed the timer.
    pub fn tick(&mut self, now_ms: i64) -> bool {
        if !self.is_ticking() {
            return false;
        }
        self.remaining_time -= 1;
        if self.remaining_time == 0 {
            self.completed_at = Some(now_ms);
            return true;
        }
        false
    }

    /// Merge partial fields, keeping `remaining_time <= duration`
    pub fn apply(&mut self, update: TimerUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(duration) = update.duration {
            self.duration = duration.max(1);
        }
        if let Some(remaining) = update.remaining_time {
            self.remaining_time = remaining;
        }
        if let Some(color) = update.color {
            self.color = color;
        }
        self.remaining_time = self.remaining_time.min(self.duration);
    }
}

/// Input of the create operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTimerInput {
    pub name: String,
    pub description: Option<String>,
    pub duration: DurationParts,
    pub color: TimerColor,
}

impl CreateTimerInput {
    pub fn new(name: impl Into<String>, duration: DurationParts, color: TimerColor) -> Self {
        Self {
            name: name.into(),
            description: None,
            duration,
            color,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial field set merged by the update operation
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub duration: Option<u64>,
    pub remaining_time: Option<u64>,
    pub color: Option<TimerColor>,
}

impl TimerUpdate {
    /// The edit-screen update: overwrite fields and restart the countdown
    /// from the new duration
    pub fn edit(
        name: impl Into<String>,
        description: Option<String>,
        duration: DurationParts,
        color: TimerColor,
    ) -> Self {
        let total = duration.total_seconds();
        Self {
            name: Some(name.into()),
            description: Some(description),
            duration: Some(total),
            remaining_time: Some(total),
            color: Some(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(duration: u64) -> Timer {
        Timer::from_input(
            "1".to_string(),
            CreateTimerInput::new("tea", DurationParts::from_seconds(duration), TimerColor::Sky),
            1_000,
        )
    }

    #[test]
    fn duration_parts_split_and_sum() {
        let parts = DurationParts::new(1, 2, 3);
        assert_eq!(parts.total_seconds(), 3723);
        assert_eq!(DurationParts::from_seconds(3723), parts);
        assert_eq!(DurationParts::from_seconds(59), DurationParts::new(0, 0, 59));
    }

    #[test]
    fn oversized_parts_do_not_overflow() {
        let huge = DurationParts::new(u64::MAX / 1000, 0, 0);
        assert_eq!(huge.checked_total_seconds(), None);
        assert_eq!(huge.total_seconds(), u64::MAX);

        let edge = DurationParts::new(0, u64::MAX / 60, u64::MAX);
        assert_eq!(edge.checked_total_seconds(), None);
        assert_eq!(DurationParts::new(0, 0, u64::MAX).checked_total_seconds(), Some(u64::MAX));
    }

    #[test]
    fn palette_defaults_to_coral() {
        assert_eq!(TimerColor::default(), TimerColor::Coral);
        assert_eq!(TimerColor::default().hex(), "#FF6B6B");
    }

    #[test]
    fn status_follows_flags() {
        let mut timer = sample(2);
        assert_eq!(timer.status(), TimerStatus::NotStarted);
        timer.toggle();
        assert_eq!(timer.status(), TimerStatus::Running);
        timer.toggle();
        assert_eq!(timer.status(), TimerStatus::Paused);
        assert!(timer.is_paused);
        timer.toggle();
        timer.tick(5);
        timer.tick(6);
        assert_eq!(timer.status(), TimerStatus::Completed);
        assert!(timer.is_running);
    }

    #[test]
    fn tick_completes_exactly_once() {
        let mut timer = sample(1);
        timer.toggle();
        assert!(timer.tick(42));
        assert_eq!(timer.completed_at, Some(42));
        assert!(!timer.tick(43));
        assert_eq!(timer.remaining_time, 0);
        assert_eq!(timer.completed_at, Some(42));
    }

    #[test]
    fn tick_ignores_stopped_timer() {
        let mut timer = sample(5);
        assert!(!timer.tick(1));
        assert_eq!(timer.remaining_time, 5);
    }

    #[test]
    fn apply_clamps_remaining_to_duration() {
        let mut timer = sample(100);
        timer.apply(TimerUpdate {
            duration: Some(10),
            ..Default::default()
        });
        assert_eq!(timer.duration, 10);
        assert_eq!(timer.remaining_time, 10);

        timer.apply(TimerUpdate {
            description: Some(Some("green".to_string())),
            ..Default::default()
        });
        assert_eq!(timer.description.as_deref(), Some("green"));
        timer.apply(TimerUpdate {
            description: Some(None),
            ..Default::default()
        });
        assert_eq!(timer.description, None);
    }

    #[test]
    fn serializes_camel_case_with_hex_color() {
        let timer = sample(3);
        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(json["remainingTime"], 3);
        assert_eq!(json["isRunning"], false);
        assert_eq!(json["color"], "#45B7D1");
        assert!(json.get("completedAt").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn unknown_color_is_rejected() {
        let raw = r##"{"id":"1","name":"x","duration":1,"remainingTime":1,"color":"#000000",
            "isRunning":false,"isPaused":false,"createdAt":1}"##;
        assert!(serde_json::from_str::<Timer>(raw).is_err());
    }
}
