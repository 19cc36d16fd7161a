//! State management module
//!
//! This module contains the timer model, the owning store and the views the
//! presentation layer derives from it.

pub mod timer;
pub mod timer_store;
pub mod view;

// Re-export main types
pub use timer::{CreateTimerInput, DurationParts, Timer, TimerColor, TimerStatus, TimerUpdate};
pub use timer_store::{TickOutcome, TimerStore, TICK_PERIOD};
pub use view::{
    completed_history, format_clock, group_by_status, visible_timers, CompletedTimer, SortBy,
    StoreSnapshot, TimerGroup,
};
