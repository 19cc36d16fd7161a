//! Background tasks module
//!
//! This module contains the recurring task that advances running timers.

pub mod tick_scheduler;

// Re-export main functions
pub use tick_scheduler::tick_scheduler_task;
