//! External collaborators invoked by the store
//!
//! This module contains the notification sinks triggered when a running
//! timer reaches zero.

pub mod notifier;

// Re-export main types
pub use notifier::{CommandNotifier, NoopNotifier, NotificationSink};
