//! Timer Keeper - persisted countdown timers with a shared tick scheduler
//!
//! This library owns a collection of named countdown timers, mirrors it to a
//! key-value storage backend on every change, and advances running timers
//! once per second, notifying a sink when one completes.

pub mod config;
pub mod error;
pub mod state;
pub mod services;
pub mod storage;
pub mod tasks;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{NotifyError, StorageError, ValidationError};
pub use services::{CommandNotifier, NoopNotifier, NotificationSink};
pub use state::{
    CreateTimerInput, DurationParts, SortBy, StoreSnapshot, Timer, TimerColor, TimerStatus,
    TimerStore, TimerUpdate,
};
pub use storage::{FileStorage, MemoryStorage, StorageBackend, STORAGE_KEY};
pub use utils::signals::shutdown_signal;
