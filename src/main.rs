//! Timer Keeper - headless host for the timer store
//!
//! Constructs the store, loads the stored timers, keeps the scheduler alive
//! and logs state changes until a shutdown signal arrives.

use std::sync::Arc;
use tracing::{debug, info};

use timer_keeper::{
    config::Config,
    services::{CommandNotifier, NoopNotifier, NotificationSink},
    state::{format_clock, TimerStore},
    storage::FileStorage,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("timer_keeper={}", config.log_level()))
        .init();

    info!("Starting timer-keeper v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: data_dir={}, tick={}ms, resume={}",
          config.data_dir.display(), config.tick_ms, config.resume);

    let notifier: Arc<dyn NotificationSink> = match &config.on_complete {
        Some(command) => {
            info!("Completion command: {}", command);
            Arc::new(CommandNotifier::new(command.clone()))
        }
        None => Arc::new(NoopNotifier),
    };
    let storage = Arc::new(FileStorage::new(config.data_dir.clone()));

    let store = Arc::new(
        TimerStore::new(storage, notifier).with_tick_period(config.tick_period()),
    );
    store.load().await;

    for timer in store.timers() {
        info!("  {} {:<20} {:>9} {:?}",
              timer.id, timer.name, format_clock(timer.remaining_time), timer.status());
    }

    if config.resume {
        store.resume_scheduler().await;
    }

    // Log every published change
    let mut state_rx = store.subscribe();
    tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            let snapshot = state_rx.borrow_and_update().clone();
            debug!("State changed: {} timers, {} running",
                   snapshot.timers.len(), snapshot.running_count());
        }
    });

    shutdown_signal().await;
    info!("Shutdown signal received");

    store.shutdown();
    info!("Timer store shutdown complete");
    Ok(())
}
