//! One-second tick scheduler background task

use std::sync::Arc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::state::TimerStore;

/// Background task advancing every running timer once per period
///
/// A single task serves all timers. It is spawned by the store when a toggle
/// leaves a timer counting down, and returns on the first step after which
/// nothing is counting down; the next qualifying toggle spawns it again.
pub async fn tick_scheduler_task(store: Arc<TimerStore>) {
    let period = store.tick_period();
    info!("Starting tick scheduler ({}ms period)", period.as_millis());

    // First step one full period after start, not immediately
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut steps: u64 = 0;
    loop {
        interval.tick().await;
        steps += 1;

        if !store.scheduled_tick().await {
            break;
        }
        debug!("Tick scheduler step {} done, timers still running", steps);
    }

    info!("No running timers left, tick scheduler stopped after {} steps", steps);
}
