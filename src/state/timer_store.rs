//! Timer repository: the owned collection, its persistence and mutations

use std::{
    sync::{Arc, Mutex as StdMutex},
    time::Duration,
};
use chrono::Utc;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use super::{
    timer::{CreateTimerInput, Timer, TimerUpdate},
    view::{SortBy, StoreSnapshot},
};
use crate::{
    services::NotificationSink,
    storage::{StorageBackend, STORAGE_KEY},
    tasks::tick_scheduler_task,
};

/// Default scheduler period
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Result of one tick step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Number of timers decremented
    pub advanced: usize,
    /// Ids of timers that reached zero on this step
    pub completed: Vec<String>,
    /// Whether any timer is still counting down afterwards
    pub still_ticking: bool,
}

/// Authoritative timer collection shared by the presentation layer and the
/// tick scheduler
///
/// Every mutation holds the collection lock while it computes the new value,
/// writes the full collection to storage and publishes the snapshot, so
/// mutations and ticks never interleave. Storage and notification failures
/// are logged and never returned to the caller.
pub struct TimerStore {
    timers: Mutex<Vec<Timer>>,
    storage: Arc<dyn StorageBackend>,
    notifier: Arc<dyn NotificationSink>,
    /// Published snapshot for subscribers
    state_tx: watch::Sender<StoreSnapshot>,
    /// Handle of the running tick task, `None` while idle
    scheduler: StdMutex<Option<JoinHandle<()>>>,
    tick_period: Duration,
}

impl TimerStore {
    /// Create an empty store; call [`TimerStore::load`] before relying on it
    pub fn new(storage: Arc<dyn StorageBackend>, notifier: Arc<dyn NotificationSink>) -> Self {
        let (state_tx, _) = watch::channel(StoreSnapshot::new());

        Self {
            timers: Mutex::new(Vec::new()),
            storage,
            notifier,
            state_tx,
            scheduler: StdMutex::new(None),
            tick_period: TICK_PERIOD,
        }
    }

    /// Override the scheduler period
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state_tx.subscribe()
    }

    /// Current published snapshot
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Current collection in stored order
    pub fn timers(&self) -> Vec<Timer> {
        self.state_tx.borrow().timers.clone()
    }

    pub fn get(&self, id: &str) -> Option<Timer> {
        self.state_tx.borrow().timers.iter().find(|t| t.id == id).cloned()
    }

    /// Read the stored collection; missing or unreadable data yields an empty
    /// collection
    pub async fn load(&self) {
        let mut timers = self.timers.lock().await;

        let loaded = match self.storage.get_item(STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Timer>>(&raw) {
                Ok(stored) => dedupe(stored),
                Err(e) => {
                    warn!("Stored timers are unreadable, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => {
                info!("No stored timers found");
                Vec::new()
            }
            Err(e) => {
                error!("Failed to load timers: {}", e);
                Vec::new()
            }
        };

        info!("Loaded {} timers", loaded.len());
        *timers = loaded;
        let published = timers.clone();
        self.state_tx.send_modify(|state| {
            state.timers = published;
            state.is_loading = false;
        });
    }

    /// Append a new, not-started timer and return it
    ///
    /// Name and duration are not checked here; see [`crate::validation`].
    pub async fn create(&self, input: CreateTimerInput) -> Timer {
        let mut timers = self.timers.lock().await;

        let now = now_ms();
        let id = next_id(&timers, now);
        let timer = Timer::from_input(id, input, now);
        info!("Creating timer {} ({}, {}s)", timer.id, timer.name, timer.duration);

        let created = timer.clone();
        self.commit(&mut timers, "create", move |timers| {
            timers.push(timer);
            true
        })
        .await;
        created
    }

    /// Merge `update` into the timer with `id`; no-op when absent
    ///
    /// A running timer given time back (e.g. an edited, finished timer)
    /// restarts the tick scheduler.
    pub async fn update(self: &Arc<Self>, id: &str, update: TimerUpdate) {
        let mut timers = self.timers.lock().await;
        let changed = self
            .commit(&mut timers, "update", |timers| {
                match timers.iter_mut().find(|t| t.id == id) {
                    Some(timer) => {
                        timer.apply(update);
                        true
                    }
                    None => false,
                }
            })
            .await;

        if changed && timers.iter().any(Timer::is_ticking) {
            self.ensure_scheduler();
        }
    }

    /// Delete the timer with `id`; no-op when absent
    pub async fn remove(&self, id: &str) {
        let mut timers = self.timers.lock().await;
        self.commit(&mut timers, "remove", |timers| {
            let before = timers.len();
            timers.retain(|t| t.id != id);
            timers.len() != before
        })
        .await;
    }

    /// Delete every timer whose remaining time is zero
    pub async fn clear_completed(&self) {
        let mut timers = self.timers.lock().await;
        self.commit(&mut timers, "clear-completed", |timers| {
            let before = timers.len();
            timers.retain(|t| !t.is_completed());
            timers.len() != before
        })
        .await;
    }

    /// Empty the collection
    pub async fn delete_all(&self) {
        let mut timers = self.timers.lock().await;
        self.commit(&mut timers, "delete-all", |timers| {
            let had_any = !timers.is_empty();
            timers.clear();
            had_any
        })
        .await;
    }

    /// Start or pause the timer with `id`, starting the tick scheduler when
    /// a timer now has time to count down
    pub async fn toggle(self: &Arc<Self>, id: &str) {
        let mut timers = self.timers.lock().await;
        let changed = self
            .commit(&mut timers, "toggle", |timers| {
                match timers.iter_mut().find(|t| t.id == id) {
                    Some(timer) => {
                        timer.toggle();
                        debug!("Timer {} is now {:?}", timer.id, timer.status());
                        true
                    }
                    None => false,
                }
            })
            .await;

        if changed && timers.iter().any(Timer::is_ticking) {
            self.ensure_scheduler();
        }
    }

    /// Return the timer with `id` to its full duration, not started
    pub async fn reset(&self, id: &str) {
        let mut timers = self.timers.lock().await;
        self.commit(&mut timers, "reset", |timers| {
            match timers.iter_mut().find(|t| t.id == id) {
                Some(timer) => {
                    timer.reset();
                    true
                }
                None => false,
            }
        })
        .await;
    }

    /// Change the list sort key; the stored order is untouched
    pub fn set_sort_by(&self, sort_by: SortBy) {
        self.state_tx.send_modify(|state| state.sort_by = sort_by);
    }

    /// Change the list search text; the stored collection is untouched
    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state_tx.send_modify(|state| state.search_query = query);
    }

    /// Advance every running timer by one second
    ///
    /// The scheduler calls this once per period; hosts with their own
    /// runtime loop may call it directly instead.
    pub async fn tick(&self) -> TickOutcome {
        let mut timers = self.timers.lock().await;
        self.tick_locked(&mut timers).await
    }

    /// One scheduler step. Returns false, with the scheduler slot cleared,
    /// once nothing is left counting down.
    pub(crate) async fn scheduled_tick(&self) -> bool {
        let mut timers = self.timers.lock().await;
        let outcome = self.tick_locked(&mut timers).await;

        if !outcome.still_ticking {
            // Cleared under the collection lock so a concurrent toggle sees
            // either a live task or an empty slot.
            self.clear_scheduler();
        }
        outcome.still_ticking
    }

    /// Start the scheduler for timers that were already running when loaded
    pub async fn resume_scheduler(self: &Arc<Self>) {
        let timers = self.timers.lock().await;
        if timers.iter().any(Timer::is_ticking) {
            info!("Resuming tick scheduler for loaded running timers");
            self.ensure_scheduler();
        }
    }

    pub fn is_scheduler_active(&self) -> bool {
        self.scheduler
            .lock()
            .map(|slot| slot.as_ref().is_some_and(|handle| !handle.is_finished()))
            .unwrap_or(false)
    }

    /// Cancel the scheduler at process exit
    pub fn shutdown(&self) {
        match self.scheduler.lock() {
            Ok(mut slot) => {
                if let Some(handle) = slot.take() {
                    handle.abort();
                    info!("Tick scheduler cancelled");
                }
            }
            Err(e) => error!("Failed to lock scheduler slot: {}", e),
        }
    }

    async fn tick_locked(&self, timers: &mut Vec<Timer>) -> TickOutcome {
        let now = now_ms();
        let mut outcome = TickOutcome::default();
        let mut finished = Vec::new();

        for timer in timers.iter_mut().filter(|t| t.is_ticking()) {
            outcome.advanced += 1;
            if timer.tick(now) {
                finished.push(timer.clone());
            }
        }

        if outcome.advanced > 0 {
            debug!("Tick advanced {} timers", outcome.advanced);
            self.persist("tick", timers).await;
            self.publish(timers);
        }

        for timer in &finished {
            self.notify(timer);
        }

        outcome.completed = finished.into_iter().map(|t| t.id).collect();
        outcome.still_ticking = timers.iter().any(Timer::is_ticking);
        outcome
    }

    /// Apply `mutate`; when it reports a change, persist then publish
    async fn commit<F>(&self, timers: &mut Vec<Timer>, action: &str, mutate: F) -> bool
    where
        F: FnOnce(&mut Vec<Timer>) -> bool,
    {
        if !mutate(timers) {
            debug!("{}: no matching timer, nothing changed", action);
            return false;
        }

        self.persist(action, timers).await;
        self.publish(timers);
        true
    }

    async fn persist(&self, action: &str, timers: &[Timer]) {
        let payload = match serde_json::to_string(timers) {
            Ok(payload) => payload,
            Err(e) => {
                error!("Failed to serialize timers after {}: {}", action, e);
                return;
            }
        };

        if let Err(e) = self.storage.set_item(STORAGE_KEY, payload).await {
            error!("Failed to persist timers after {}: {}", action, e);
        }
    }

    fn publish(&self, timers: &[Timer]) {
        let published = timers.to_vec();
        self.state_tx.send_modify(|state| state.timers = published);
    }

    /// Fire-and-forget completion notification
    fn notify(&self, timer: &Timer) {
        info!("Timer {} ({}) completed", timer.id, timer.name);

        let pending = self.notifier.notify_completion(timer);
        let id = timer.id.clone();
        tokio::spawn(async move {
            if let Err(e) = pending.await {
                warn!("Completion notification for timer {} failed: {}", id, e);
            }
        });
    }

    fn ensure_scheduler(self: &Arc<Self>) {
        let mut slot = match self.scheduler.lock() {
            Ok(slot) => slot,
            Err(e) => {
                error!("Failed to lock scheduler slot: {}", e);
                return;
            }
        };

        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return;
        }

        *slot = Some(tokio::spawn(tick_scheduler_task(Arc::clone(self))));
    }

    fn clear_scheduler(&self) {
        if let Ok(mut slot) = self.scheduler.lock() {
            *slot = None;
        }
    }
}

impl Drop for TimerStore {
    fn drop(&mut self) {
        if let Ok(slot) = self.scheduler.get_mut() {
            if let Some(handle) = slot.take() {
                handle.abort();
            }
        }
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Creation timestamp as id, bumped past any id already taken
fn next_id(timers: &[Timer], now_ms: i64) -> String {
    let mut candidate = now_ms;
    loop {
        let id = candidate.to_string();
        if !timers.iter().any(|t| t.id == id) {
            return id;
        }
        candidate += 1;
    }
}

/// Drop repeated ids, keeping the first occurrence
fn dedupe(timers: Vec<Timer>) -> Vec<Timer> {
    let mut seen = std::collections::HashSet::new();
    let before = timers.len();
    let unique: Vec<Timer> = timers
        .into_iter()
        .filter(|t| seen.insert(t.id.clone()))
        .collect();

    if unique.len() != before {
        warn!("Dropped {} stored timers with duplicate ids", before - unique.len());
    }
    unique
}
