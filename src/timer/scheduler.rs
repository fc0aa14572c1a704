//! Scheduled-callback abstraction that drives the countdown.
//!
//! A `Scheduler` registers a repeating action and hands back a `TickHandle`.
//! The handle is the only way to stop the action, and dropping it stops the
//! action too, so every exit path of the owner cancels the ticks.
//!
//! ## Implementations
//!
//! - `ManualScheduler`: ticks only when told to. Deterministic; used by tests
//!   and by hosts with their own frame loop.
//! - `TokioScheduler`: a spawned task driven by `tokio::time::interval`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::error::SchedulerError;

/// Repeating action run on every tick.
pub type TickAction = Box<dyn FnMut() + Send + 'static>;

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Something that can run an action at a fixed interval.
pub trait Scheduler {
    /// Run `action` every `interval`, starting one interval from now.
    ///
    /// The action stops firing as soon as the returned handle is cancelled or
    /// dropped.
    fn schedule_repeating(&self, interval: Duration, action: TickAction) -> TickHandle;
}

/// Cancellation handle for a scheduled action.
pub struct TickHandle {
    cancel: Option<Box<dyn FnOnce() + Send + 'static>>,
}

impl TickHandle {
    /// Wrap the scheduler-specific cancellation routine.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the scheduled action.
    ///
    /// Returns `true` if this call cancelled it; later calls are no-ops and
    /// return `false`.
    pub fn cancel(&mut self) -> bool {
        match self.cancel.take() {
            Some(cancel) => {
                cancel();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TickHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

#[derive(Clone)]
struct ScheduledAction {
    interval: Duration,
    action: Arc<Mutex<TickAction>>,
    cancelled: Arc<AtomicBool>,
}

impl ScheduledAction {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Scheduler that only ticks when `advance` is called.
///
/// Clones share the same set of scheduled actions, so a test can keep one
/// clone and give another to the engine.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    scheduled: Arc<Mutex<Vec<ScheduledAction>>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every live action once per tick, `ticks` times.
    ///
    /// No scheduler lock is held while an action runs, so an action may
    /// cancel itself or others. A cancelled action never fires again, even
    /// later within the same tick.
    pub fn advance(&self, ticks: u32) {
        for _ in 0..ticks {
            let live: Vec<ScheduledAction> = {
                let mut scheduled = lock(&self.scheduled);
                scheduled.retain(|entry| !entry.is_cancelled());
                scheduled.clone()
            };

            for entry in live {
                if entry.is_cancelled() {
                    continue;
                }
                let mut action = lock(&entry.action);
                (*action)();
            }
        }
    }

    /// Number of actions that have not been cancelled.
    #[must_use]
    pub fn active_count(&self) -> usize {
        lock(&self.scheduled)
            .iter()
            .filter(|entry| !entry.is_cancelled())
            .count()
    }

    /// Intervals of the live actions, in scheduling order.
    #[must_use]
    pub fn intervals(&self) -> Vec<Duration> {
        lock(&self.scheduled)
            .iter()
            .filter(|entry| !entry.is_cancelled())
            .map(|entry| entry.interval)
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_repeating(&self, interval: Duration, action: TickAction) -> TickHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        lock(&self.scheduled).push(ScheduledAction {
            interval,
            action: Arc::new(Mutex::new(action)),
            cancelled: Arc::clone(&cancelled),
        });

        TickHandle::new(move || cancelled.store(true, Ordering::Release))
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("active", &self.active_count())
            .finish()
    }
}

/// Scheduler backed by a tokio runtime.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    /// Spawn tick tasks onto the given runtime.
    #[must_use]
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running inside.
    pub fn current() -> Result<Self, SchedulerError> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|err| SchedulerError::NoRuntime(err.to_string()))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, interval: Duration, mut action: TickAction) -> TickHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let task = self.handle.spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);
            loop {
                ticker.tick().await;
                if flag.load(Ordering::Acquire) {
                    break;
                }
                action();
            }
        });

        TickHandle::new(move || {
            cancelled.store(true, Ordering::Release);
            task.abort();
        })
    }
}
