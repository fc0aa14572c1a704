//! Round orchestration.
//!
//! `RoundEngine` owns the word queue, score and countdown behind one lock and
//! publishes a fresh `RoundState` after every mutation. The countdown is
//! driven by a `Scheduler`; its `TickHandle` lives inside the locked core so
//! that expiry, forced finish, `stop` and drop all cancel it.
//!
//! ## Threading
//!
//! Every operation takes `&self` and serializes on the core lock, so a tick
//! and an intent never interleave. Tick callbacks hold a `Weak` reference to
//! the core plus the round generation they were scheduled for; ticks for a
//! torn-down engine or an earlier round are dropped.
//!
//! ## Lifecycle misuse
//!
//! Intents before `start`, after `stop`, or after the finished event without
//! `acknowledge_finish` are ignored with a warning. Nothing is published.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};

use super::broadcast::StateBroadcaster;
use super::hint::Hint;
use super::queue::WordQueue;
use super::score::ScoreCounter;
use super::state::{RoundFinished, RoundState};
use crate::core::{RoundConfig, RoundRng, Word};
use crate::error::ConfigError;
use crate::timer::scheduler::lock;
use crate::timer::{Countdown, Scheduler, TickHandle, TickOutcome, TimerState};

/// Where the engine is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Constructed, `start` not yet called.
    Idle,
    /// Accepting intents.
    Active,
    /// Finished event fired; waiting for `acknowledge_finish`.
    Finished,
    /// Torn down by `stop`. Only `start` revives it.
    Stopped,
}

#[derive(Clone, Copy, Debug)]
enum Intent {
    Correct,
    Skip,
}

struct RoundCore {
    queue: WordQueue,
    hint_rng: RoundRng,
    score: ScoreCounter,
    countdown: Countdown,
    broadcaster: StateBroadcaster,
    word: Option<Word>,
    hint: Option<Hint>,
    phase: RoundPhase,
    generation: u64,
    ticks: Option<TickHandle>,
}

impl RoundCore {
    fn snapshot(&self) -> RoundState {
        RoundState {
            word: self.word.clone(),
            hint: self.hint.clone(),
            score: self.score.value(),
            remaining: self.countdown.remaining(),
            finished: self.phase == RoundPhase::Finished,
        }
    }

    fn publish(&self) {
        self.broadcaster.publish_state(self.snapshot());
    }

    fn cancel_ticks(&mut self) {
        if let Some(mut ticks) = self.ticks.take() {
            ticks.cancel();
        }
    }

    fn advance_word(&mut self) {
        let word = self.queue.next();
        self.hint = Hint::derive(&word, &mut self.hint_rng);
        self.word = Some(word);
    }

    /// Reset for a new round and return its generation.
    fn begin(&mut self) -> u64 {
        self.cancel_ticks();
        self.generation += 1;
        self.score.reset();
        self.countdown.start();
        self.phase = RoundPhase::Active;
        self.advance_word();
        self.publish();
        self.generation
    }

    fn install_ticks(&mut self, generation: u64, ticks: TickHandle) {
        if generation == self.generation && self.countdown.is_running() {
            self.ticks = Some(ticks);
        }
        // Otherwise the round ended while scheduling; dropping cancels.
    }

    fn apply(&mut self, intent: Intent) {
        if self.phase != RoundPhase::Active {
            tracing::warn!(?intent, phase = ?self.phase, "intent ignored outside an active round");
            return;
        }

        match intent {
            Intent::Correct => self.score.correct(),
            Intent::Skip => self.score.skip(),
        }
        self.advance_word();
        tracing::debug!(?intent, score = self.score.value(), "intent applied");
        self.publish();
    }

    fn on_tick(&mut self, generation: u64) {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "stale tick dropped");
            return;
        }

        match self.countdown.tick() {
            TickOutcome::Ticked { remaining } => {
                tracing::debug!(remaining, "tick");
                self.publish();
            }
            TickOutcome::Expired => {
                tracing::debug!("countdown expired");
                self.publish();
                self.finish();
            }
            TickOutcome::Ignored => {}
        }
    }

    fn finish(&mut self) -> bool {
        if self.phase != RoundPhase::Active {
            return false;
        }

        self.phase = RoundPhase::Finished;
        self.countdown.stop();
        self.cancel_ticks();
        self.publish();

        let event = RoundFinished {
            final_score: self.score.value(),
            correct: self.score.correct_count(),
            skipped: self.score.skipped_count(),
        };
        tracing::info!(
            final_score = event.final_score,
            correct = event.correct,
            skipped = event.skipped,
            "round finished"
        );
        self.broadcaster.publish_finished(event);
        true
    }

    fn acknowledge_finish(&mut self) {
        if self.phase != RoundPhase::Finished {
            return;
        }
        self.phase = RoundPhase::Active;
        self.publish();
    }

    fn stop(&mut self) {
        self.cancel_ticks();
        self.countdown.stop();
        if self.phase != RoundPhase::Stopped {
            tracing::debug!(phase = ?self.phase, "round stopped");
            self.phase = RoundPhase::Stopped;
        }
    }
}

/// One round of the word-guessing game.
///
/// ```
/// use guess_the_word::core::RoundConfig;
/// use guess_the_word::round::RoundEngine;
/// use guess_the_word::timer::ManualScheduler;
///
/// let clock = ManualScheduler::new();
/// let engine = RoundEngine::new(RoundConfig::default().with_seed(1), clock.clone()).unwrap();
/// let mut finished = engine.subscribe_finished();
///
/// engine.start();
/// engine.on_correct();
/// engine.on_correct();
/// engine.on_skip();
///
/// clock.advance(60);
/// assert_eq!(finished.try_recv().unwrap().final_score, 1);
/// ```
pub struct RoundEngine<S: Scheduler> {
    core: Arc<Mutex<RoundCore>>,
    scheduler: S,
    interval: Duration,
    seed: u64,
}

impl<S: Scheduler> RoundEngine<S> {
    /// Build an idle engine. Nothing is published until `start`.
    pub fn new(config: RoundConfig, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = config.seed.map_or_else(RoundRng::from_entropy, RoundRng::new);
        let seed = rng.seed();
        let interval = config.tick_interval();
        let initial = RoundState {
            word: None,
            hint: None,
            score: 0,
            remaining: config.duration,
            finished: false,
        };

        let core = RoundCore {
            queue: WordQueue::new(config.vocabulary, rng.for_context("queue")),
            hint_rng: rng.for_context("hint"),
            score: ScoreCounter::new(),
            countdown: Countdown::new(config.duration, config.granularity),
            broadcaster: StateBroadcaster::new(initial),
            word: None,
            hint: None,
            phase: RoundPhase::Idle,
            generation: 0,
            ticks: None,
        };

        Ok(Self {
            core: Arc::new(Mutex::new(core)),
            scheduler,
            interval,
            seed,
        })
    }

    /// Begin a round: score 0, first word, full countdown.
    ///
    /// Calling this on a running, finished or stopped engine starts a fresh
    /// round; ticks still in flight for the previous one are dropped.
    pub fn start(&self) {
        let generation = lock(&self.core).begin();
        tracing::info!(seed = self.seed, generation, "round started");

        let weak: Weak<Mutex<RoundCore>> = Arc::downgrade(&self.core);
        let ticks = self.scheduler.schedule_repeating(
            self.interval,
            Box::new(move || {
                if let Some(core) = weak.upgrade() {
                    lock(&core).on_tick(generation);
                }
            }),
        );

        lock(&self.core).install_ticks(generation, ticks);
    }

    /// The word was guessed: +1 and a new word.
    pub fn on_correct(&self) {
        lock(&self.core).apply(Intent::Correct);
    }

    /// The word was skipped: -1 and a new word.
    pub fn on_skip(&self) {
        lock(&self.core).apply(Intent::Skip);
    }

    /// End the round now instead of waiting for the countdown.
    ///
    /// Returns `false` if the round was not active.
    pub fn finish(&self) -> bool {
        lock(&self.core).finish()
    }

    /// Clear the finished flag after the host has consumed the result.
    pub fn acknowledge_finish(&self) {
        lock(&self.core).acknowledge_finish();
    }

    /// Tear down: cancel the countdown without firing the finished event.
    ///
    /// Idempotent. Also runs on drop.
    pub fn stop(&self) {
        lock(&self.core).stop();
    }

    /// Subscribe to state snapshots.
    ///
    /// The receiver holds only the newest snapshot; `borrow()` returns it at
    /// once and `has_changed()` reports later publishes. Do not hold a
    /// `borrow()` guard across engine calls.
    pub fn subscribe(&self) -> watch::Receiver<RoundState> {
        lock(&self.core).broadcaster.subscribe_state()
    }

    /// Subscribe to the once-per-round finished event.
    pub fn subscribe_finished(&self) -> broadcast::Receiver<RoundFinished> {
        lock(&self.core).broadcaster.subscribe_finished()
    }

    /// Current state, without waiting for a publish.
    #[must_use]
    pub fn snapshot(&self) -> RoundState {
        lock(&self.core).snapshot()
    }

    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        lock(&self.core).phase
    }

    #[must_use]
    pub fn timer_state(&self) -> TimerState {
        lock(&self.core).countdown.state()
    }

    /// Whether a tick handle is currently held.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        lock(&self.core).ticks.is_some()
    }

    /// Number of vocabulary shuffles so far, including the initial fill.
    #[must_use]
    pub fn refills(&self) -> u32 {
        lock(&self.core).queue.refills()
    }

    /// Seed used for this engine's shuffles and hints.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<S: Scheduler> Drop for RoundEngine<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<S: Scheduler> std::fmt::Debug for RoundEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEngine")
            .field("seed", &self.seed)
            .field("interval", &self.interval)
            .field("state", &self.snapshot())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Vocabulary;
    use crate::timer::ManualScheduler;

    fn engine(duration: u32) -> (RoundEngine<ManualScheduler>, ManualScheduler) {
        let clock = ManualScheduler::new();
        let config = RoundConfig::default().with_duration(duration).with_seed(42);
        (RoundEngine::new(config, clock.clone()).unwrap(), clock)
    }

    #[test]
    fn test_idle_snapshot() {
        let (engine, clock) = engine(60);
        let state = engine.snapshot();

        assert_eq!(state.word, None);
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining, 60);
        assert!(!state.finished);
        assert_eq!(engine.phase(), RoundPhase::Idle);
        assert_eq!(clock.active_count(), 0);
    }

    #[test]
    fn test_start_publishes_initial_state() {
        let (engine, clock) = engine(60);
        let mut rx = engine.subscribe();
        engine.start();

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        let word = state.word.clone().unwrap();
        assert!(Vocabulary::standard().contains(&word));
        assert_eq!(state.hint.unwrap().length, word.letter_count());
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining, 60);
        assert_eq!(clock.intervals(), vec![Duration::from_secs(1)]);
        assert!(engine.is_ticking());
    }

    #[test]
    fn test_intents_before_start_are_ignored() {
        let (engine, _clock) = engine(60);
        let rx = engine.subscribe();

        engine.on_correct();
        engine.on_skip();

        assert!(!rx.has_changed().unwrap());
        assert_eq!(engine.snapshot().score, 0);
    }

    #[test]
    fn test_hint_not_recomputed_on_tick() {
        let (engine, clock) = engine(60);
        engine.start();
        let before = engine.snapshot().hint;

        clock.advance(10);

        assert_eq!(engine.snapshot().hint, before);
        assert_eq!(engine.snapshot().remaining, 50);
    }

    #[test]
    fn test_expiry_cancels_ticks() {
        let (engine, clock) = engine(3);
        engine.start();

        clock.advance(3);

        assert_eq!(engine.phase(), RoundPhase::Finished);
        assert_eq!(engine.timer_state(), TimerState::Expired);
        assert!(!engine.is_ticking());
        assert_eq!(clock.active_count(), 0);
    }

    #[test]
    fn test_forced_finish() {
        let (engine, clock) = engine(60);
        let mut finished = engine.subscribe_finished();
        engine.start();
        engine.on_correct();

        assert!(engine.finish());
        assert!(!engine.finish());

        let event = finished.try_recv().unwrap();
        assert_eq!(event.final_score, 1);
        assert_eq!(event.correct, 1);
        assert!(finished.try_recv().is_err());
        assert_eq!(clock.active_count(), 0);
    }

    #[test]
    fn test_drop_cancels_ticks() {
        let (engine, clock) = engine(60);
        engine.start();
        assert_eq!(clock.active_count(), 1);

        drop(engine);
        assert_eq!(clock.active_count(), 0);
        clock.advance(5);
    }

    #[test]
    fn test_restart_drops_old_ticks() {
        let (engine, clock) = engine(10);
        engine.start();
        clock.advance(4);
        engine.on_skip();

        engine.start();
        let state = engine.snapshot();
        assert_eq!(state.score, 0);
        assert_eq!(state.remaining, 10);
        assert_eq!(clock.active_count(), 1);

        clock.advance(1);
        assert_eq!(engine.snapshot().remaining, 9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RoundConfig::default().with_duration(0);
        let err = RoundEngine::new(config, ManualScheduler::new()).unwrap_err();
        assert_eq!(err, ConfigError::ZeroDuration);
    }

    #[test]
    fn test_random_seed_when_unset() {
        let engine = RoundEngine::new(RoundConfig::default(), ManualScheduler::new()).unwrap();
        let again = RoundEngine::new(RoundConfig::default().with_seed(engine.seed()), ManualScheduler::new()).unwrap();
        engine.start();
        again.start();
        assert_eq!(engine.snapshot(), again.snapshot());
    }
}
