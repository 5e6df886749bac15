//! Suppressing duplicate triggers on the same message.

use crate::MessageId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default cooldown between accepted triggers on one message.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(5000);

/// Source of monotonic time for the debouncer.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
///
/// # Examples
///
/// ```
/// use rollcall_core::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_secs(3));
/// assert_eq!(clock.now() - start, Duration::from_secs(3));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Start at the current real instant.
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Accepts a trigger on a message at most once per cooldown window.
///
/// The registry grows for the life of the process; entries are never evicted.
#[derive(Debug)]
pub struct TriggerDebouncer<C = SystemClock> {
    cooldown: Duration,
    clock: C,
    last_accepted: Mutex<HashMap<MessageId, Instant>>,
}

impl TriggerDebouncer<SystemClock> {
    /// Debouncer on the system clock.
    pub fn new(cooldown: Duration) -> Self {
        Self::with_clock(cooldown, SystemClock)
    }
}

impl<C: Clock> TriggerDebouncer<C> {
    /// Debouncer on an arbitrary clock.
    pub fn with_clock(cooldown: Duration, clock: C) -> Self {
        Self {
            cooldown,
            clock,
            last_accepted: Mutex::new(HashMap::new()),
        }
    }

    /// Configured cooldown.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Returns true and records the time if `message` has not been accepted
    /// within the cooldown window; returns false and changes nothing otherwise.
    ///
    /// The check and the record happen under one lock acquisition.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_core::{ManualClock, MessageId, TriggerDebouncer};
    /// use std::time::Duration;
    ///
    /// let clock = ManualClock::new();
    /// let debouncer = TriggerDebouncer::with_clock(Duration::from_secs(5), clock.clone());
    /// assert!(debouncer.should_process(MessageId(1)));
    /// assert!(!debouncer.should_process(MessageId(1)));
    /// clock.advance(Duration::from_secs(5));
    /// assert!(debouncer.should_process(MessageId(1)));
    /// ```
    pub fn should_process(&self, message: MessageId) -> bool {
        let now = self.clock.now();
        let mut last_accepted = self.last_accepted.lock();
        if let Some(last) = last_accepted.get(&message)
            && now.saturating_duration_since(*last) < self.cooldown
        {
            return false;
        }
        last_accepted.insert(message, now);
        true
    }

    /// Number of messages ever accepted.
    pub fn tracked(&self) -> usize {
        self.last_accepted.lock().len()
    }
}
