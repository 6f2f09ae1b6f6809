//! Debounced scheduling for search input
//!
//! A [`Debouncer`] holds at most one pending task. Scheduling a new one
//! replaces (cancels) the previous, so a burst of keystrokes collapses into
//! a single recomputation carrying the last value. Time comes from an
//! injected [`Clock`], so tests drive it with a [`ManualClock`] instead of
//! waiting on the wall clock.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Monotonic time source
pub trait Clock {
    /// Time elapsed since the clock's origin
    fn now(&self) -> Duration;
}

/// Wall-clock time since creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Identifies one scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TaskHandle,
    deadline: Duration,
    value: T,
}

/// Single-slot scheduler: schedule, cancel by handle, poll when due
#[derive(Debug)]
pub struct Debouncer<T, C: Clock> {
    clock: C,
    delay: Duration,
    pending: Option<Pending<T>>,
    next_id: u64,
}

impl<T, C: Clock> Debouncer<T, C> {
    pub fn new(clock: C, delay: Duration) -> Self {
        Self {
            clock,
            delay,
            pending: None,
            next_id: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value` to fire after the quiet period, cancelling the
    /// currently pending task if there is one
    pub fn schedule(&mut self, value: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;

        if let Some(previous) = self.pending.take() {
            tracing::trace!("Debounce task {:?} superseded by {:?}", previous.handle, handle);
        }

        self.pending = Some(Pending {
            handle,
            deadline: self.clock.now() + self.delay,
            value,
        });
        handle
    }

    /// Cancel the task if it is still the pending one
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        match &self.pending {
            Some(p) if p.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drop whatever is pending, returning its value
    pub fn cancel_pending(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending value once its quiet period has elapsed
    pub fn poll(&mut self) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| self.clock.now() >= p.deadline);

        if due {
            self.pending.take().map(|p| p.value)
        } else {
            None
        }
    }
}

/// Debounce a stream of values on the tokio timer
///
/// Each received value restarts the quiet period; `fire` runs once per
/// quiet period with the latest value. A value still pending when the
/// channel closes is fired rather than dropped.
pub async fn run_debounced<T, F>(mut rx: mpsc::Receiver<T>, delay: Duration, mut fire: F)
where
    F: FnMut(T),
{
    let mut pending: Option<T> = None;

    loop {
        match pending.take() {
            None => match rx.recv().await {
                Some(value) => pending = Some(value),
                None => break,
            },
            Some(value) => {
                tokio::select! {
                    next = rx.recv() => match next {
                        Some(next) => pending = Some(next),
                        None => {
                            fire(value);
                            break;
                        }
                    },
                    _ = tokio::time::sleep(delay) => fire(value),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const DELAY: Duration = Duration::from_millis(200);

    #[test]
    fn test_fires_after_quiet_period() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(clock.clone(), DELAY);

        debouncer.schedule("a");
        clock.advance(Duration::from_millis(199));
        assert_eq!(debouncer.poll(), None);

        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.poll(), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(), None);
    }

    #[test]
    fn test_burst_collapses_to_last_value() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(clock.clone(), DELAY);
        let mut fired = Vec::new();

        for i in 0..10 {
            debouncer.schedule(i);
            clock.advance(Duration::from_millis(15));
            fired.extend(debouncer.poll());
        }
        assert!(fired.is_empty());

        clock.advance(DELAY);
        fired.extend(debouncer.poll());
        assert_eq!(fired, vec![9]);
    }

    #[test]
    fn test_cancel_only_current_handle() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::new(clock.clone(), DELAY);

        let first = debouncer.schedule("first");
        let second = debouncer.schedule("second");
        assert!(!debouncer.cancel(first));
        assert!(debouncer.is_pending());

        assert!(debouncer.cancel(second));
        clock.advance(DELAY);
        assert_eq!(debouncer.poll(), None);
    }

    #[test]
    fn test_cancel_pending_returns_value() {
        let mut debouncer = Debouncer::new(ManualClock::new(), DELAY);
        debouncer.schedule(7);
        assert_eq!(debouncer.cancel_pending(), Some(7));
        assert_eq!(debouncer.cancel_pending(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_debounced_ten_keystrokes() {
        let (tx, rx) = mpsc::channel(16);
        let fired = Arc::new(Mutex::new(Vec::new()));
        let sink = fired.clone();

        let task = tokio::spawn(run_debounced(rx, DELAY, move |q: String| {
            sink.lock().unwrap().push(q);
        }));

        for i in 0..10 {
            tx.send(format!("q{}", i)).await.unwrap();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(*fired.lock().unwrap(), vec!["q9".to_string()]);

        tx.send("again".to_string()).await.unwrap();
        drop(tx);
        task.await.unwrap();
        assert_eq!(
            *fired.lock().unwrap(),
            vec!["q9".to_string(), "again".to_string()]
        );
    }
}
