//! Cooperative cancellation shared between the worker and a controller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::{Cancelled, SortResult};

struct StopState {
    requested: AtomicBool,
    lock: Mutex<()>,
    wakeup: Condvar,
}

/// A cloneable stop flag that can also interrupt the worker's pacing pause.
///
/// The flag is never cleared: once [`request_stop`](Self::request_stop) has
/// been called, every subsequent [`check`](Self::check) and
/// [`sleep`](Self::sleep) returns [`Cancelled`]. Any number of threads may
/// request a stop any number of times.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sortvis_array::{Cancelled, StopHandle};
///
/// let stop = StopHandle::new();
/// let controller = stop.clone();
///
/// assert_eq!(stop.check(), Ok(()));
/// controller.request_stop();
/// assert_eq!(stop.check(), Err(Cancelled));
/// assert_eq!(stop.sleep(Duration::from_secs(60)), Err(Cancelled));
/// ```
#[derive(Clone)]
pub struct StopHandle {
    inner: Arc<StopState>,
}

impl StopHandle {
    /// Creates a handle with no stop requested.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StopState {
                requested: AtomicBool::new(false),
                lock: Mutex::new(()),
                wakeup: Condvar::new(),
            }),
        }
    }

    /// Requests a stop and wakes a worker blocked in [`sleep`](Self::sleep).
    pub fn request_stop(&self) {
        self.inner.requested.store(true, Ordering::Release);
        // Taking the lock orders this wakeup after any sleeper's flag check.
        let _guard = self.inner.lock.lock();
        self.inner.wakeup.notify_all();
    }

    /// Returns true once a stop has been requested.
    #[inline]
    pub fn is_stop_requested(&self) -> bool {
        self.inner.requested.load(Ordering::Acquire)
    }

    /// Returns [`Cancelled`] if a stop has been requested.
    #[inline]
    pub fn check(&self) -> SortResult<()> {
        if self.is_stop_requested() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Blocks for `duration` unless a stop is requested first.
    ///
    /// Returns [`Cancelled`] if a stop was requested before or during the
    /// pause.
    pub fn sleep(&self, duration: Duration) -> SortResult<()> {
        let deadline = Instant::now() + duration;
        let mut guard = self.inner.lock.lock();
        loop {
            self.check()?;
            if self
                .inner
                .wakeup
                .wait_until(&mut guard, deadline)
                .timed_out()
            {
                return self.check();
            }
        }
    }
}

impl Default for StopHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StopHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopHandle")
            .field("requested", &self.is_stop_requested())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_handle_is_not_stopped() {
        let stop = StopHandle::new();
        assert!(!stop.is_stop_requested());
        assert_eq!(stop.check(), Ok(()));
    }

    #[test]
    fn test_request_stop_is_idempotent() {
        let stop = StopHandle::new();
        stop.request_stop();
        stop.request_stop();
        stop.clone().request_stop();
        assert!(stop.is_stop_requested());
        assert_eq!(stop.check(), Err(Cancelled));
    }

    #[test]
    fn test_sleep_completes_without_stop() {
        let stop = StopHandle::new();
        let start = Instant::now();
        assert_eq!(stop.sleep(Duration::from_millis(20)), Ok(()));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_sleep_after_stop_returns_immediately() {
        let stop = StopHandle::new();
        stop.request_stop();
        let start = Instant::now();
        assert_eq!(stop.sleep(Duration::from_secs(30)), Err(Cancelled));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_stop_interrupts_sleep_from_other_thread() {
        let stop = StopHandle::new();
        let controller = stop.clone();

        let waker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            controller.request_stop();
        });

        let start = Instant::now();
        assert_eq!(stop.sleep(Duration::from_secs(30)), Err(Cancelled));
        assert!(start.elapsed() < Duration::from_secs(5));
        waker.join().unwrap();
    }

    #[test]
    fn test_handle_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StopHandle>();
    }
}
