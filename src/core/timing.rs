//! Debounce, throttle and delay built on Tokio timers.
//!
//! `debounce` spawns onto the current runtime, so `Debounced::call` must run
//! inside one. `throttle` only reads the clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Wrapper returned by [`debounce`]. Clones share the same pending timer.
pub struct Debounced<A> {
    func: Callback<A>,
    wait: Duration,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            wait: self.wait,
            pending: Arc::clone(&self.pending),
        }
    }
}

impl<A: Send + 'static> Debounced<A> {
    /// Cancels any pending invocation and schedules `func(args)` after the wait period.
    pub fn call(&self, args: A) {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let func = Arc::clone(&self.func);
        let wait = self.wait;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            func(args);
        }));
    }

    /// 取消尚未執行的呼叫；有取消到時回傳 true
    pub fn cancel(&self) -> bool {
        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|pending| pending.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }
}

pub fn debounce<A, F>(func: F, wait: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced {
        func: Arc::new(func),
        wait,
        pending: Arc::new(Mutex::new(None)),
    }
}

/// Wrapper returned by [`throttle`]. Clones share the same cooldown window.
pub struct Throttled<A> {
    func: Callback<A>,
    wait: Duration,
    last_fired: Arc<Mutex<Option<Instant>>>,
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            func: Arc::clone(&self.func),
            wait: self.wait,
            last_fired: Arc::clone(&self.last_fired),
        }
    }
}

impl<A> Throttled<A> {
    /// Runs `func(args)` now unless a previous call is still cooling down.
    /// Returns whether the call went through.
    pub fn call(&self, args: A) -> bool {
        let now = Instant::now();
        {
            let mut last_fired = self
                .last_fired
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            if let Some(fired) = *last_fired {
                if now < fired + self.wait {
                    return false;
                }
            }
            *last_fired = Some(now);
        }

        (self.func)(args);
        true
    }

    pub fn is_cooling_down(&self) -> bool {
        self.last_fired
            .lock()
            .map(|last| last.is_some_and(|fired| Instant::now() < fired + self.wait))
            .unwrap_or(false)
    }
}

pub fn throttle<A, F>(func: F, wait: Duration) -> Throttled<A>
where
    F: Fn(A) + Send + Sync + 'static,
{
    Throttled {
        func: Arc::new(func),
        wait,
        last_fired: Arc::new(Mutex::new(None)),
    }
}

pub async fn delay(duration: Duration) {
    tokio::time::sleep(duration).await;
}

pub async fn delay_ms(ms: u64) {
    delay(Duration::from_millis(ms)).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recorder() -> (Arc<Mutex<Vec<i32>>>, impl Fn(i32) + Send + Sync + 'static) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        (calls, move |n| sink.lock().unwrap().push(n))
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_runs_once_after_quiet_period() {
        let (calls, func) = recorder();
        let debounced = debounce(func, Duration::from_millis(100));

        debounced.call(1);
        delay_ms(50).await;
        debounced.call(2);
        delay_ms(50).await;
        debounced.call(3);

        delay_ms(90).await;
        assert!(calls.lock().unwrap().is_empty());
        assert!(debounced.is_pending());

        delay_ms(20).await;
        tokio::task::yield_now().await;
        assert_eq!(*calls.lock().unwrap(), vec![3]);
        assert!(!debounced.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_separate_bursts_fire_separately() {
        let (calls, func) = recorder();
        let debounced = debounce(func, Duration::from_millis(30));

        debounced.call(1);
        delay_ms(40).await;
        debounced.clone().call(2);
        delay_ms(40).await;

        assert_eq!(*calls.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_cancel() {
        let (calls, func) = recorder();
        let debounced = debounce(func, Duration::from_millis(30));

        debounced.call(1);
        assert!(debounced.cancel());
        assert!(!debounced.cancel());

        delay_ms(60).await;
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_fires_immediately_then_suppresses() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let throttled = throttle(
            move |_: ()| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
            Duration::from_millis(100),
        );

        assert!(throttled.call(()));
        assert!(!throttled.call(()));
        assert!(throttled.is_cooling_down());
        assert_eq!(count.load(Ordering::SeqCst), 1);

        delay_ms(50).await;
        assert!(!throttled.call(()));

        delay_ms(60).await;
        assert!(throttled.call(()));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_waits_for_duration() {
        let start = Instant::now();
        delay(Duration::from_secs(2)).await;
        assert!(start.elapsed() >= Duration::from_secs(2));
    }
}
