use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;

type Effect = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Trailing-edge call coalescer.
///
/// Any burst of [`schedule`](Debouncer::schedule) calls closer together than
/// `window` collapses into one run of the wrapped effect, timed from the
/// last call in the burst. Completion of the effect is not awaited by
/// `schedule`; callers that need to wait use the handle returned by
/// [`flush`](Debouncer::flush).
///
/// Must be driven from inside a Tokio runtime.
pub struct Debouncer {
    window: Duration,
    effect: Effect,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Wrap `effect` with a quiet period of `window`.
    pub fn new<F, Fut>(window: Duration, effect: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let effect: Effect = Arc::new(move || {
            let fut: BoxFuture<'static, ()> = Box::pin(effect());
            fut
        });

        Debouncer {
            window,
            effect,
            timer: Mutex::new(None),
        }
    }

    /// Restart the quiet-period timer. The effect runs once the timer
    /// elapses without another `schedule` call.
    pub fn schedule(&self) {
        let mut timer = self.timer.lock().unwrap();
        if let Some(pending) = timer.take() {
            pending.abort();
        }

        let window = self.window;
        let effect = self.effect.clone();
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // Past the quiet period the run is committed; detach it so a
            // later cancel can no longer tear down a write in progress.
            tokio::spawn(effect());
        }));
    }

    /// Cancel any pending timer and run the effect now.
    ///
    /// Runs the effect even when nothing is scheduled; callers that only
    /// want to flush dirty state must guard inside the effect. The returned
    /// handle resolves when the effect has settled.
    pub fn flush(&self) -> JoinHandle<()> {
        let mut timer = self.timer.lock().unwrap();
        if let Some(pending) = timer.take() {
            pending.abort();
        }

        tokio::spawn((self.effect)())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(pending) = timer.take() {
                pending.abort();
            }
        }
    }
}
