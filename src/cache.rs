//! Time-boxed caching for the controller's list endpoints.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::time;

/// Timing policy for a [`ListCache`].
///
/// Luxor controllers are slow, single-connection devices; a hub polling
/// several accessories would otherwise hammer the same list endpoint many
/// times per second. The defaults allow at most one fetch per 5 second
/// window, and hold racing first callers for 1 second before answering with
/// whatever arrived in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// How long a fetched result stays fresh (and further fetches are skipped).
    pub window: Duration,
    /// How long a caller racing the very first fetch waits before answering
    /// best-effort from the cache.
    pub first_call_delay: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        CachePolicy {
            window: Duration::from_secs(5),
            first_call_delay: Duration::from_secs(1),
        }
    }
}

#[derive(Debug)]
struct CacheState<T> {
    value: Option<T>,
    window_opened: Option<Instant>,
}

/// An at-most-one-fetch-per-window cache around a single list endpoint.
///
/// Owned by its [`Controller`](crate::Controller) instance, so two controllers
/// never share cached state. Staleness up to the window length is accepted;
/// this protects the device, it is not a correctness-critical cache.
#[derive(Debug)]
pub(crate) struct ListCache<T> {
    policy: CachePolicy,
    state: Mutex<CacheState<T>>,
}

impl<T: Clone + Default> ListCache<T> {
    pub fn new(policy: CachePolicy) -> Self {
        ListCache {
            policy,
            state: Mutex::new(CacheState {
                value: None,
                window_opened: None,
            }),
        }
    }

    /// Return the cached value, or run `fetch` if the window has expired.
    ///
    /// The window is armed before the fetch runs and stays armed even if the
    /// fetch fails, so a failing device is polled at most once per window.
    /// Callers racing the first fetch of a window get a best-effort answer
    /// after [`CachePolicy::first_call_delay`], possibly the default value.
    pub async fn get_or_fetch<F, Fut, E>(&self, fetch: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        {
            let mut state = self.state.lock().await;
            let fresh = state
                .window_opened
                .is_some_and(|opened| opened.elapsed() < self.policy.window);
            if fresh {
                if let Some(value) = &state.value {
                    return Ok(value.clone());
                }
                // First-call race: a fetch is in flight but nothing has
                // arrived yet. Wait briefly and answer with whatever is
                // cached by then.
                drop(state);
                time::sleep(self.policy.first_call_delay).await;
                let state = self.state.lock().await;
                return Ok(state.value.clone().unwrap_or_default());
            }
            state.window_opened = Some(Instant::now());
        }

        let value = fetch().await?;
        self.state.lock().await.value = Some(value.clone());
        Ok(value)
    }
}
