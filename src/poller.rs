use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

/// Poll interval used by the tactical map view.
pub const MAP_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Poll interval used by the family room view.
pub const FAMILY_ROOM_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// A fixed-interval polling loop feeding one view.
///
/// Each view runs its own `Poller`; there is no shared cache, deduplication
/// of concurrent polls, or backpressure. A view converges on server state
/// within its interval plus one round trip. A failed fetch keeps the last
/// snapshot in place and the next tick proceeds as scheduled, with no
/// backoff. Dropping the poller aborts the loop, so a torn-down view leaves
/// no orphaned fetches behind.
pub struct Poller<T> {
    rx: watch::Receiver<Option<T>>,
    task: JoinHandle<()>,
}

impl<T> Poller<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn spawn<F, Fut>(interval: Duration, mut fetch: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send,
    {
        let (tx, rx) = watch::channel(None);

        let task = tokio::spawn(async move {
            // First tick fires immediately, matching the fetch-then-schedule
            // pattern of the views.
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match fetch().await {
                    Ok(snapshot) => {
                        if tx.send(Some(snapshot)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Poll failed, keeping last snapshot: {}", e);
                    }
                }
            }
        });

        Self { rx, task }
    }

    /// Last successfully fetched snapshot, or `None` before the first
    /// successful poll.
    pub fn snapshot(&self) -> Option<T> {
        self.rx.borrow().clone()
    }

    /// Waits until the next successful poll publishes a snapshot.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
