//! Tracked fire-and-forget work.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Spawned tasks outlive the handler that scheduled them but are awaited on
/// shutdown through [`BackgroundTasks::drain`].
#[derive(Clone, Default)]
pub struct BackgroundTasks {
    set: Arc<Mutex<JoinSet<()>>>,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut set = self.set.lock();
        // Reap finished tasks so the set does not grow unbounded.
        while let Some(result) = set.try_join_next() {
            if let Err(e) = result {
                warn!("Background task failed: {}", e);
            }
        }
        set.spawn(task);
    }

    pub fn len(&self) -> usize {
        self.set.lock().len()
    }

    /// Wait for every pending task, including ones spawned while draining.
    pub async fn drain(&self) {
        loop {
            let mut pending = std::mem::take(&mut *self.set.lock());
            if pending.is_empty() {
                break;
            }
            debug!("Waiting for {} background task(s)", pending.len());
            while let Some(result) = pending.join_next().await {
                if let Err(e) = result {
                    warn!("Background task failed: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn drain_waits_for_delayed_work() {
        let tasks = BackgroundTasks::new();
        let done = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let done = done.clone();
            tasks.spawn(async move {
                tokio::time::sleep(Duration::from_secs(10)).await;
                done.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(tasks.len(), 3);

        tasks.drain().await;
        assert_eq!(done.load(Ordering::SeqCst), 3);
        assert_eq!(tasks.len(), 0);
    }
}
