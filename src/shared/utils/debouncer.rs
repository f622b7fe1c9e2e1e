use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::sleep;

/// Timer-based coalescing for bursty input events.
///
/// Sits between raw view-layer input (keystrokes feeding a search box) and
/// the orchestrator: each event calls `acquire`, and only the caller that
/// is still the newest when the window elapses gets `true`. At most one
/// request survives a burst.
pub struct Debouncer {
    window: Duration,
    seq: AtomicU64,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            seq: AtomicU64::new(0),
        }
    }

    /// Wait out the window; `true` means no newer call arrived meanwhile.
    pub async fn acquire(&self) -> bool {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.window).await;
        self.seq.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lone_caller_passes() {
        tokio_test::block_on(async {
            let debouncer = Debouncer::new(Duration::from_millis(5));
            assert!(debouncer.acquire().await);
        });
    }
}
