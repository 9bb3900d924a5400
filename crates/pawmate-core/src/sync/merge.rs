//! One-shot + live-feed merge.

use super::subscription::Subscription;
use crate::error::Result;
use std::future::Future;

/// Merges a one-shot read with a live feed into a single sequence.
///
/// The one-shot value is only emitted when it resolves before the first
/// live value - it exists to avoid showing an empty state while the feed
/// warms up. The first live value supersedes the seed (a still-pending
/// one-shot is cancelled at that point) and every later item comes from
/// the live side alone.
///
/// A failed one-shot downgrades the sequence to live-only: the error is
/// logged and skipped. Live-side errors stay terminal, as on any feed.
pub fn seed_then_live<T, F>(one_shot: F, mut live: Subscription<T>) -> Subscription<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T>> + Send + 'static,
{
    let (tx, merged) = Subscription::channel();
    tokio::spawn(async move {
        tokio::select! {
            seed = one_shot => match seed {
                Ok(value) => {
                    tx.send(value);
                }
                Err(error) => {
                    tracing::warn!(%error, "one-shot seed failed, continuing live-only");
                }
            },
            first = live.recv() => match first {
                Some(Ok(value)) => {
                    tx.send(value);
                }
                Some(Err(error)) => {
                    tx.fail(error);
                    return;
                }
                None => return,
            },
        }

        while let Some(item) = live.recv().await {
            match item {
                Ok(value) => {
                    if !tx.send(value) {
                        break;
                    }
                }
                Err(error) => {
                    tx.fail(error);
                    break;
                }
            }
        }
    });
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PawmateError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_seed_arrives_before_live() {
        let (live_tx, live) = Subscription::channel();
        let mut merged = seed_then_live(async { Ok(10u64) }, live);

        assert_eq!(merged.recv().await, Some(Ok(10)));

        live_tx.send(11);
        assert_eq!(merged.recv().await, Some(Ok(11)));
    }

    #[tokio::test]
    async fn test_first_live_value_supersedes_pending_seed() {
        let (live_tx, live) = Subscription::channel();
        // A value is already buffered on the live side, so the slow seed
        // never gets a chance to win the race.
        live_tx.send(20u64);
        let mut merged = seed_then_live(
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Ok(1)
            },
            live,
        );

        assert_eq!(merged.recv().await, Some(Ok(20)));
        live_tx.send(21);
        assert_eq!(merged.recv().await, Some(Ok(21)));
    }

    #[tokio::test]
    async fn test_failed_seed_degrades_to_live_only() {
        let (live_tx, live) = Subscription::channel();
        let mut merged = seed_then_live(
            async { Err(PawmateError::remote_unavailable("read failed")) },
            live,
        );

        live_tx.send(30u64);
        assert_eq!(merged.recv().await, Some(Ok(30)));
    }

    #[tokio::test]
    async fn test_live_error_is_terminal() {
        let (live_tx, live) = Subscription::<u64>::channel();
        let mut merged = seed_then_live(async { Ok(1) }, live);
        assert_eq!(merged.recv().await, Some(Ok(1)));

        live_tx.fail(PawmateError::remote_unavailable("listener detached"));
        drop(live_tx);
        assert!(matches!(merged.recv().await, Some(Err(e)) if e.is_remote_unavailable()));
        assert_eq!(merged.recv().await, None);
    }
}
