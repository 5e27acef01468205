//! Timer utilities shared by the stage sequencer, login delay and copy feedback.

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};

/// Suspend the current task for `ms` milliseconds.
///
/// Web builds use `gloo-timers` (backed by `setTimeout`); native builds rely on
/// the tokio runtime that the Dioxus desktop launcher drives.
pub async fn sleep_ms(ms: u64) {
    if ms == 0 {
        return;
    }

    #[cfg(target_arch = "wasm32")]
    {
        let capped = ms.min(u32::MAX as u64) as u32;
        gloo_timers::future::TimeoutFuture::new(capped).await;
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

pub async fn sleep(duration: Duration) {
    sleep_ms(duration.as_millis().min(u64::MAX as u128) as u64).await;
}

/// Error returned by [`with_timeout`] when the deadline wins the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation timed out after {0:?}")]
pub struct Elapsed(pub Duration);

/// Race `fut` against a timer. Works on both targets because it only depends on
/// [`sleep`], unlike `tokio::time::timeout` which is unavailable on wasm.
pub async fn with_timeout<F, T>(limit: Duration, fut: F) -> Result<T, Elapsed>
where
    F: Future<Output = T>,
{
    let fut = std::pin::pin!(fut);
    let timer = std::pin::pin!(sleep(limit));

    match future::select(fut, timer).await {
        Either::Left((value, _)) => Ok(value),
        Either::Right(((), _)) => Err(Elapsed(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fast_future_beats_the_deadline() {
        let value = with_timeout(Duration::from_millis(200), async { 7 }).await;
        assert_eq!(value, Ok(7));
    }

    #[tokio::test]
    async fn slow_future_reports_elapsed() {
        let limit = Duration::from_millis(5);
        let outcome = with_timeout(limit, async {
            sleep_ms(500).await;
            1
        })
        .await;
        assert_eq!(outcome, Err(Elapsed(limit)));
    }
}
