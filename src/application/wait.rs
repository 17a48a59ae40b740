use crate::domain::error::DomainError;
use crate::domain::values::poll_policy::PollPolicy;
use std::future::Future;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Calls `check` until it returns `true`, sleeping with backoff in between.
///
/// The condition is always checked at least once. Fails with
/// [`DomainError::Timeout`] once `policy.timeout` has elapsed; errors from
/// `check` are returned immediately.
pub async fn poll_until<F, Fut>(what: &str, policy: &PollPolicy, mut check: F) -> Result<(), DomainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, DomainError>>,
{
    let started = Instant::now();
    let mut interval = policy.initial_interval;
    let mut attempt = 1u32;

    loop {
        if check().await? {
            debug!(what, attempt, "condition met");
            return Ok(());
        }

        let waited = started.elapsed();
        if waited >= policy.timeout {
            return Err(DomainError::Timeout {
                what: what.to_string(),
                waited,
            });
        }

        let nap = interval.min(policy.timeout - waited);
        debug!(what, attempt, ?nap, "not yet, backing off");
        sleep(nap).await;
        interval = policy.next_interval(interval);
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn returns_once_condition_holds() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let policy = PollPolicy::index_ready(Duration::from_secs(30));
        poll_until("ready", &policy, move || async move {
            Ok(calls.fetch_add(1, Ordering::SeqCst) >= 3)
        })
        .await
        .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_instead_of_hanging() {
        let policy = PollPolicy::settle(Duration::from_secs(5));
        let started = Instant::now();
        let err = poll_until("vectors", &policy, || async { Ok(false) })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Timeout { ref what, .. } if what == "vectors"));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn check_errors_propagate() {
        let policy = PollPolicy::settle(Duration::from_secs(5));
        let err = poll_until("vectors", &policy, || async {
            Err(DomainError::VectorIndex("boom".into()))
        })
        .await
        .unwrap_err();
        assert!(matches!(err, DomainError::VectorIndex(_)));
    }
}
