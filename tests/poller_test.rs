use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use callsight::application::services::{poll_until, PollError, PollPolicy};

fn fast_policy(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        max_attempts,
        interval: Duration::from_millis(1),
    }
}

fn terminal() -> Vec<String> {
    vec!["processed".to_string()]
}

fn failure() -> Vec<String> {
    vec!["failed".to_string()]
}

/// Check that pops the next scripted status and counts invocations.
fn scripted_check(
    statuses: &[&str],
    calls: &Arc<AtomicU32>,
) -> impl FnMut() -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<String, String>> + Send>>
{
    let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
    let calls = Arc::clone(calls);
    move || {
        let n = calls.fetch_add(1, Ordering::SeqCst) as usize;
        let status = statuses
            .get(n)
            .cloned()
            .unwrap_or_else(|| "processing".to_string());
        Box::pin(async move { Ok(status) })
    }
}

#[tokio::test]
async fn given_status_reaching_processed_when_polling_then_succeeds_after_exactly_that_many_checks()
{
    let calls = Arc::new(AtomicU32::new(0));
    let check = scripted_check(&["queued", "queued", "processing", "processed"], &calls);
    let cancel = CancellationToken::new();

    let result = poll_until(check, &terminal(), &failure(), &fast_policy(80), &cancel).await;

    assert_eq!(result.unwrap(), "processed");
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn given_terminal_status_on_first_check_when_polling_then_returns_after_one_check() {
    let calls = Arc::new(AtomicU32::new(0));
    let check = scripted_check(&["processed"], &calls);
    let cancel = CancellationToken::new();

    let result = poll_until(check, &terminal(), &failure(), &fast_policy(80), &cancel).await;

    assert_eq!(result.unwrap(), "processed");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_status_never_terminal_when_polling_then_times_out_after_exactly_max_attempts() {
    let calls = Arc::new(AtomicU32::new(0));
    let statuses = vec!["processing"; 80];
    let check = scripted_check(&statuses, &calls);
    let cancel = CancellationToken::new();

    let result = poll_until(check, &terminal(), &failure(), &fast_policy(80), &cancel).await;

    assert!(matches!(result, Err(PollError::TimedOut { attempts: 80 })));
    assert_eq!(calls.load(Ordering::SeqCst), 80);
}

#[tokio::test]
async fn given_failed_status_at_third_check_when_polling_then_stops_at_third_check() {
    let calls = Arc::new(AtomicU32::new(0));
    let check = scripted_check(&["queued", "processing", "failed"], &calls);
    let cancel = CancellationToken::new();

    let result = poll_until(check, &terminal(), &failure(), &fast_policy(80), &cancel).await;

    match result {
        Err(PollError::Failed { status, attempts }) => {
            assert_eq!(status, "failed");
            assert_eq!(attempts, 3);
        }
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_failure_status_on_last_attempt_when_polling_then_reports_failure_not_timeout() {
    let calls = Arc::new(AtomicU32::new(0));
    let check = scripted_check(&["processing", "processing", "failed"], &calls);
    let cancel = CancellationToken::new();

    let result = poll_until(check, &terminal(), &failure(), &fast_policy(3), &cancel).await;

    assert!(matches!(
        result,
        Err(PollError::Failed { attempts: 3, .. })
    ));
}

#[tokio::test]
async fn given_transient_check_errors_when_polling_then_retries_within_budget() {
    let calls = Arc::new(AtomicU32::new(0));
    let calls_in = Arc::clone(&calls);
    let check = move || -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<String, String>> + Send>,
    > {
        let n = calls_in.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if n < 2 {
                Err("connection reset".to_string())
            } else {
                Ok("processed".to_string())
            }
        })
    };
    let cancel = CancellationToken::new();

    let result = poll_until(check, &terminal(), &failure(), &fast_policy(80), &cancel).await;

    assert_eq!(result.unwrap(), "processed");
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn given_already_cancelled_token_when_polling_then_returns_cancelled_without_checking() {
    let calls = Arc::new(AtomicU32::new(0));
    let check = scripted_check(&["processed"], &calls);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = poll_until(check, &terminal(), &failure(), &fast_policy(80), &cancel).await;

    assert!(matches!(result, Err(PollError::Cancelled)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_cancellation_during_wait_when_polling_then_stops_promptly() {
    let calls = Arc::new(AtomicU32::new(0));
    let check = scripted_check(&["processing"; 80], &calls);
    let cancel = CancellationToken::new();
    let policy = PollPolicy {
        max_attempts: 80,
        interval: Duration::from_secs(60),
    };

    let cancel_in = cancel.clone();
    let handle = tokio::spawn(async move {
        poll_until(check, &terminal(), &failure(), &policy, &cancel_in).await
    });

    tokio::time::sleep(Duration::from_millis(20)).await;
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("poll did not observe cancellation in time")
        .expect("poll task panicked");

    assert!(matches!(result, Err(PollError::Cancelled)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
