// Retry, backoff, and soft-404 fallback behavior. Time-sensitive tests run
// on a paused clock so the asserted delays are exact.

use sitebay_mcp::ApiError;
use sitebay_mcp::middleware::{RetryPolicy, ToolGuard};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::Instant;

fn transient_503(attempt: u32) -> ApiError {
    ApiError::api(format!("API Error: 503 - attempt {attempt}"), Some(503), None)
}

#[tokio::test(start_paused = true)]
async fn transient_failures_retry_with_doubling_delays() {
    let guard = ToolGuard::new(RetryPolicy::default());
    let calls = AtomicU32::new(0);
    let started = Instant::now();

    let result = guard
        .run("sitebay_list_sites", None, || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(transient_503(attempt))
                } else {
                    Ok(42u32)
                }
            }
        })
        .await;

    assert_eq!(result.expect("succeeds after retries"), 42);
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    // 0.5 s + 1.0 s + 2.0 s of backoff.
    assert_eq!(started.elapsed(), Duration::from_millis(3500));
}

#[tokio::test(start_paused = true)]
async fn exhausted_retries_propagate_the_last_error() {
    let guard = ToolGuard::new(RetryPolicy::default());
    let calls = AtomicU32::new(0);

    let result = guard
        .run("sitebay_list_teams", None, || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move { Err::<u32, _>(transient_503(attempt)) }
        })
        .await;

    let error = result.unwrap_err();
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert!(error.to_string().starts_with("Upstream API error for sitebay_list_teams: "));
    assert_eq!(error.api_error().status(), Some(503));
}

#[tokio::test]
async fn non_retryable_errors_fail_immediately() {
    let guard = ToolGuard::new(RetryPolicy::default());
    let calls = AtomicU32::new(0);

    let result = guard
        .run("sitebay_get_site", None, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<u32, _>(ApiError::api("API Error: 400 - bad request", Some(400), None)) }
        })
        .await;

    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn registered_fallback_swallows_terminal_404s() {
    let guard = ToolGuard::new(RetryPolicy::default());

    let result: Result<Vec<u32>, _> = guard
        .run("sitebay_list_restores", Some(Vec::new), || async {
            Err(ApiError::not_found("Requested resource not found"))
        })
        .await;

    assert_eq!(result.expect("fallback substituted"), Vec::<u32>::new());
}

#[tokio::test]
async fn unregistered_404_propagates_with_a_normalized_message() {
    let guard = ToolGuard::new(RetryPolicy::default());

    let result: Result<u32, _> = guard
        .run("sitebay_get_site", None, || async {
            Err(ApiError::not_found("Requested resource not found"))
        })
        .await;

    let error = result.unwrap_err();
    assert!(error.api_error().is_not_found());
    assert_eq!(
        error.to_string(),
        "Upstream API error for sitebay_get_site: Requested resource not found"
    );
}

#[tokio::test]
async fn fallback_does_not_mask_non_404_failures() {
    let guard = ToolGuard::new(RetryPolicy::default());

    let result: Result<Vec<u32>, _> = guard
        .run("sitebay_list_restores", Some(Vec::new), || async {
            Err(ApiError::authentication("Invalid or expired API token"))
        })
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn redundant_tool_prefix_is_stripped_from_messages() {
    let guard = ToolGuard::new(RetryPolicy::default());

    let result: Result<u32, _> = guard
        .run("sitebay_get_site", None, || async {
            Err(ApiError::api(
                "Error calling tool 'sitebay_get_site': boom",
                Some(400),
                None,
            ))
        })
        .await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "Upstream API error for sitebay_get_site: boom"
    );
}

#[tokio::test(start_paused = true)]
async fn base_delay_scales_the_whole_schedule() {
    let guard = ToolGuard::new(RetryPolicy {
        max_retries: 2,
        base_delay: Duration::from_millis(100),
    });
    let calls = AtomicU32::new(0);
    let started = Instant::now();

    let result = guard
        .run("sitebay_list_sites", None, || {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 2 {
                    Err(transient_503(attempt))
                } else {
                    Ok(())
                }
            }
        })
        .await;

    assert!(result.is_ok());
    // 100 ms + 200 ms of backoff.
    assert_eq!(started.elapsed(), Duration::from_millis(300));
}
