//! Bounded Retry
//!
//! Sequential retry loop for upstream calls with linear backoff
//! (`base_delay × attempt`) and a per-attempt log.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

use interview_coach_llm::LlmError;

/// Reasons an upstream attempt can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Credentials rejected
    Unauthorized,
    /// Request timed out
    Timeout,
    /// Rate limited
    RateLimited,
    /// Network/connection error
    NetworkError,
    /// Upstream returned 5xx
    ServerError,
    /// Upstream rejected the request (4xx)
    Rejected,
    /// Response envelope could not be decoded
    InvalidResponse,
    /// Anything else
    Error,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::Unauthorized => write!(f, "unauthorized"),
            FailureReason::Timeout => write!(f, "timeout"),
            FailureReason::RateLimited => write!(f, "rate_limited"),
            FailureReason::NetworkError => write!(f, "network_error"),
            FailureReason::ServerError => write!(f, "server_error"),
            FailureReason::Rejected => write!(f, "rejected"),
            FailureReason::InvalidResponse => write!(f, "invalid_response"),
            FailureReason::Error => write!(f, "error"),
        }
    }
}

impl From<&LlmError> for FailureReason {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::AuthenticationFailed { .. } => FailureReason::Unauthorized,
            LlmError::Timeout { .. } => FailureReason::Timeout,
            LlmError::RateLimited { .. } => FailureReason::RateLimited,
            LlmError::NetworkError { .. } => FailureReason::NetworkError,
            LlmError::ServerError { .. } => FailureReason::ServerError,
            LlmError::InvalidRequest { .. } | LlmError::ModelNotFound { .. } => {
                FailureReason::Rejected
            }
            LlmError::ParseError { .. } => FailureReason::InvalidResponse,
            LlmError::Other { .. } => FailureReason::Error,
        }
    }
}

/// Retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Backoff unit; the wait after attempt `n` is `base_delay × n`
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given (1-based) failed attempt.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Record of a single attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt number
    pub attempt: u32,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<FailureReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub duration_ms: u64,
    /// RFC 3339 start time
    pub started_at: String,
}

/// Log of all attempts of one retry sequence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttemptLog {
    pub attempts: Vec<AttemptRecord>,
    pub total_duration_ms: u64,
    pub overall_success: bool,
}

impl AttemptLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attempt to the log
    pub fn add_attempt(&mut self, record: AttemptRecord) {
        self.total_duration_ms += record.duration_ms;
        if record.success {
            self.overall_success = true;
        }
        self.attempts.push(record);
    }

    /// Number of failed attempts
    pub fn failed_attempts_count(&self) -> usize {
        self.attempts.iter().filter(|a| !a.success).count()
    }
}

/// Errors from retry execution
#[derive(Debug, Error)]
pub enum RetryError {
    #[error("all {attempts} attempts failed, last error: {last_error}")]
    Exhausted { attempts: u32, last_error: LlmError },
}

/// Run `op` up to `policy.max_attempts` times, sleeping between failures.
///
/// `op` receives the 1-based attempt number. Every finished attempt is
/// appended to `log`, so the caller keeps the record even when it abandons
/// the sequence early. Returns the first success with its attempt number.
pub async fn execute_with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    log: &mut AttemptLog,
    mut op: F,
) -> Result<(T, u32), RetryError>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, LlmError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        info!(attempt, max_attempts, "calling upstream");
        let started_at = chrono::Utc::now().to_rfc3339();
        let attempt_start = Instant::now();

        match op(attempt).await {
            Ok(value) => {
                let duration_ms = attempt_start.elapsed().as_millis() as u64;
                info!(attempt, duration_ms, "upstream call succeeded");
                log.add_attempt(AttemptRecord {
                    attempt,
                    success: true,
                    failure_reason: None,
                    error_message: None,
                    duration_ms,
                    started_at,
                });
                return Ok((value, attempt));
            }
            Err(e) => {
                let duration_ms = attempt_start.elapsed().as_millis() as u64;
                let reason = FailureReason::from(&e);
                warn!(attempt, %reason, error = %e, duration_ms, "upstream call failed");
                log.add_attempt(AttemptRecord {
                    attempt,
                    success: false,
                    failure_reason: Some(reason),
                    error_message: Some(e.to_string()),
                    duration_ms,
                    started_at,
                });

                if attempt >= max_attempts {
                    return Err(RetryError::Exhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }

                let delay = policy.backoff_after(attempt);
                if !delay.is_zero() {
                    debug!(delay_ms = delay.as_millis() as u64, "waiting before next attempt");
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn network_error() -> LlmError {
        LlmError::NetworkError {
            message: "connection refused".to_string(),
        }
    }

    #[test]
    fn test_linear_backoff() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
        };
        assert_eq!(policy.backoff_after(1), Duration::from_millis(250));
        assert_eq!(policy.backoff_after(2), Duration::from_millis(500));
    }

    #[test]
    fn test_failure_reason_classification() {
        assert_eq!(FailureReason::from(&network_error()), FailureReason::NetworkError);
        assert_eq!(
            FailureReason::from(&LlmError::ServerError {
                message: "bad gateway".to_string(),
                status: Some(502),
            }),
            FailureReason::ServerError
        );
        assert_eq!(
            FailureReason::from(&LlmError::ParseError {
                message: "eof".to_string()
            }),
            FailureReason::InvalidResponse
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_transient_failure() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();
        let mut log = AttemptLog::new();

        let (value, attempt) = execute_with_retry(&policy, &mut log, |n| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 1 {
                    Err(network_error())
                } else {
                    Ok("done")
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(value, "done");
        assert_eq!(attempt, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(log.failed_attempts_count(), 1);
        assert!(log.overall_success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_reports_every_attempt() {
        let calls = AtomicU32::new(0);
        let policy = RetryPolicy::default();
        let mut log = AttemptLog::new();

        let result: Result<((), u32), RetryError> = execute_with_retry(&policy, &mut log, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(network_error()) }
        })
        .await;

        let RetryError::Exhausted { attempts, .. } = result.unwrap_err();
        assert_eq!(attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(log.attempts.len(), 3);
        assert_eq!(log.failed_attempts_count(), 3);
        assert!(!log.overall_success);
        assert_eq!(log.attempts[2].failure_reason, Some(FailureReason::NetworkError));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_sleeps_linearly_between_attempts() {
        let policy = RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(400),
        };
        let mut log = AttemptLog::new();
        let started = tokio::time::Instant::now();

        let result: Result<((), u32), RetryError> =
            execute_with_retry(&policy, &mut log, |_| async { Err(network_error()) }).await;

        assert!(result.is_err());
        // 400ms after attempt 1, 800ms after attempt 2, nothing after the last
        let elapsed = started.elapsed();
        assert!(
            elapsed >= Duration::from_millis(1200) && elapsed < Duration::from_millis(1250),
            "elapsed {:?}",
            elapsed
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_does_not_sleep() {
        let mut log = AttemptLog::new();
        let started = tokio::time::Instant::now();

        let policy = RetryPolicy::default();
        let result =
            execute_with_retry(&policy, &mut log, |_| async { Ok::<_, LlmError>("ok") }).await;

        assert_eq!(result.unwrap(), ("ok", 1));
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(log.attempts.len(), 1);
        assert!(log.overall_success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_attempts_still_tries_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            base_delay: Duration::ZERO,
        };
        let mut log = AttemptLog::new();
        let result =
            execute_with_retry(&policy, &mut log, |_| async { Ok::<_, LlmError>(1) }).await;
        assert_eq!(result.unwrap().1, 1);
    }
}
