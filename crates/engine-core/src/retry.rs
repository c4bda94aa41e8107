use std::thread::sleep;
use std::time::Duration;
use tracing::debug;

/// Indicates whether an error should be retried or treated as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDisposition {
    Retry,
    Stop,
}

/// Result of running an operation under the retry policy.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The error was considered fatal and should bubble up immediately.
    Fatal(E),
    /// The error was retryable, but the configured attempts were exhausted.
    AttemptsExceeded(E),
}

impl<E> RetryError<E> {
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Fatal(err) | RetryError::AttemptsExceeded(err) => err,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: if max_delay.is_zero() {
                base_delay
            } else {
                max_delay
            },
        }
    }

    /// Back-to-back attempts with no delay in between.
    pub fn immediate(max_attempts: usize) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// Runs `op` until it succeeds, `classify` says stop, or attempts run out.
    ///
    /// `op` receives the 1-based attempt number. The calling thread sleeps
    /// between attempts when a non-zero base delay is configured.
    pub fn run<F, T, E, Classifier>(
        &self,
        mut op: F,
        classify: Classifier,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(usize) -> Result<T, E>,
        Classifier: Fn(&E) -> RetryDisposition,
    {
        let mut attempt = 0;

        loop {
            match op(attempt + 1) {
                Ok(result) => return Ok(result),
                Err(err) => match classify(&err) {
                    RetryDisposition::Stop => return Err(RetryError::Fatal(err)),
                    RetryDisposition::Retry => {
                        if attempt + 1 >= self.max_attempts {
                            return Err(RetryError::AttemptsExceeded(err));
                        }

                        let delay = self.backoff_delay(attempt);
                        if !delay.is_zero() {
                            debug!(
                                attempt = attempt + 1,
                                delay_ms = delay.as_millis() as u64,
                                "Backing off before retry"
                            );
                            sleep(delay);
                        }
                        attempt += 1;
                    }
                },
            }
        }
    }

    fn backoff_delay(&self, attempt: usize) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::from_millis(0);
        }

        let factor = 1u128 << attempt.min(6);
        let base_ms = self.base_delay.as_millis();
        let delay_ms = base_ms.saturating_mul(factor);
        let capped = delay_ms.min(self.max_delay.as_millis());
        Duration::from_millis(capped as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_succeeds_after_transient_failures() {
        let policy = RetryPolicy::immediate(3);
        let mut seen = Vec::new();

        let result: Result<&str, RetryError<&str>> = policy.run(
            |attempt| {
                seen.push(attempt);
                if attempt < 3 { Err("busy") } else { Ok("done") }
            },
            |_| RetryDisposition::Retry,
        );

        assert_eq!(result.unwrap(), "done");
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_attempts_exceeded_returns_last_error() {
        let policy = RetryPolicy::immediate(3);
        let mut calls = 0;

        let result: Result<(), RetryError<usize>> = policy.run(
            |attempt| {
                calls += 1;
                Err(attempt)
            },
            |_| RetryDisposition::Retry,
        );

        assert_eq!(calls, 3);
        assert!(matches!(result, Err(RetryError::AttemptsExceeded(3))));
    }

    #[test]
    fn test_fatal_error_stops_immediately() {
        let policy = RetryPolicy::immediate(5);
        let mut calls = 0;

        let result: Result<(), RetryError<&str>> = policy.run(
            |_| {
                calls += 1;
                Err("bad credentials")
            },
            |_| RetryDisposition::Stop,
        );

        assert_eq!(calls, 1);
        assert_eq!(result.unwrap_err().into_inner(), "bad credentials");
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let policy = RetryPolicy::immediate(0);
        assert_eq!(policy.max_attempts, 1);
    }

    #[test]
    fn test_backoff_is_exponential_and_capped() {
        let policy = RetryPolicy::new(5, Duration::from_millis(100), Duration::from_millis(300));
        assert_eq!(policy.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_delay(2), Duration::from_millis(300));
        assert_eq!(RetryPolicy::immediate(3).backoff_delay(2), Duration::ZERO);
    }
}
