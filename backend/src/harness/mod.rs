//! Sequential end-to-end test harness.
//!
//! Suites and cases are plain async blocks run strictly in order. The first
//! failing case aborts the run; its error carries the case name so the
//! operator can find the failing step in the log.

use std::future::Future;

use thiserror::Error;
use tracing::{error, info};

use crate::domain::ports::StoreError;
use crate::outbound::persistence::PoolError;

/// Failure raised by an end-to-end case.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HarnessError {
    message: String,
}

impl HarnessError {
    /// Create an error from a failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Prefix the error with the name of the case it was raised in.
    #[must_use]
    pub fn in_case(self, case: &str) -> Self {
        Self {
            message: format!("{case}: {}", self.message),
        }
    }
}

impl From<reqwest::Error> for HarnessError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(format!("http request failed: {error}"))
    }
}

impl From<StoreError> for HarnessError {
    fn from(error: StoreError) -> Self {
        Self::new(format!("store operation failed: {error}"))
    }
}

impl From<PoolError> for HarnessError {
    fn from(error: PoolError) -> Self {
        Self::new(format!("database pool failed: {error}"))
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(format!("unexpected response shape: {error}"))
    }
}

/// Run a named suite, logging its boundary.
pub async fn suite<F>(name: &str, body: F) -> Result<(), HarnessError>
where
    F: Future<Output = Result<(), HarnessError>>,
{
    info!(suite = name, "suite started");
    body.await?;
    info!(suite = name, "suite passed");
    Ok(())
}

/// Run a named case. A failure is logged and annotated with the case name.
pub async fn case<F>(name: &str, body: F) -> Result<(), HarnessError>
where
    F: Future<Output = Result<(), HarnessError>>,
{
    match body.await {
        Ok(()) => {
            info!(case = name, "ok");
            Ok(())
        }
        Err(err) => {
            let err = err.in_case(name);
            error!(case = name, error = %err, "failed");
            Err(err)
        }
    }
}

/// Fail the current case unless `condition` holds.
pub fn ensure(condition: bool, message: &str) -> Result<(), HarnessError> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::new(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failing_case_is_annotated_with_its_name() {
        let result = case("create user", async { ensure(false, "missing id") }).await;

        let error = result.expect_err("case should fail");
        assert_eq!(error.to_string(), "create user: missing id");
    }

    #[tokio::test]
    async fn passing_case_returns_ok() {
        let result = case("list users", async { ensure(true, "unreachable") }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn suite_short_circuits_on_the_first_failure() {
        let mut reached_second = false;

        let result = suite("users", async {
            case("first", async { Err(HarnessError::new("boom")) }).await?;
            reached_second = true;
            case("second", async { Ok(()) }).await
        })
        .await;

        assert!(result.is_err());
        assert!(!reached_second, "later cases must not run after a failure");
    }

    #[tokio::test]
    async fn store_errors_convert_into_harness_errors() {
        let error: HarnessError = StoreError::connection("refused").into();
        assert!(error.to_string().contains("store operation failed"));
    }
}
