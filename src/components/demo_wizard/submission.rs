// ABOUTME: Boundary to the external scheduling service: the Submitter trait, a simulated
// implementation, and a timeout wrapper that turns expiry into a SubmissionError

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::SubmissionError;
use crate::models::{BookingConfirmation, BookingRequest, DEFAULT_SESSION_MINUTES};

/// Default simulated round trip, matching the delay on the live site
pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(2000);

/// Default upper bound on a single submission
pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(30);

/// Hands a validated booking to whatever actually schedules the demo
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(&self, request: BookingRequest) -> Result<BookingConfirmation, SubmissionError>;
}

/// Stand-in scheduling service: waits, then confirms every request
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    duration_minutes: u32,
}

impl SimulatedSubmitter {
    pub const fn new(delay: Duration, duration_minutes: u32) -> Self {
        Self {
            delay,
            duration_minutes,
        }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY, DEFAULT_SESSION_MINUTES)
    }
}

#[async_trait]
impl Submitter for SimulatedSubmitter {
    async fn submit(&self, request: BookingRequest) -> Result<BookingConfirmation, SubmissionError> {
        debug!(
            request_id = %request.request_id,
            date = %request.date,
            time = %request.time,
            "Simulating scheduling request"
        );
        tokio::time::sleep(self.delay).await;
        Ok(BookingConfirmation::for_request(&request, self.duration_minutes))
    }
}

/// Run one submission, failing with `SubmissionError::TimedOut` once `limit` elapses
pub async fn submit_with_timeout(
    submitter: &dyn Submitter,
    request: BookingRequest,
    limit: Duration,
) -> Result<BookingConfirmation, SubmissionError> {
    let request_id = request.request_id;
    match tokio::time::timeout(limit, submitter.submit(request)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(%request_id, "Scheduling request timed out after {:?}", limit);
            Err(SubmissionError::TimedOut { after: limit })
        }
    }
}
