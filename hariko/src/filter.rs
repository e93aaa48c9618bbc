//! Event filter
//!
//! Decides whether an inbound workflow job should trigger a deployment.

use std::fmt;

use crate::models::event::InboundEvent;

/// Status of a finished job
pub const STATUS_COMPLETED: &str = "completed";

/// Conclusion of a successful job
pub const CONCLUSION_SUCCESS: &str = "success";

/// The first field of an event that did not match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    Repository { expected: String, got: String },
    JobName { expected: String, got: String },
    Status { got: String },
    Conclusion { got: Option<String> },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Repository { expected, got } => {
                write!(f, "repository expected: {}, got: {}", expected, got)
            }
            Mismatch::JobName { expected, got } => {
                write!(f, "job name expected: {}, got: {}", expected, got)
            }
            Mismatch::Status { got } => {
                write!(f, "job status expected: {}, got: {}", STATUS_COMPLETED, got)
            }
            Mismatch::Conclusion { got } => write!(
                f,
                "job conclusion expected: {}, got: {}",
                CONCLUSION_SUCCESS,
                got.as_deref().unwrap_or("none")
            ),
        }
    }
}

/// Expected identity of the job that triggers deployments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFilter {
    pub repository_full_name: String,
    pub job_name: String,
}

impl EventFilter {
    pub fn new(repository_full_name: impl Into<String>, job_name: impl Into<String>) -> Self {
        Self {
            repository_full_name: repository_full_name.into(),
            job_name: job_name.into(),
        }
    }

    /// Accept the event or report the first mismatching field
    pub fn check(&self, event: &InboundEvent) -> Result<(), Mismatch> {
        if event.repository_full_name != self.repository_full_name {
            return Err(Mismatch::Repository {
                expected: self.repository_full_name.clone(),
                got: event.repository_full_name.clone(),
            });
        }
        if event.job_name != self.job_name {
            return Err(Mismatch::JobName {
                expected: self.job_name.clone(),
                got: event.job_name.clone(),
            });
        }
        if event.status != STATUS_COMPLETED {
            return Err(Mismatch::Status {
                got: event.status.clone(),
            });
        }
        if event.conclusion.as_deref() != Some(CONCLUSION_SUCCESS) {
            return Err(Mismatch::Conclusion {
                got: event.conclusion.clone(),
            });
        }
        Ok(())
    }
}
