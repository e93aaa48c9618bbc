//! Inbound event model

use github_webhook::models::WorkflowJobPayload;

/// Workflow job notification projected from a GitHub delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    /// `owner/name` of the repository the job ran for
    pub repository_full_name: String,

    /// Job name as written in the workflow file
    pub job_name: String,

    /// `queued`, `in_progress`, `completed` or `waiting`
    pub status: String,

    /// Absent until the job has completed
    pub conclusion: Option<String>,
}

impl From<&WorkflowJobPayload> for InboundEvent {
    fn from(payload: &WorkflowJobPayload) -> Self {
        Self {
            repository_full_name: payload.repository.full_name.clone(),
            job_name: payload.workflow_job.name.clone(),
            status: payload.workflow_job.status.clone(),
            conclusion: payload.workflow_job.conclusion.clone(),
        }
    }
}
