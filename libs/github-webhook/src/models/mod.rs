//! Webhook payload models

use serde::{Deserialize, Serialize};

/// Payload of a `workflow_job` delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowJobPayload {
    /// One of `queued`, `in_progress`, `completed`, `waiting`
    pub action: String,
    pub workflow_job: WorkflowJob,
    pub repository: Repository,
    #[serde(default)]
    pub sender: Option<User>,
}

/// Workflow job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowJob {
    pub id: u64,
    pub run_id: u64,
    pub name: String,
    pub status: String,

    /// Null until the job has completed
    #[serde(default)]
    pub conclusion: Option<String>,

    #[serde(default)]
    pub head_sha: Option<String>,
    #[serde(default)]
    pub head_branch: Option<String>,
    #[serde(default)]
    pub workflow_name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Repository the job ran for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Account that triggered the delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
}
