//! Progress notification models

use crate::models::deployment::{CapturedLog, DeploymentOutcome, Release};

/// Colour of a succeeded deployment message
pub const COLOR_SUCCESS: u32 = 0x3fb950;

/// Colour of a failed deployment message
pub const COLOR_FAILURE: u32 = 0xf85149;

/// Reference to a message previously sent by a notifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProgressHandle(String);

impl ProgressHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Named value shown alongside a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A sink-independent rich message.
///
/// `summary` is free text shown first; `log` is rendered by the sink as a
/// preformatted block after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub color: Option<u32>,
    pub summary: Option<String>,
    pub log: Option<String>,
    pub fields: Vec<NotificationField>,
}

impl Notification {
    pub fn started() -> Self {
        Self {
            title: "Deployment started".to_string(),
            color: None,
            summary: None,
            log: None,
            fields: Vec::new(),
        }
    }

    pub fn succeeded(release: &Release, log: &CapturedLog) -> Self {
        Self {
            title: "Deployment succeeded".to_string(),
            color: Some(COLOR_SUCCESS),
            summary: None,
            log: Some(log.as_str().to_string()),
            fields: vec![
                inline_field("Name", &release.name),
                inline_field("Namespace", &release.namespace),
                inline_field("Revision", &release.revision.to_string()),
            ],
        }
    }

    pub fn failed(error: &str, log: &CapturedLog) -> Self {
        Self {
            title: "Deployment failed".to_string(),
            color: Some(COLOR_FAILURE),
            summary: Some(error.to_string()),
            log: Some(log.as_str().to_string()),
            fields: Vec::new(),
        }
    }

    /// Terminal notification for a deployment outcome
    pub fn from_outcome(outcome: &DeploymentOutcome) -> Self {
        match outcome {
            DeploymentOutcome::Succeeded { release, log } => Self::succeeded(release, log),
            DeploymentOutcome::Failed { error, log } => Self::failed(error, log),
        }
    }
}

fn inline_field(name: &str, value: &str) -> NotificationField {
    NotificationField {
        name: name.to_string(),
        value: value.to_string(),
        inline: true,
    }
}
