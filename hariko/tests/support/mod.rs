//! Fakes shared by the integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use hariko::deploy::{Deployer, PackageEngine};
use hariko::errors::RelayError;
use hariko::models::deployment::{CapturedLog, DeploymentOutcome, DeploymentRequest, Release};
use hariko::models::event::InboundEvent;
use hariko::models::notification::{Notification, ProgressHandle};
use hariko::notify::Notifier;

pub fn request() -> DeploymentRequest {
    DeploymentRequest {
        package_name: "app".to_string(),
        source_name: "charts".to_string(),
        source_url: "https://charts.example.com".to_string(),
    }
}

pub fn event(repo: &str, job: &str, status: &str, conclusion: Option<&str>) -> InboundEvent {
    InboundEvent {
        repository_full_name: repo.to_string(),
        job_name: job.to_string(),
        status: status.to_string(),
        conclusion: conclusion.map(str::to_string),
    }
}

pub fn release(revision: u64) -> Release {
    Release {
        name: "charts".to_string(),
        namespace: "apps".to_string(),
        revision,
    }
}

// ================================= NOTIFIER ===================================== //

/// One recorded `notify` call
#[derive(Debug, Clone)]
pub struct NotifyCall {
    pub notification: Notification,
    pub previous: Option<ProgressHandle>,
}

/// Notifier recording every call; hands out `msg-<n>` handles unless failing
pub struct RecordingNotifier {
    calls: Mutex<Vec<NotifyCall>>,
    failing: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// A notifier whose deliveries all fail
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn calls(&self) -> Vec<NotifyCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        notification: &Notification,
        previous: Option<&ProgressHandle>,
    ) -> Option<ProgressHandle> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(NotifyCall {
            notification: notification.clone(),
            previous: previous.cloned(),
        });
        if self.failing {
            return None;
        }
        Some(
            previous
                .cloned()
                .unwrap_or_else(|| ProgressHandle::new(format!("msg-{}", calls.len()))),
        )
    }
}

// ================================= DEPLOYER ===================================== //

/// Deployer returning a fixed outcome and recording requests
pub struct RecordingDeployer {
    outcome: DeploymentOutcome,
    delay: Duration,
    requests: Mutex<Vec<DeploymentRequest>>,
}

impl RecordingDeployer {
    pub fn new(outcome: DeploymentOutcome) -> Self {
        Self {
            outcome,
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Take `delay` before returning the outcome
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn succeeding() -> Self {
        let mut log = CapturedLog::new();
        log.append("Release \"charts\" has been upgraded. Happy Helming!");
        Self::new(DeploymentOutcome::Succeeded {
            release: release(2),
            log,
        })
    }

    pub fn requests(&self) -> Vec<DeploymentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Deployer for RecordingDeployer {
    async fn deploy(&self, request: &DeploymentRequest) -> DeploymentOutcome {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}

// ================================== ENGINE ====================================== //

/// Step at which [`FakeEngine`] fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Nowhere,
    AddSource,
    RefreshIndex,
    UpgradeInstall,
}

/// Package engine recording steps and bumping a revision per upgrade
pub struct FakeEngine {
    fail_at: FailAt,
    steps: Mutex<Vec<String>>,
    revision: AtomicU64,
}

impl FakeEngine {
    pub fn new(fail_at: FailAt) -> Self {
        Self {
            fail_at,
            steps: Mutex::new(Vec::new()),
            revision: AtomicU64::new(0),
        }
    }

    pub fn steps(&self) -> Vec<String> {
        self.steps.lock().unwrap().clone()
    }

    fn record(&self, step: String) {
        self.steps.lock().unwrap().push(step);
    }
}

#[async_trait]
impl PackageEngine for FakeEngine {
    async fn add_source(
        &self,
        name: &str,
        url: &str,
        log: &mut CapturedLog,
    ) -> Result<(), RelayError> {
        self.record(format!("add_source {} {}", name, url));
        if self.fail_at == FailAt::AddSource {
            log.append("Error: looks like \"https://charts.example.com\" is not a valid chart repository");
            return Err(RelayError::DeployError(
                "helm repo add exited with exit status: 1".to_string(),
            ));
        }
        log.append(&format!("\"{}\" has been added to your repositories", name));
        Ok(())
    }

    async fn refresh_index(&self, name: &str, log: &mut CapturedLog) -> Result<(), RelayError> {
        self.record(format!("refresh_index {}", name));
        if self.fail_at == FailAt::RefreshIndex {
            return Err(RelayError::DeployError(
                "helm repo update exited with exit status: 1".to_string(),
            ));
        }
        log.append(&format!(
            "...Successfully got an update from the \"{}\" chart repository",
            name
        ));
        Ok(())
    }

    async fn upgrade_install(
        &self,
        source_name: &str,
        package_name: &str,
        log: &mut CapturedLog,
    ) -> Result<Release, RelayError> {
        self.record(format!("upgrade_install {}/{}", source_name, package_name));
        if self.fail_at == FailAt::UpgradeInstall {
            log.append("Error: UPGRADE FAILED: timed out waiting for the condition");
            return Err(RelayError::DeployError(
                "helm upgrade exited with exit status: 1".to_string(),
            ));
        }
        log.append("upgrade.go:164: [debug] preparing upgrade for charts");
        let revision = self.revision.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(release(revision))
    }
}
