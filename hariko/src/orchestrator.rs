//! Deployment orchestration
//!
//! Runs one accepted event through notify → deploy → notify. Each call is
//! independent: two qualifying events arriving together start two deployments
//! of the same release, each with its own message. Serialising them would need
//! a single-flight guard keyed on release and namespace.

use std::sync::Arc;

use tracing::{info, warn};

use crate::deploy::fsm::{RequestEvent, RequestFsm, RequestState};
use crate::deploy::Deployer;
use crate::errors::RelayError;
use crate::filter::EventFilter;
use crate::models::deployment::{DeploymentOutcome, DeploymentRequest};
use crate::models::event::InboundEvent;
use crate::models::notification::Notification;
use crate::notify::Notifier;

/// Connects the event filter, the notifier and the deployer
pub struct Orchestrator {
    filter: EventFilter,
    request: DeploymentRequest,
    notifier: Arc<dyn Notifier>,
    deployer: Arc<dyn Deployer>,
}

impl Orchestrator {
    pub fn new(
        filter: EventFilter,
        request: DeploymentRequest,
        notifier: Arc<dyn Notifier>,
        deployer: Arc<dyn Deployer>,
    ) -> Self {
        Self {
            filter,
            request,
            notifier,
            deployer,
        }
    }

    /// Handle one event and return the terminal state it reached.
    ///
    /// A rejected event ends in [`RequestState::Dropped`] without any
    /// notification or deployment.
    pub async fn handle(&self, event: &InboundEvent) -> Result<RequestState, RelayError> {
        let mut fsm = RequestFsm::new();
        advance(&mut fsm, RequestEvent::Receive)?;

        if let Err(mismatch) = self.filter.check(event) {
            warn!("{}", mismatch);
            advance(&mut fsm, RequestEvent::Reject(mismatch.to_string()))?;
            return Ok(fsm.state().clone());
        }
        advance(&mut fsm, RequestEvent::Accept)?;

        info!(
            "Job {} of {} succeeded, deploying {}/{}",
            event.job_name,
            event.repository_full_name,
            self.request.source_name,
            self.request.package_name
        );

        let handle = self.notifier.notify(&Notification::started(), None).await;
        let outcome = self.deployer.deploy(&self.request).await;

        match &outcome {
            DeploymentOutcome::Succeeded { .. } => {
                advance(&mut fsm, RequestEvent::DeploySuccess)?;
            }
            DeploymentOutcome::Failed { error, .. } => {
                advance(&mut fsm, RequestEvent::DeployFailed(error.clone()))?;
            }
        }

        self.notifier
            .notify(&Notification::from_outcome(&outcome), handle.as_ref())
            .await;

        Ok(fsm.state().clone())
    }
}

fn advance(fsm: &mut RequestFsm, event: RequestEvent) -> Result<(), RelayError> {
    fsm.process(event).map_err(RelayError::Internal)
}
