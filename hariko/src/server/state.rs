//! Server state

use std::sync::Arc;

use secrecy::SecretString;

use crate::orchestrator::Orchestrator;

/// Server state shared across handlers
pub struct ServerState {
    pub orchestrator: Arc<Orchestrator>,
    pub webhook_secret: SecretString,
}

impl ServerState {
    pub fn new(orchestrator: Arc<Orchestrator>, webhook_secret: SecretString) -> Self {
        Self {
            orchestrator,
            webhook_secret,
        }
    }
}
