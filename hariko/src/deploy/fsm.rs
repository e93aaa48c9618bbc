//! Finite State Machine for a single webhook delivery

/// Request state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    /// Nothing received yet
    Idle,

    /// Event received, filter pending
    Validating,

    /// Filter rejected the event
    Dropped,

    /// Deployment in progress
    Deploying,

    /// Deployment succeeded
    Succeeded,

    /// Deployment failed
    Failed,
}

impl RequestState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RequestState::Dropped | RequestState::Succeeded | RequestState::Failed
        )
    }
}

/// Request event
#[derive(Debug, Clone)]
pub enum RequestEvent {
    /// A decoded event arrived
    Receive,

    /// Filter rejected the event
    Reject(String),

    /// Filter accepted the event
    Accept,

    /// Deployment completed successfully
    DeploySuccess,

    /// Deployment failed
    DeployFailed(String),
}

/// Request FSM
#[derive(Debug, Clone)]
pub struct RequestFsm {
    state: RequestState,
    reason: Option<String>,
}

impl RequestFsm {
    /// Create a new FSM in idle state
    pub fn new() -> Self {
        Self {
            state: RequestState::Idle,
            reason: None,
        }
    }

    /// Get current state
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Why the request was dropped or failed
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Process an event and transition state
    pub fn process(&mut self, event: RequestEvent) -> Result<(), String> {
        let new_state = match (&self.state, &event) {
            (RequestState::Idle, RequestEvent::Receive) => RequestState::Validating,

            (RequestState::Validating, RequestEvent::Reject(reason)) => {
                self.reason = Some(reason.clone());
                RequestState::Dropped
            }
            (RequestState::Validating, RequestEvent::Accept) => RequestState::Deploying,

            (RequestState::Deploying, RequestEvent::DeploySuccess) => RequestState::Succeeded,
            (RequestState::Deploying, RequestEvent::DeployFailed(err)) => {
                self.reason = Some(err.clone());
                RequestState::Failed
            }

            // Invalid transitions, including any out of a terminal state
            (state, event) => {
                return Err(format!("Invalid transition: {:?} -> {:?}", state, event));
            }
        };

        self.state = new_state;
        Ok(())
    }
}

impl Default for RequestFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fsm_transitions() {
        let mut fsm = RequestFsm::new();
        assert_eq!(fsm.state(), &RequestState::Idle);

        fsm.process(RequestEvent::Receive).unwrap();
        assert_eq!(fsm.state(), &RequestState::Validating);

        fsm.process(RequestEvent::Accept).unwrap();
        assert_eq!(fsm.state(), &RequestState::Deploying);

        fsm.process(RequestEvent::DeploySuccess).unwrap();
        assert_eq!(fsm.state(), &RequestState::Succeeded);
        assert!(fsm.state().is_terminal());
    }

    #[test]
    fn test_fsm_error_handling() {
        let mut fsm = RequestFsm::new();

        fsm.process(RequestEvent::Receive).unwrap();
        fsm.process(RequestEvent::Accept).unwrap();
        fsm.process(RequestEvent::DeployFailed("test error".to_string()))
            .unwrap();

        assert_eq!(fsm.state(), &RequestState::Failed);
        assert_eq!(fsm.reason(), Some("test error"));
    }
}
