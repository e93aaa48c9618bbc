//! HTTP request handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use github_webhook::DELIVERY_HEADER;
use serde::Serialize;
use tracing::{debug, error, info_span, warn, Instrument, Span};

use crate::github::webhook::{parse_workflow_job, WebhookError};
use crate::models::event::InboundEvent;
use crate::server::state::ServerState;
use crate::utils::{generate_uuid, version_info};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "hariko".to_string(),
        version: version.version,
    })
}

/// Version response
#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

/// GitHub webhook handler
///
/// Answers once the triggered deployment, if any, has finished. The
/// deployment runs to completion even when the client stops waiting.
pub async fn github_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let delivery = headers
        .get(DELIVERY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(generate_uuid);

    async move {
        let payload = match parse_workflow_job(&headers, &body, &state.webhook_secret) {
            Ok(payload) => payload,
            Err(WebhookError::EventNotFound(event)) => {
                debug!("Ignoring {} event", event);
                return StatusCode::OK;
            }
            Err(e @ WebhookError::Decode(_)) => {
                error!("{}", e);
                return e.status_code();
            }
            Err(e) => {
                warn!("Rejected delivery: {}", e);
                return e.status_code();
            }
        };

        let event = InboundEvent::from(&payload);
        let orchestrator = state.orchestrator.clone();

        // Dropping a JoinHandle does not cancel the task, so a client
        // disconnect cannot cut the deployment short
        let handle = tokio::spawn(
            async move { orchestrator.handle(&event).await }.instrument(Span::current()),
        );
        match handle.await {
            Ok(Ok(final_state)) => debug!("Delivery finished in state {:?}", final_state),
            Ok(Err(e)) => error!("Delivery handling failed: {}", e),
            Err(e) => error!("Delivery task failed: {}", e),
        }

        StatusCode::OK
    }
    .instrument(info_span!("delivery", id = %delivery))
    .await
}
