//! Delivery classification and decoding
//!
//! Deliveries are checked in a fixed order: event header, event type,
//! signature, then payload. Event types other than `workflow_job` are
//! reported as [`WebhookError::EventNotFound`] before the signature is looked
//! at, so callers can drop them silently.

use github_webhook::models::WorkflowJobPayload;
use github_webhook::{EVENT_HEADER, SIGNATURE_HEADER, WORKFLOW_JOB_EVENT};
use http::{HeaderMap, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::github::signature::verify_signature;

/// Reasons a delivery does not yield a workflow job payload
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("missing {} header", EVENT_HEADER)]
    MissingEventHeader,

    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("missing {} header", SIGNATURE_HEADER)]
    MissingSignature,

    #[error("signature does not match payload")]
    InvalidSignature,

    #[error("unable to decode workflow_job payload: {0}")]
    Decode(#[from] serde_json::Error),
}

impl WebhookError {
    /// Status returned to GitHub for this rejection
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::EventNotFound(_) => StatusCode::OK,
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::MissingEventHeader | WebhookError::Decode(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Verify and decode a `workflow_job` delivery
pub fn parse_workflow_job(
    headers: &HeaderMap,
    body: &[u8],
    secret: &SecretString,
) -> Result<WorkflowJobPayload, WebhookError> {
    let event = headers
        .get(EVENT_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingEventHeader)?;

    if event != WORKFLOW_JOB_EVENT {
        return Err(WebhookError::EventNotFound(event.to_string()));
    }

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(WebhookError::MissingSignature)?;

    if !verify_signature(secret.expose_secret().as_bytes(), body, signature) {
        return Err(WebhookError::InvalidSignature);
    }

    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::signature::sign;
    use http::HeaderValue;

    const SECRET: &str = "s3cr3t";

    const BODY: &str = r#"{
        "action": "completed",
        "workflow_job": {
            "id": 1, "run_id": 2, "name": "build",
            "status": "completed", "conclusion": "success"
        },
        "repository": { "id": 3, "name": "app", "full_name": "org/app" }
    }"#;

    fn headers(event: &str, body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(EVENT_HEADER, HeaderValue::from_str(event).unwrap());
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&sign(SECRET.as_bytes(), body)).unwrap(),
        );
        headers
    }

    fn secret() -> SecretString {
        SecretString::from(SECRET.to_string())
    }

    #[test]
    fn test_parse_signed_workflow_job() {
        let payload =
            parse_workflow_job(&headers("workflow_job", BODY.as_bytes()), BODY.as_bytes(), &secret())
                .unwrap();
        assert_eq!(payload.repository.full_name, "org/app");
    }

    #[test]
    fn test_other_event_ignored_before_signature() {
        let mut headers = HeaderMap::new();
        headers.insert(EVENT_HEADER, HeaderValue::from_static("ping"));

        let err = parse_workflow_job(&headers, b"{}", &secret()).unwrap_err();
        assert!(matches!(err, WebhookError::EventNotFound(ref e) if e == "ping"));
        assert_eq!(err.status_code(), StatusCode::OK);
    }

    #[test]
    fn test_missing_event_header() {
        let err = parse_workflow_job(&HeaderMap::new(), BODY.as_bytes(), &secret()).unwrap_err();
        assert!(matches!(err, WebhookError::MissingEventHeader));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_missing_and_invalid_signature() {
        let mut headers = headers("workflow_job", BODY.as_bytes());
        let err = parse_workflow_job(&headers, b"{\"tampered\":true}", &secret()).unwrap_err();
        assert!(matches!(err, WebhookError::InvalidSignature));
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        headers.remove(SIGNATURE_HEADER);
        let err = parse_workflow_job(&headers, BODY.as_bytes(), &secret()).unwrap_err();
        assert!(matches!(err, WebhookError::MissingSignature));
    }

    #[test]
    fn test_signed_garbage_is_decode_error() {
        let body = b"{\"action\":\"completed\"}";
        let err = parse_workflow_job(&headers("workflow_job", body), body, &secret()).unwrap_err();
        assert!(matches!(err, WebhookError::Decode(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err
            .to_string()
            .starts_with("unable to decode workflow_job payload: missing field"));
    }
}
