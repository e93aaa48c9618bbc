//! GitHub webhook models

pub mod models;

/// Header carrying the event type of a delivery
pub const EVENT_HEADER: &str = "x-github-event";

/// Header carrying the HMAC-SHA256 signature of the body
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

/// Header carrying the unique delivery id
pub const DELIVERY_HEADER: &str = "x-github-delivery";

/// Event name of workflow job deliveries
pub const WORKFLOW_JOB_EVENT: &str = "workflow_job";
