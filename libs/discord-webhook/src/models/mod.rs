//! Webhook API models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of an execute (`POST`) or edit (`PATCH`) webhook request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    pub embeds: Vec<Embed>,
}

/// Rich embed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// RGB colour as an integer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Embed field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub inline: bool,
}

/// Message returned by Discord when `wait=true` or on edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,

    #[serde(default)]
    pub channel_id: Option<String>,

    #[serde(default)]
    pub embeds: Vec<Embed>,
}
