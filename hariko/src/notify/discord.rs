//! Discord webhook notifier

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use discord_webhook::models::{Embed, EmbedField, WebhookParams};
use discord_webhook::EMBED_DESCRIPTION_LIMIT;
use secrecy::SecretString;
use tracing::{debug, warn};

use crate::errors::RelayError;
use crate::http::client::HttpClient;
use crate::models::notification::{Notification, ProgressHandle};
use crate::notify::Notifier;
use crate::utils::truncate_head;

/// Longest summary kept in a message description
const SUMMARY_LIMIT: usize = 1024;

const CODE_FENCE_OPEN: &str = "```\n";
const CODE_FENCE_CLOSE: &str = "```";

/// Webhook credentials, written as `<id>/<token>`
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    pub id: String,
    pub token: SecretString,
}

impl FromStr for DiscordWebhook {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((id, token)) if !id.is_empty() && !token.is_empty() && !token.contains('/') => {
                Ok(Self {
                    id: id.to_string(),
                    token: SecretString::from(token.to_string()),
                })
            }
            _ => Err(RelayError::ConfigError(
                "Discord webhook must be given as <id>/<token>".to_string(),
            )),
        }
    }
}

/// Notifier posting embeds through a Discord webhook
pub struct DiscordNotifier {
    client: HttpClient,
    webhook: DiscordWebhook,
}

impl DiscordNotifier {
    pub fn new(api_base: &str, webhook: DiscordWebhook) -> Result<Self, RelayError> {
        Ok(Self {
            client: HttpClient::new(api_base)?,
            webhook,
        })
    }

    async fn deliver(
        &self,
        params: &WebhookParams,
        previous: Option<&ProgressHandle>,
    ) -> Result<ProgressHandle, RelayError> {
        let message = match previous {
            Some(handle) => {
                self.client
                    .edit_webhook_message(
                        &self.webhook.id,
                        &self.webhook.token,
                        handle.as_str(),
                        params,
                    )
                    .await?
            }
            None => {
                self.client
                    .execute_webhook(&self.webhook.id, &self.webhook.token, params)
                    .await?
            }
        };
        Ok(ProgressHandle::new(message.id))
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(
        &self,
        notification: &Notification,
        previous: Option<&ProgressHandle>,
    ) -> Option<ProgressHandle> {
        let params = to_webhook_params(notification);
        match self.deliver(&params, previous).await {
            Ok(handle) => {
                debug!("Delivered \"{}\" as message {}", notification.title, handle.as_str());
                Some(handle)
            }
            Err(e) => {
                warn!("Failed to deliver \"{}\": {}", notification.title, e);
                None
            }
        }
    }
}

/// Render a notification as a single-embed webhook body
pub fn to_webhook_params(notification: &Notification) -> WebhookParams {
    let embed = Embed {
        title: Some(notification.title.clone()),
        description: description(notification),
        color: notification.color,
        fields: notification
            .fields
            .iter()
            .map(|field| EmbedField {
                name: field.name.clone(),
                value: field.value.clone(),
                inline: field.inline,
            })
            .collect(),
        timestamp: Some(Utc::now()),
    };

    WebhookParams {
        embeds: vec![embed],
        ..Default::default()
    }
}

/// Summary, then the log in a code block, cut to the embed limit.
///
/// The log loses its oldest lines first.
fn description(notification: &Notification) -> Option<String> {
    let summary = notification
        .summary
        .as_deref()
        .map(|s| truncate_head(s, SUMMARY_LIMIT));

    let Some(log) = notification.log.as_deref() else {
        return summary;
    };

    let prefix = summary.map(|s| format!("{}\n", s)).unwrap_or_default();
    let overhead =
        prefix.chars().count() + CODE_FENCE_OPEN.chars().count() + CODE_FENCE_CLOSE.chars().count();
    let log = truncate_head(log, EMBED_DESCRIPTION_LIMIT.saturating_sub(overhead));

    Some(format!("{}{}{}{}", prefix, CODE_FENCE_OPEN, log, CODE_FENCE_CLOSE))
}
