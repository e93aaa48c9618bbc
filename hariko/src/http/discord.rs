//! Discord webhook API client

use discord_webhook::models::{Message, WebhookParams};
use secrecy::{ExposeSecret, SecretString};

use crate::errors::RelayError;
use crate::http::client::HttpClient;

impl HttpClient {
    /// Execute a webhook and wait for the created message
    pub async fn execute_webhook(
        &self,
        webhook_id: &str,
        token: &SecretString,
        params: &WebhookParams,
    ) -> Result<Message, RelayError> {
        let mut url = self.url(&["webhooks", webhook_id, token.expose_secret()])?;
        url.query_pairs_mut().append_pair("wait", "true");

        let route = format!("/webhooks/{}/***", webhook_id);
        self.post(url, &route, params).await
    }

    /// Edit a message previously sent through the webhook
    pub async fn edit_webhook_message(
        &self,
        webhook_id: &str,
        token: &SecretString,
        message_id: &str,
        params: &WebhookParams,
    ) -> Result<Message, RelayError> {
        let url = self.url(&[
            "webhooks",
            webhook_id,
            token.expose_secret(),
            "messages",
            message_id,
        ])?;

        let route = format!("/webhooks/{}/***/messages/{}", webhook_id, message_id);
        self.patch(url, &route, params).await
    }
}
