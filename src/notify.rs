//! Best-effort push notifications.
//!
//! Every completed transaction may announce itself to a push-notification
//! service. Delivery is strictly best-effort: the message is posted from a
//! spawned task after the ledger write has completed, there is no retry, and
//! every failure is reduced to a warning in the log. Nothing here can block
//! or fail the ledger flow that triggered it.

use std::time::Duration;

use serde_json::json;

use crate::config::PushConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends messages to the configured push endpoint.
///
/// Cheap to clone; an unconfigured notifier silently drops every message.
#[derive(Debug, Clone)]
pub struct Notifier {
    client: reqwest::Client,
    config: Option<PushConfig>,
}

impl Notifier {
    /// Create a notifier. `None` disables notifications entirely.
    pub fn new(config: Option<PushConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// A notifier that never sends anything. Handy in tests.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Fire off `message` without waiting for the outcome.
    ///
    /// Must be called after the ledger write it announces, since callers
    /// embed the post-transaction balance in the message. Returns
    /// immediately; the POST happens on a spawned task and any error is
    /// logged and dropped.
    pub fn dispatch(&self, message: String) {
        if self.config.is_none() {
            tracing::debug!("push notifications are not configured, dropping message");
            return;
        }

        let notifier = self.clone();

        tokio::spawn(async move {
            if let Err(error) = notifier.send(&message).await {
                tracing::warn!("could not deliver push notification: {error}");
            }
        });
    }

    /// Post one message to the push endpoint.
    ///
    /// The body carries the application token, the free-text content, a
    /// content-type discriminator, and the recipient list. The response body
    /// is never parsed; only the status matters.
    async fn send(&self, message: &str) -> Result<(), reqwest::Error> {
        let Some(config) = &self.config else {
            return Ok(());
        };

        let body = json!({
            "token": config.token,
            "content": message,
            "content_type": "text",
            "recipients": config.recipients,
        });

        self.client
            .post(&config.url)
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[cfg(test)]
mod notifier_tests {
    use crate::config::PushConfig;

    use super::Notifier;

    fn push_config(url: String) -> PushConfig {
        PushConfig {
            url,
            token: "app-token".to_owned(),
            recipients: vec!["device-1".to_owned(), "device-2".to_owned()],
        }
    }

    #[tokio::test]
    async fn send_posts_token_content_and_recipients() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/message")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{
                    "token": "app-token",
                    "content": "Balance: 115.",
                    "content_type": "text",
                    "recipients": ["device-1", "device-2"]
                }"#
                .to_owned(),
            ))
            .with_status(200)
            .create_async()
            .await;
        let notifier = Notifier::new(Some(push_config(format!("{}/message", server.url()))));

        notifier.send("Balance: 115.").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn send_reports_http_failures() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/message")
            .with_status(500)
            .create_async()
            .await;
        let notifier = Notifier::new(Some(push_config(format!("{}/message", server.url()))));

        assert!(notifier.send("hello").await.is_err());
    }

    #[tokio::test]
    async fn dispatch_swallows_failures() {
        // An unroutable endpoint: dispatch must neither panic nor surface
        // the error to the caller.
        let notifier = Notifier::new(Some(push_config(
            "http://127.0.0.1:1/unroutable".to_owned(),
        )));

        notifier.dispatch("hello".to_owned());
    }

    #[tokio::test]
    async fn unconfigured_dispatch_is_a_no_op() {
        Notifier::disabled().dispatch("hello".to_owned());
    }
}
