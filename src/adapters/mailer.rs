use crate::domain::model::OutboundEmail;
use crate::domain::ports::Notifier;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Sends notifications through an HTTP mail API (`POST {from,to,subject,text}`
/// as JSON, bearer-token auth).
pub struct HttpMailer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpMailer {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        tracing::debug!("Sending notification '{}' via {}", email.subject, self.endpoint);

        let mut request = self.client.post(&self.endpoint).json(email);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Notification {
                message: format!("mail API returned {}", status),
            });
        }

        tracing::debug!("Mail API accepted notification '{}'", email.subject);
        Ok(())
    }
}

/// Drops notifications; used when no mail endpoint is configured.
#[derive(Debug, Default)]
pub struct NoopMailer;

#[async_trait]
impl Notifier for NoopMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        tracing::info!(
            "Mail transport not configured, dropping notification '{}' to {}",
            email.subject,
            email.to
        );
        Ok(())
    }
}
