use kernel::model::outbox::OutboxEmail;
use shared::config::{EmailConfig, EmailMode};
use shared::error::{AppError, AppResult};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Outbound mail transport. In console mode the rendered email is logged and
/// delivery always succeeds, which keeps development environments working
/// without a provider key.
pub struct MailClient {
    mode: EmailMode,
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl MailClient {
    pub fn new(cfg: &EmailConfig) -> Self {
        Self {
            mode: cfg.mode,
            http: reqwest::Client::new(),
            api_key: cfg.api_key.clone(),
            from: cfg.from.clone(),
        }
    }

    pub async fn send(&self, email: &OutboxEmail) -> AppResult<()> {
        match self.mode {
            EmailMode::Console => {
                tracing::info!(
                    to = %email.recipient,
                    subject = %email.subject,
                    body = %email.body,
                    "email simulated (console mode)"
                );
                Ok(())
            }
            EmailMode::Resend => self.send_via_resend(email).await,
        }
    }

    async fn send_via_resend(&self, email: &OutboxEmail) -> AppResult<()> {
        let res = self
            .http
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({
                "from": self.from,
                "to": [email.recipient],
                "subject": email.subject,
                "text": email.body,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Resend request failed: {e}")))?;

        if res.status().is_success() {
            return Ok(());
        }
        let status = res.status();
        let detail = res.text().await.unwrap_or_default();
        Err(AppError::ExternalServiceError(format!(
            "Resend API error ({status}): {detail}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kernel::model::id::OutboxEmailId;
    use kernel::model::outbox::OutboxStatus;

    fn console_client() -> MailClient {
        MailClient::new(&EmailConfig {
            mode: EmailMode::Console,
            api_key: String::new(),
            from: "noreply@example.com".into(),
            restaurant_name: "Restaurant".into(),
            restaurant_email: "admin@restaurant.com".into(),
        })
    }

    #[tokio::test]
    async fn console_mode_always_succeeds_without_network() {
        let email = OutboxEmail {
            id: OutboxEmailId::new(),
            recipient: "ada@example.com".into(),
            subject: "hello".into(),
            body: "world".into(),
            status: OutboxStatus::Queued,
            attempts: 0,
            last_error: None,
            next_attempt_at: Utc::now(),
            created_at: Utc::now(),
            sent_at: None,
        };
        assert!(console_client().send(&email).await.is_ok());
    }
}
