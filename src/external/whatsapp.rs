use crate::config::WhatsAppConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use std::time::Duration;

/// CallMeBot-style WhatsApp gateway: one GET with phone/text/apikey query
/// parameters. The channel is best-effort; callers catch and log errors.
#[derive(Clone)]
pub struct WhatsAppService {
    client: Client,
    config: WhatsAppConfig,
}

impl WhatsAppService {
    pub fn new(config: WhatsAppConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty() && !self.config.phone.is_empty()
    }

    pub async fn send_message(&self, text: &str) -> AppResult<()> {
        if !self.is_configured() {
            log::debug!("WhatsApp channel not configured, skipping notification");
            return Ok(());
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("phone", self.config.phone.as_str()),
                ("text", text),
                ("apikey", self.config.api_key.as_str()),
            ])
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("WhatsApp notification sent to {}", self.config.phone);
            Ok(())
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("WhatsApp notification failed: {status}, Error: {error_text}");
            Err(AppError::InternalError(format!(
                "WhatsApp send failed: {status}"
            )))
        }
    }
}
