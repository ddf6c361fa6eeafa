use crate::config::MailConfig;
use crate::error::{AppError, AppResult};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct SendMailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Transactional-mail HTTP sink. Missing credentials disable the channel
/// silently: local setups run without any mail provider.
#[derive(Clone)]
pub struct MailService {
    client: Client,
    config: MailConfig,
}

impl MailService {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty() && !self.config.api_url.is_empty()
    }

    pub async fn send(&self, subject: &str, text: &str) -> AppResult<()> {
        if !self.is_configured() {
            log::debug!("Mail channel not configured, skipping notification");
            return Ok(());
        }

        let body = SendMailRequest {
            from: &self.config.from_address,
            to: &self.config.to_address,
            subject,
            text,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .timeout(Duration::from_secs(10))
            .send()
            .await?;

        if response.status().is_success() {
            log::info!("Order email sent to {}", self.config.to_address);
            Ok(())
        } else {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!("Order email failed: {status}, Error: {error_text}");
            Err(AppError::InternalError(format!("Mail send failed: {status}")))
        }
    }
}

/// Map link for the delivery location: exact GPS pin when the customer
/// shared coordinates, otherwise a maps search on the street address.
pub fn map_link(latitude: Option<f64>, longitude: Option<f64>, address: &str) -> String {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => format!("https://www.google.com/maps?q={lat},{lng}"),
        _ => reqwest::Url::parse_with_params(
            "https://www.google.com/maps/search/",
            &[("api", "1"), ("query", address)],
        )
        .map(|u| u.to_string())
        .unwrap_or_else(|_| "https://www.google.com/maps".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_channel_skips() {
        let service = MailService::new(MailConfig::default());
        assert!(!service.is_configured());
        assert!(service.send("subject", "body").await.is_ok());
    }

    #[test]
    fn test_map_link_prefers_coordinates() {
        let link = map_link(Some(17.385), Some(78.4867), "12 Lake Rd");
        assert_eq!(link, "https://www.google.com/maps?q=17.385,78.4867");
    }

    #[test]
    fn test_map_link_falls_back_to_address_search() {
        let link = map_link(None, None, "12 Lake Rd, Hyderabad");
        assert!(link.starts_with("https://www.google.com/maps/search/?"));
        assert!(link.contains("api=1"));
        assert!(link.contains("query=12"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn test_map_link_requires_both_coordinates() {
        let link = map_link(Some(17.385), None, "12 Lake Rd");
        assert!(link.starts_with("https://www.google.com/maps/search/?"));
    }
}
