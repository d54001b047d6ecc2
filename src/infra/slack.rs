use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::NotifierService;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SlackWebhook {
    http: Client,
    webhook_url: String,
}

impl SlackWebhook {
    pub fn new(webhook_url: String) -> Self {
        Self {
            http: Client::new(),
            webhook_url,
        }
    }
}

#[async_trait]
impl NotifierService for SlackWebhook {
    async fn deliver(&self, report: &str) -> AppResult<()> {
        let response = self
            .http
            .post(&self.webhook_url)
            .timeout(REQUEST_TIMEOUT)
            .json(&SlackMessage { text: report })
            .send()
            .await
            .map_err(|err| {
                AppError::Notification(format!("failed to call Slack webhook: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Notification(format!(
                "Slack webhook responded with {status}: {body}"
            )));
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct SlackMessage<'a> {
    text: &'a str,
}

/// Stands in when no webhook is configured: the finished report is printed
/// instead of dropped.
pub struct StdoutNotifier;

#[async_trait]
impl NotifierService for StdoutNotifier {
    async fn deliver(&self, report: &str) -> AppResult<()> {
        println!("{report}");
        Ok(())
    }
}
