//! Webhook delivery of purge reports.
//!
//! The payload is a short heading plus the rendered plan text. The
//! receiving channel may truncate it; delivery is fire-and-forget beyond
//! checking the response status.

use serde_json::json;

use crate::error::{Result, SweepError};

pub struct Notifier {
    url: String,
    client: reqwest::Client,
}

impl Notifier {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    pub async fn send(&self, heading: &str, text: &str) -> Result<()> {
        let payload = json!({
            "heading": heading,
            "text": text,
        });
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| SweepError::Notify(err.to_string()))?;
        if !response.status().is_success() {
            return Err(SweepError::Notify(format!(
                "webhook returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}
