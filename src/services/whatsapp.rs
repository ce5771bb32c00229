use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when sending WhatsApp messages
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: invalid access token")]
    Unauthorized,
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

/// WhatsApp Cloud API client
///
/// Sends plain text messages to hosts and students. Callers treat every send
/// as best-effort.
pub struct WhatsAppClient {
    api_url: String,
    access_token: String,
    client: Client,
}

impl WhatsAppClient {
    pub fn new(api_url: String, access_token: String, timeout: Duration) -> Result<Self, WhatsAppError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_url,
            access_token,
            client,
        })
    }

    /// Send a text message to a phone number
    pub async fn send_message(&self, phone: &str, message: &str) -> Result<(), WhatsAppError> {
        let payload = MessagePayload {
            messaging_product: "whatsapp",
            to: phone,
            kind: "text",
            text: TextBody { body: message },
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(WhatsAppError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(WhatsAppError::ApiError(format!("{} - {}", status, body)));
        }

        tracing::debug!("Sent WhatsApp message to {}", phone);
        Ok(())
    }
}

/// Message sent to both parties once a match is finalized
pub fn match_finalized_message(location: &str) -> String {
    format!("Your Shabbat hosting in {} is confirmed by both host and student. Shabbat shalom!", location)
}

/// Reminder for a party that has not confirmed yet
pub fn confirmation_reminder_message() -> String {
    "Please confirm your match within 24 hours.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        let payload = MessagePayload {
            messaging_product: "whatsapp",
            to: "+972500000000",
            kind: "text",
            text: TextBody { body: "hi" },
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"]["body"], "hi");
        assert_eq!(json["to"], "+972500000000");
    }

    #[tokio::test]
    async fn test_send_message_posts_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/messages")
            .match_header("authorization", "Bearer token")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "messaging_product": "whatsapp",
                "to": "+972501234567",
                "text": { "body": "hello" }
            })))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = WhatsAppClient::new(
            format!("{}/messages", server.url()),
            "token".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        client.send_message("+972501234567", "hello").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_message_maps_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/messages")
            .with_status(401)
            .create_async()
            .await;

        let client = WhatsAppClient::new(
            format!("{}/messages", server.url()),
            "bad".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        let result = client.send_message("+972501234567", "hello").await;
        assert!(matches!(result, Err(WhatsAppError::Unauthorized)));
    }
}
