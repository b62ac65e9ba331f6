use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    error::GatewayError,
    gateway::{
        ModelGateway,
        types::{ChatMessage, ChatRequest, ChatResponse, ErrorBody, TagsResponse},
    },
};

/// HTTP client for an Ollama server. Cloning shares the connection pool.
#[derive(Debug, Clone)]
pub struct OllamaGateway {
    client: Client,
    base_url: String,
}

impl OllamaGateway {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait]
impl ModelGateway for OllamaGateway {
    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let response = self.client.get(self.url("/api/tags")).send().await?;
        let tags: TagsResponse = decode(response).await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, GatewayError> {
        let messages = [ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)];
        let request = ChatRequest {
            model,
            messages: &messages,
            stream: false,
        };

        debug!(model, prompt_chars = user_prompt.chars().count(), "sending chat request");
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(&request)
            .send()
            .await?;
        let reply: ChatResponse = decode(response).await?;

        reply
            .message
            .and_then(|m| m.content)
            .ok_or(GatewayError::MissingContent)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| {
                let text = String::from_utf8_lossy(&body).trim().to_string();
                if text.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    text
                }
            });
        return Err(GatewayError::Status {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&body).map_err(|e| GatewayError::Decode(e.to_string()))
}
