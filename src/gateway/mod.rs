//! Access to the external model runtime.
//!
//! Handlers only see [`ModelGateway`]; the Ollama wire format stays inside
//! [`OllamaGateway`].

mod ollama;
mod types;

use async_trait::async_trait;

use crate::error::GatewayError;

pub use ollama::OllamaGateway;
pub use types::{ChatMessage, Role};

#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Identifiers of the models the runtime currently offers.
    async fn list_models(&self) -> Result<Vec<String>, GatewayError>;

    /// Single stateless exchange: one system message, one user message, one reply.
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        model: &str,
    ) -> Result<String, GatewayError>;
}
