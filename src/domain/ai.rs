use anyhow::Result;
use async_trait::async_trait;

/// Text-in, text-out access to the generative model. Prompt construction and
/// reply parsing stay in the application layer.
#[async_trait]
pub trait AiClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
