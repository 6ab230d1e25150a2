pub mod gemini;

use axum::async_trait;

pub use gemini::GeminiClient;

/// Outbound text-generation port: one prompt in, the model's full text out.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}
