use crate::config::AppConfig;
use crate::llm::{GeminiClient, LlmClient};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub llm: Arc<dyn LlmClient>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        if !config.gemini.has_credential() {
            tracing::warn!("GEMINI_API_KEY is not set; plan requests will fail until it is configured");
        }

        // one client for the whole process
        let llm = Arc::new(GeminiClient::new(&config.gemini)?) as Arc<dyn LlmClient>;

        Ok(Self { config, llm })
    }

    pub fn from_parts(config: Arc<AppConfig>, llm: Arc<dyn LlmClient>) -> Self {
        Self { config, llm }
    }

    pub fn with_llm(mut self, llm: Arc<dyn LlmClient>) -> Self {
        self.llm = llm;
        self
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use axum::async_trait;

        #[derive(Clone)]
        struct FakeLlm;
        #[async_trait]
        impl LlmClient for FakeLlm {
            async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
                Ok("<div class=\"nutrition-summary\"></div><table></table>".into())
            }
        }

        let config = Arc::new(AppConfig {
            gemini: crate::config::GeminiConfig {
                api_key: Some("test".into()),
                model: "gemini-test".into(),
                api_base: "http://127.0.0.1:9".into(),
            },
        });

        Self::from_parts(config, Arc::new(FakeLlm))
    }
}
