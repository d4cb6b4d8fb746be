//! Text Enhancement Gateway: pluggable, trait-based text generation for two fields.
//!
//! `summarize` drafts a professional summary; `refine` rewrites an entry description.
//! Default backend: `LlmEnhancer` over the shared `LlmClient`. Without an API key the
//! app runs `OfflineEnhancer`, which answers every call with a fixed notice and never
//! touches the network.
//!
//! `AppState` holds an `Arc<dyn TextEnhancer>`, chosen at startup from config.

pub mod apply;
pub mod handlers;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::llm_client::{prompts::PLAIN_TEXT_SYSTEM, LlmClient, LlmError};

/// Shown instead of generated text when no credential is configured.
pub const UNAVAILABLE_NOTICE: &str = "API Key missing. Please configure your environment.";

#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("text generation failed: {0}")]
    Llm(#[from] LlmError),
}

/// Result of one gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enhancement {
    /// Generated text; may be empty, in which case callers leave the field alone.
    Generated(String),
    /// The gateway is not configured. Not a failure.
    Unavailable { message: String },
}

/// The enhancement trait. Implement this to swap backends without touching handlers.
///
/// Calls are single-shot: no retry, no streaming.
#[async_trait]
pub trait TextEnhancer: Send + Sync {
    async fn summarize(&self, role: &str, skills: &str) -> Result<Enhancement, EnhanceError>;

    async fn refine(&self, text: &str) -> Result<Enhancement, EnhanceError>;

    /// Backend name for logs and `/health`.
    fn backend(&self) -> &'static str;
}

pub struct LlmEnhancer {
    llm: LlmClient,
}

impl LlmEnhancer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextEnhancer for LlmEnhancer {
    async fn summarize(&self, role: &str, skills: &str) -> Result<Enhancement, EnhanceError> {
        let prompt = prompts::summary_prompt(role, skills);
        let text = self.llm.complete_text(&prompt, PLAIN_TEXT_SYSTEM).await?;
        Ok(Enhancement::Generated(text))
    }

    async fn refine(&self, text: &str) -> Result<Enhancement, EnhanceError> {
        let prompt = prompts::refine_prompt(text);
        let text = self.llm.complete_text(&prompt, PLAIN_TEXT_SYSTEM).await?;
        Ok(Enhancement::Generated(text))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Degraded backend used when no API key is configured.
pub struct OfflineEnhancer;

impl OfflineEnhancer {
    fn unavailable(&self, operation: &str) -> Result<Enhancement, EnhanceError> {
        warn!(operation, "Text enhancement requested but no API key is configured");
        Ok(Enhancement::Unavailable {
            message: UNAVAILABLE_NOTICE.to_string(),
        })
    }
}

#[async_trait]
impl TextEnhancer for OfflineEnhancer {
    async fn summarize(&self, _role: &str, _skills: &str) -> Result<Enhancement, EnhanceError> {
        self.unavailable("summarize")
    }

    async fn refine(&self, _text: &str) -> Result<Enhancement, EnhanceError> {
        self.unavailable("refine")
    }

    fn backend(&self) -> &'static str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_enhancer_reports_unavailable() {
        let enhancer = OfflineEnhancer;
        let expected = Enhancement::Unavailable {
            message: UNAVAILABLE_NOTICE.to_string(),
        };
        assert_eq!(enhancer.summarize("Engineer", "Rust").await.unwrap(), expected);
        assert_eq!(enhancer.refine("• Did things").await.unwrap(), expected);
        assert_eq!(enhancer.backend(), "offline");
    }
}
