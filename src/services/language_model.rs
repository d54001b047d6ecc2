use async_trait::async_trait;

use crate::error::AppResult;

/// The bounded-context summarization service: free-form instruction text in,
/// free-form text out, or a failure with a diagnosable reason. No schema
/// beyond that is imposed.
#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn summarize(&self, prompt: &str) -> AppResult<String>;
}
