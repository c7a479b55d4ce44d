use anyhow::Result;
use async_trait::async_trait;

/// Language-model boundary. The runtime composes prompts and consumes raw
/// completions; transport, retries, and vendor quirks live behind this
/// trait. Implementations must be safe to share across tasks.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
