// Completion invoker - one chat completion call per attempt

use crate::brain::{Brain, BrainError, ChatMessage, ChatRequest, ChatResponse, RequestBuilder};

use super::error::AgentError;
use tracing::info;

/// Trait for brain reference (for testing)
#[async_trait::async_trait]
pub trait BrainRef: Send + Sync {
    async fn infer(&self, request: ChatRequest) -> Result<ChatResponse, BrainError>;
    fn model(&self) -> &str;
    fn max_output_tokens(&self) -> Option<u32>;
}

#[async_trait::async_trait]
impl BrainRef for Brain {
    async fn infer(&self, request: ChatRequest) -> Result<ChatResponse, BrainError> {
        Brain::infer(self, request).await
    }

    fn model(&self) -> &str {
        self.default_model()
    }

    fn max_output_tokens(&self) -> Option<u32> {
        Some(Brain::max_output_tokens(self))
    }
}

/// Send `messages` once and return the raw text of the top choice.
///
/// No retry happens here; service errors propagate to the caller.
pub async fn invoke<B: BrainRef>(
    brain: &B,
    messages: &[ChatMessage],
    temperature: f32,
) -> Result<String, AgentError> {
    let request = build_request(brain, messages, temperature).map_err(AgentError::RequestBuild)?;

    let response = brain.infer(request).await?;

    if let Some(usage) = &response.usage {
        info!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "completion usage"
        );
    }

    let raw = response
        .first_content()
        .ok_or(AgentError::EmptyCompletion)?
        .to_string();

    info!(raw_output = %raw, "completion raw output");
    Ok(raw)
}

/// Build inference request
fn build_request<B: BrainRef>(
    brain: &B,
    messages: &[ChatMessage],
    temperature: f32,
) -> Result<ChatRequest, &'static str> {
    let mut builder = RequestBuilder::new(brain.model())
        .messages(messages.iter().cloned())
        .temperature(temperature);

    if let Some(max_tokens) = brain.max_output_tokens() {
        builder = builder.max_tokens(max_tokens);
    }

    builder.build()
}
