use crate::{Error, Result, config::AdvisorConfig};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use tracing::debug;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a professional fashion consultant and stylist.";

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String>;
}

/// OpenAI-compatible chat completions; pointed at Gemini's compatibility endpoint by default.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(config: &AdvisorConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.clone());

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url.clone());
        }

        Self {
            client: Client::with_config(openai_config),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

fn build_messages(system_prompt: &str, prompt: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(ChatCompletionRequestSystemMessageContent::Text(
            system_prompt.to_string(),
        ))
        .build()
        .map_err(|e| Error::advisor(format!("Failed to build system message: {}", e)))?;

    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(ChatCompletionRequestUserMessageContent::Text(
            prompt.to_string(),
        ))
        .build()
        .map_err(|e| Error::advisor(format!("Failed to build user message: {}", e)))?;

    Ok(vec![system.into(), user.into()])
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(build_messages(system_prompt, prompt)?)
            .temperature(0.7)
            .build()?;

        let response = self.client.chat().create(request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::advisor("Model returned no content"))
    }
}
