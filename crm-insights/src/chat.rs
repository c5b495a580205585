use crate::config::OpenAiConfig;
use crate::error::{InsightsError, InsightsResult};
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs, WebSearchOptions
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into()
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into()
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into()
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends the conversation and returns the assistant reply.
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> InsightsResult<String>;

    /// Like [`ChatModel::complete`], with the provider's web search tool
    /// enabled. Models without one answer from their own knowledge.
    async fn search(&self, model: &str, messages: &[ChatMessage]) -> InsightsResult<String> {
        self.complete(model, messages).await
    }
}

pub struct OpenAiChat {
    client: async_openai::Client<async_openai::config::OpenAIConfig>
}

impl OpenAiChat {
    pub fn new(config: &OpenAiConfig) -> InsightsResult<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            InsightsError::Configuration("OPENAI_API_KEY is not set".to_string())
        })?;

        let mut openai = async_openai::config::OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = &config.api_base {
            openai = openai.with_api_base(base);
        }

        Ok(Self {
            client: async_openai::Client::with_config(openai)
        })
    }

    async fn create(
        &self,
        model: &str,
        messages: &[ChatMessage],
        web_search: bool
    ) -> InsightsResult<String> {
        let messages = messages
            .iter()
            .map(Self::to_request_message)
            .collect::<InsightsResult<Vec<_>>>()?;

        debug!(model, messages = messages.len(), web_search, "Requesting chat completion");

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(model).messages(messages);
        if web_search {
            args.web_search_options(WebSearchOptions::default());
        }
        let request = args.build()?;

        let response = self.client.chat().create(request).await?;
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| InsightsError::Chat("empty response from chat model".to_string()))
    }

    fn to_request_message(message: &ChatMessage) -> InsightsResult<ChatCompletionRequestMessage> {
        let content = message.content.as_str();
        let request = match message.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(content)
                .build()?
                .into(),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(content)
                .build()?
                .into(),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(content)
                .build()?
                .into()
        };
        Ok(request)
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> InsightsResult<String> {
        self.create(model, messages, false).await
    }

    async fn search(&self, model: &str, messages: &[ChatMessage]) -> InsightsResult<String> {
        self.create(model, messages, true).await
    }
}

pub fn create_openai_chat(config: &OpenAiConfig) -> InsightsResult<Arc<dyn ChatModel>> {
    Ok(Arc::new(OpenAiChat::new(config)?))
}
